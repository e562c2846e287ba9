use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::core::util::cost_util::CostUtil;
use crate::domain::common::model::{is_synthetic_key, CumulativeCostSet, EfficiencyRecord};
use crate::domain::common::service::ranking::{top_n, SortDirection, SortKey};
use crate::domain::comparison::dto::{
    ChangeDirection, ComparisonRow, ComparisonTotals, SpendDelta, TopCostDriverRow,
};
use crate::domain::efficiency::service::scores;

/// Default number of rows in the top cost drivers table.
pub const DEFAULT_TOP_DRIVERS_LIMIT: usize = 10;

/// Merges current and prior cumulative datasets into comparison rows.
///
/// Rows cover every entity seen in either period, minus the synthetic buckets.
/// A side without the entity contributes zero. Row order is unspecified.
pub fn merge(current: &CumulativeCostSet, prior: &CumulativeCostSet) -> Vec<ComparisonRow> {
    let names: BTreeSet<&String> = current
        .keys()
        .chain(prior.keys())
        .filter(|name| !is_synthetic_key(name))
        .collect();

    let rows: Vec<ComparisonRow> = names
        .into_iter()
        .map(|name| {
            let current_cost = current.get(name).map(|r| r.total_cost()).unwrap_or(0.0);
            let prior_cost = prior.get(name).map(|r| r.total_cost()).unwrap_or(0.0);
            ComparisonRow::new(name.as_str(), current_cost, prior_cost)
        })
        .collect();

    debug!(
        current = current.len(),
        prior = prior.len(),
        rows = rows.len(),
        "Merged comparison datasets"
    );

    rows
}

/// Sums each column; the percent change uses the summed prior with the same
/// zero guard as individual rows.
pub fn totals(rows: &[ComparisonRow]) -> ComparisonTotals {
    let (current_cost, prior_cost, change) = rows.iter().fold((0.0, 0.0, 0.0), |acc, row| {
        (
            acc.0 + row.current_cost,
            acc.1 + row.prior_cost,
            acc.2 + row.change,
        )
    });

    ComparisonTotals {
        current_cost,
        prior_cost,
        change,
        change_pct: CostUtil::percent_change(change, prior_cost),
        direction: ChangeDirection::of(change),
    }
}

/// Sum of `totalCost` over a dataset, synthetic buckets included.
pub fn total_spend(set: &CumulativeCostSet) -> f64 {
    set.values().map(|r| r.total_cost()).sum()
}

pub fn spend_delta(current: f64, prior: f64) -> SpendDelta {
    let diff = current - prior;
    SpendDelta {
        current,
        prior,
        diff,
        pct: CostUtil::percent_change(diff, prior),
        no_change: current == 0.0 && prior == 0.0,
        direction: ChangeDirection::of(diff),
    }
}

/// Entities of the current period with their change against the prior period
/// and their blended efficiency, ranked by `sort` and cut to `limit` rows.
///
/// Entities that only existed in the prior period are not drivers. Efficiency
/// comes from the efficiency dataset, then the record's own `totalEfficiency`,
/// then zero.
pub fn top_cost_drivers(
    current: &CumulativeCostSet,
    prior: &CumulativeCostSet,
    efficiencies: &[EfficiencyRecord],
    sort: &SortKey,
    limit: usize,
) -> Vec<TopCostDriverRow> {
    let efficiency_by_name: HashMap<String, f64> = scores(efficiencies)
        .into_iter()
        .map(|s| (s.name, s.blended_efficiency))
        .collect();

    let rows: Vec<TopCostDriverRow> = current
        .iter()
        .filter(|(name, _)| !is_synthetic_key(name))
        .map(|(name, record)| {
            let total_cost = record.total_cost();
            let prior_cost = prior.get(name).map(|r| r.total_cost()).unwrap_or(0.0);
            let change = total_cost - prior_cost;
            let efficiency = efficiency_by_name
                .get(name.as_str())
                .copied()
                .or(record.total_efficiency.filter(|e| e.is_finite()))
                .unwrap_or(0.0);

            TopCostDriverRow {
                name: name.clone(),
                total_cost,
                cost_change: change,
                cost_change_pct: CostUtil::percent_change(change, prior_cost),
                efficiency,
                direction: ChangeDirection::of(change),
            }
        })
        .collect();

    top_n(rows, sort, limit)
}

/// Rows with the largest moves either way, for the comparison chart.
pub fn top_by_change(rows: Vec<ComparisonRow>, limit: usize) -> Vec<ComparisonRow> {
    top_n(rows, &SortKey::new("absChange", SortDirection::Desc), limit)
}
