use tracing::debug;

use crate::core::util::cost_util::CostUtil;
use crate::domain::common::service::ranking::{top_n, SortDirection, SortKey};
use crate::domain::common::model::{
    is_synthetic_key, ClusterSavingsSummary, CumulativeCostSet, EfficiencyRecord,
};
use crate::domain::efficiency::dto::{
    EfficiencyClass, EfficiencyRow, EfficiencyScore, EfficiencySummary,
};

/// Cost-weighted CPU/memory efficiency, in `[0, 1]`.
///
/// The resource with more spend dominates the score. No compute cost means a
/// score of zero, not "unknown"; callers that need to tell the two apart must
/// look at the costs themselves. Negative costs count as zero and efficiencies
/// are clamped into `[0, 1]`.
pub fn blend(cpu_cost: f64, ram_cost: f64, cpu_efficiency: f64, ram_efficiency: f64) -> f64 {
    let cpu_cost = cpu_cost.max(0.0);
    let ram_cost = ram_cost.max(0.0);
    let compute_cost = cpu_cost + ram_cost;

    if compute_cost == 0.0 {
        return 0.0;
    }

    let weighted = cpu_cost * clamp_efficiency(cpu_efficiency)
        + ram_cost * clamp_efficiency(ram_efficiency);

    CostUtil::safe_ratio(weighted, compute_cost).clamp(0.0, 1.0)
}

fn clamp_efficiency(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn blend_record(record: &EfficiencyRecord) -> f64 {
    blend(
        record.cpu_cost(),
        record.ram_cost(),
        record.cpu_efficiency(),
        record.memory_efficiency(),
    )
}

fn workloads(records: &[EfficiencyRecord]) -> impl Iterator<Item = &EfficiencyRecord> {
    records.iter().filter(|r| !is_synthetic_key(&r.name))
}

/// Fleet score: sums the per-resource weighted efficiencies and costs across
/// entities before dividing, so large spenders dominate in proportion.
pub fn fleet_efficiency(records: &[EfficiencyRecord]) -> f64 {
    let (cpu_cost, ram_cost, weighted) = workloads(records).fold(
        (0.0, 0.0, 0.0),
        |(cpu, ram, weighted), r| {
            let c = r.cpu_cost().max(0.0);
            let m = r.ram_cost().max(0.0);
            (
                cpu + c,
                ram + m,
                weighted
                    + c * clamp_efficiency(r.cpu_efficiency())
                    + m * clamp_efficiency(r.memory_efficiency()),
            )
        },
    );

    CostUtil::safe_ratio(weighted, cpu_cost + ram_cost).clamp(0.0, 1.0)
}

/// Summed CPU and memory cost across workloads. Zero means no blended fleet
/// score can be computed.
pub fn compute_cost(records: &[EfficiencyRecord]) -> f64 {
    workloads(records)
        .map(|r| r.cpu_cost().max(0.0) + r.ram_cost().max(0.0))
        .sum()
}

/// Fleet score from a cost dataset alone: each entity's backend-reported
/// `totalEfficiency` weighted by its `totalCost`. Used when no efficiency
/// dataset is available.
pub fn fleet_total_efficiency(set: &CumulativeCostSet) -> f64 {
    let (cost, weighted) = set
        .iter()
        .filter(|(name, _)| !is_synthetic_key(name))
        .fold((0.0, 0.0), |(cost, weighted), (_, r)| {
            let c = r.total_cost().max(0.0);
            let e = clamp_efficiency(CostUtil::cost_or_zero(r.total_efficiency));
            (cost + c, weighted + c * e)
        });

    CostUtil::safe_ratio(weighted, cost)
}

pub fn scores(records: &[EfficiencyRecord]) -> Vec<EfficiencyScore> {
    workloads(records)
        .map(|r| EfficiencyScore {
            name: r.name.clone(),
            blended_efficiency: blend_record(r),
        })
        .collect()
}

pub fn efficiency_rows(records: &[EfficiencyRecord]) -> Vec<EfficiencyRow> {
    workloads(records)
        .map(|r| {
            let blended_efficiency = blend_record(r);
            EfficiencyRow {
                record: r.clone(),
                blended_efficiency,
                efficiency_class: EfficiencyClass::classify(blended_efficiency),
            }
        })
        .collect()
}

/// Rows with the most potential savings, for the efficiency chart.
pub fn top_by_savings(rows: Vec<EfficiencyRow>, limit: usize) -> Vec<EfficiencyRow> {
    top_n(rows, &SortKey::new("costSavings", SortDirection::Desc), limit)
}

/// Entities whose blended score is under the 50% target.
pub fn below_target_count(records: &[EfficiencyRecord]) -> usize {
    workloads(records)
        .filter(|r| EfficiencyClass::classify(blend_record(r)).is_below_target())
        .count()
}

pub fn summarize(
    records: &[EfficiencyRecord],
    cluster_savings_summary: Option<ClusterSavingsSummary>,
) -> EfficiencySummary {
    let cluster_efficiency = fleet_efficiency(records);
    let total_savings = workloads(records).map(|r| r.cost_savings()).sum();
    let below_target = below_target_count(records);
    let entity_count = workloads(records).count();

    debug!(
        entities = entity_count,
        below_target,
        cluster_efficiency,
        "Summarized efficiency dataset"
    );

    EfficiencySummary {
        total_savings,
        cluster_efficiency,
        cluster_efficiency_class: EfficiencyClass::classify(cluster_efficiency),
        below_target_count: below_target,
        entity_count,
        cluster_savings_summary,
    }
}
