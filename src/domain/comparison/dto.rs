use serde::Serialize;

use crate::core::util::cost_util::{CostUtil, CHANGE_EPSILON};
use crate::domain::common::service::ranking::{SortField, SortValue};

/// Which way a cost moved. Increases are the adverse direction for spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increase,
    Decrease,
    Flat,
}

impl ChangeDirection {
    /// Moves within a cent either way are flat.
    pub fn of(change: f64) -> Self {
        if change > CHANGE_EPSILON {
            Self::Increase
        } else if change < -CHANGE_EPSILON {
            Self::Decrease
        } else {
            Self::Flat
        }
    }
}

/// One entity's cost in the current window against the prior window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub name: String,
    pub current_cost: f64,
    pub prior_cost: f64,
    pub change: f64,
    /// `0` when the prior cost is zero.
    pub change_pct: f64,
    pub direction: ChangeDirection,
}

impl ComparisonRow {
    pub fn new<S: Into<String>>(name: S, current_cost: f64, prior_cost: f64) -> Self {
        let change = current_cost - prior_cost;
        Self {
            name: name.into(),
            current_cost,
            prior_cost,
            change,
            change_pct: CostUtil::percent_change(change, prior_cost),
            direction: ChangeDirection::of(change),
        }
    }
}

impl SortField for ComparisonRow {
    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => SortValue::text(self.name.as_str()),
            "currentCost" => SortValue::number(self.current_cost),
            "priorCost" => SortValue::number(self.prior_cost),
            "change" => SortValue::number(self.change),
            "absChange" => SortValue::number(self.change.abs()),
            "changePct" => SortValue::number(self.change_pct),
            _ => None,
        }
    }
}

/// Column totals across all comparison rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTotals {
    pub current_cost: f64,
    pub prior_cost: f64,
    pub change: f64,
    pub change_pct: f64,
    pub direction: ChangeDirection,
}

/// Headline spend against the prior period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendDelta {
    pub current: f64,
    pub prior: f64,
    pub diff: f64,
    pub pct: f64,
    /// Both periods are zero; there is nothing to compare.
    pub no_change: bool,
    pub direction: ChangeDirection,
}

/// A row of the "top cost drivers" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCostDriverRow {
    pub name: String,
    pub total_cost: f64,
    pub cost_change: f64,
    pub cost_change_pct: f64,
    pub efficiency: f64,
    pub direction: ChangeDirection,
}

impl SortField for TopCostDriverRow {
    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => SortValue::text(self.name.as_str()),
            "totalCost" => SortValue::number(self.total_cost),
            "costChange" => SortValue::number(self.cost_change),
            "costChangePct" => SortValue::number(self.cost_change_pct),
            "efficiency" => SortValue::number(self.efficiency),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_ignores_sub_cent_moves() {
        assert_eq!(ChangeDirection::of(0.011), ChangeDirection::Increase);
        assert_eq!(ChangeDirection::of(0.01), ChangeDirection::Flat);
        assert_eq!(ChangeDirection::of(-0.005), ChangeDirection::Flat);
        assert_eq!(ChangeDirection::of(-2.0), ChangeDirection::Decrease);
    }

    #[test]
    fn row_serializes_with_table_column_ids() {
        let row = ComparisonRow::new("a", 100.0, 80.0);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["currentCost"], 100.0);
        assert_eq!(value["priorCost"], 80.0);
        assert_eq!(value["change"], 20.0);
        assert_eq!(value["changePct"], 25.0);
        assert_eq!(value["direction"], "increase");
    }

    #[test]
    fn unknown_fields_sort_as_missing() {
        let row = ComparisonRow::new("a", 1.0, 1.0);
        assert_eq!(row.sort_value("cpuCost"), None);
    }

    #[test]
    fn abs_change_ignores_sign() {
        let row = ComparisonRow::new("a", 10.0, 50.0);
        assert_eq!(row.sort_value("change"), SortValue::number(-40.0));
        assert_eq!(row.sort_value("absChange"), SortValue::number(40.0));
    }
}
