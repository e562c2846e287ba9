use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::domain::common::model::{ClusterSavingsSummary, EfficiencyRecord};
use crate::domain::common::service::ranking::{value_at_path, SortField, SortValue};

/// Score at or above which an entity is considered efficient.
pub const GOOD_EFFICIENCY: f64 = 0.8;

/// Score below which an entity counts against the fleet target.
pub const TARGET_EFFICIENCY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyClass {
    Good,
    Marginal,
    Poor,
}

impl EfficiencyClass {
    pub fn classify(score: f64) -> Self {
        if score >= GOOD_EFFICIENCY {
            Self::Good
        } else if score >= TARGET_EFFICIENCY {
            Self::Marginal
        } else {
            Self::Poor
        }
    }

    pub fn is_below_target(&self) -> bool {
        matches!(self, Self::Poor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyScore {
    pub name: String,
    pub blended_efficiency: f64,
}

/// An efficiency record together with its blended score, as shown in the
/// efficiency report. Serializes flat so record columns sort by their own ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyRow {
    #[serde(flatten)]
    pub record: EfficiencyRecord,
    pub blended_efficiency: f64,
    pub efficiency_class: EfficiencyClass,
}

impl SortField for EfficiencyRow {
    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => SortValue::text(self.record.name.as_str()),
            "blendedEfficiency" => SortValue::number(self.blended_efficiency),
            "costSavings" => self.record.cost_savings.and_then(SortValue::number),
            "currentTotalCost" => self.record.current_total_cost.and_then(SortValue::number),
            other => value_at_path(self, other),
        }
    }
}

/// Fleet-wide efficiency headline.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencySummary {
    pub total_savings: f64,
    pub cluster_efficiency: f64,
    pub cluster_efficiency_class: EfficiencyClass,
    pub below_target_count: usize,
    pub entity_count: usize,
    pub cluster_savings_summary: Option<ClusterSavingsSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(EfficiencyClass::classify(1.0), EfficiencyClass::Good);
        assert_eq!(EfficiencyClass::classify(0.8), EfficiencyClass::Good);
        assert_eq!(EfficiencyClass::classify(0.79), EfficiencyClass::Marginal);
        assert_eq!(EfficiencyClass::classify(0.5), EfficiencyClass::Marginal);
        assert_eq!(EfficiencyClass::classify(0.49), EfficiencyClass::Poor);
        assert_eq!(EfficiencyClass::classify(0.0), EfficiencyClass::Poor);
        assert!(EfficiencyClass::Poor.is_below_target());
        assert!(!EfficiencyClass::Marginal.is_below_target());
    }

    #[test]
    fn row_sorts_on_flattened_record_columns() {
        let row = EfficiencyRow {
            record: EfficiencyRecord {
                name: "api".into(),
                ram_bytes_requested: Some(2048.0),
                ..Default::default()
            },
            blended_efficiency: 0.4,
            efficiency_class: EfficiencyClass::Poor,
        };

        assert_eq!(row.sort_value("ramBytesRequested"), SortValue::number(2048.0));
        assert_eq!(row.sort_value("cpuEfficiency"), None);
        assert_eq!(row.sort_value("efficiencyClass"), SortValue::text("poor"));
    }
}
