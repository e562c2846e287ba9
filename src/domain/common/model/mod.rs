//! Shared domain types (cost records, efficiency records, synthetic buckets)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::core::util::cost_util::CostUtil;

/// Bucket holding cost that could not be attributed to any workload.
pub const IDLE_KEY: &str = "__idle__";

/// Bucket holding cost of resources without an owning workload.
pub const UNALLOCATED_KEY: &str = "__unallocated__";

/// Synthetic buckets are bookkeeping rows, never workloads.
#[inline]
pub fn is_synthetic_key(name: &str) -> bool {
    name == IDLE_KEY || name == UNALLOCATED_KEY
}

/// Cumulative dataset: one aggregated record per entity for a whole window.
pub type CumulativeCostSet = BTreeMap<String, CostRecord>;

/// One entity's cumulative cost for a window, as returned by the allocation backend.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostRecord {
    /// Entity name (namespace, controller, pod, label value...).
    pub name: Option<String>,
    pub total_cost: Option<f64>,
    /// Backend-computed efficiency, used only when no efficiency record exists.
    pub total_efficiency: Option<f64>,
}

impl CostRecord {
    pub fn with_total(total_cost: f64) -> Self {
        Self {
            total_cost: Some(total_cost),
            ..Default::default()
        }
    }

    #[inline]
    pub fn total_cost(&self) -> f64 {
        CostUtil::cost_or_zero(self.total_cost)
    }
}

/// Per-entity efficiency record from the efficiency endpoint.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EfficiencyRecord {
    pub name: String,
    pub cpu_cost: Option<f64>,
    pub ram_cost: Option<f64>,
    pub cpu_efficiency: Option<f64>,
    pub memory_efficiency: Option<f64>,
    pub cost_savings: Option<f64>,
    pub current_total_cost: Option<f64>,
    pub ram_bytes_requested: Option<f64>,
    pub ram_bytes_used: Option<f64>,
    pub recommended_ram_request: Option<f64>,
}

impl EfficiencyRecord {
    pub fn cpu_cost(&self) -> f64 {
        CostUtil::cost_or_zero(self.cpu_cost)
    }

    pub fn ram_cost(&self) -> f64 {
        CostUtil::cost_or_zero(self.ram_cost)
    }

    pub fn cpu_efficiency(&self) -> f64 {
        CostUtil::cost_or_zero(self.cpu_efficiency)
    }

    pub fn memory_efficiency(&self) -> f64 {
        CostUtil::cost_or_zero(self.memory_efficiency)
    }

    pub fn cost_savings(&self) -> f64 {
        CostUtil::cost_or_zero(self.cost_savings)
    }
}

/// Fleet-level scale-down estimate. Passed through untouched.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSavingsSummary {
    pub scale_down_likely: bool,
    pub estimated_nodes_freed: Option<f64>,
    pub bottleneck_resource: Option<String>,
    pub node_savings_estimate_msg: Option<String>,
}
