//! Request and response bodies for the insight endpoints.
//!
//! Callers post the datasets they already fetched from the cost backend. Any
//! dataset may be `null` or absent; it is treated as empty.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::table_query_dto::TableQuery;
use crate::domain::common::model::{ClusterSavingsSummary, CumulativeCostSet, EfficiencyRecord};
use crate::domain::common::service::pagination::SortState;
use crate::domain::common::service::ranking::SortDirection;
use crate::domain::comparison::dto::{ComparisonRow, ComparisonTotals, SpendDelta, TopCostDriverRow};
use crate::domain::efficiency::dto::{EfficiencyRow, EfficiencySummary};
use crate::domain::window::model::WindowSpec;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ComparisonRequest {
    /// Current window, echoed back with its prior window when present.
    pub window: Option<WindowSpec>,
    pub current: Option<CumulativeCostSet>,
    pub prior: Option<CumulativeCostSet>,
    #[validate(nested)]
    pub table: TableQuery,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub window: Option<String>,
    pub prior_window: Option<String>,
    pub totals: ComparisonTotals,
    pub sort: SortState,
    pub rows: PaginatedResponse<ComparisonRow>,
    /// Largest moves either way, independent of the table sort.
    pub chart: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EfficiencyRequest {
    pub efficiencies: Option<Vec<EfficiencyRecord>>,
    pub cluster_savings_summary: Option<ClusterSavingsSummary>,
    #[validate(nested)]
    pub table: TableQuery,
}

#[derive(Debug, Serialize)]
pub struct EfficiencyResponse {
    pub summary: EfficiencySummary,
    pub sort: SortState,
    pub rows: PaginatedResponse<EfficiencyRow>,
    /// Largest potential savings, independent of the table sort.
    pub chart: Vec<EfficiencyRow>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TopDriversRequest {
    pub current: Option<CumulativeCostSet>,
    pub prior: Option<CumulativeCostSet>,
    pub efficiencies: Option<Vec<EfficiencyRecord>>,
    #[validate(length(min = 1, max = 128))]
    pub order_by: Option<String>,
    pub direction: Option<SortDirection>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

/// Overview headline: spend against the prior period, fleet efficiency and the
/// biggest cost drivers.
#[derive(Debug, Serialize)]
pub struct TopDriversResponse {
    pub spend: SpendDelta,
    pub cluster_efficiency: f64,
    pub total_savings: f64,
    pub sort: SortState,
    pub drivers: Vec<TopCostDriverRow>,
}
