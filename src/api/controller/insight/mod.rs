//! Insight controller: connects routes to comparison, efficiency and
//! top-driver usecases

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::insight::dto::{
    ComparisonRequest, ComparisonResponse, EfficiencyRequest, EfficiencyResponse,
    TopDriversRequest, TopDriversResponse,
};
use crate::errors::AppError;

pub struct InsightController;

impl InsightController {
    pub async fn compare_costs(
        State(state): State<AppState>,
        payload: Result<Json<ComparisonRequest>, JsonRejection>,
    ) -> Result<Json<ApiResponse<ComparisonResponse>>, AppError> {
        let Json(req) = payload?;
        info!(
            current = req.current.as_ref().map_or(0, |s| s.len()),
            prior = req.prior.as_ref().map_or(0, |s| s.len()),
            "Comparing cost datasets"
        );
        to_json(state.insight_service.compare_costs(req).await)
    }

    pub async fn efficiency_report(
        State(state): State<AppState>,
        payload: Result<Json<EfficiencyRequest>, JsonRejection>,
    ) -> Result<Json<ApiResponse<EfficiencyResponse>>, AppError> {
        let Json(req) = payload?;
        info!(
            records = req.efficiencies.as_ref().map_or(0, |r| r.len()),
            "Building efficiency report"
        );
        to_json(state.insight_service.efficiency_report(req).await)
    }

    pub async fn top_drivers(
        State(state): State<AppState>,
        payload: Result<Json<TopDriversRequest>, JsonRejection>,
    ) -> Result<Json<ApiResponse<TopDriversResponse>>, AppError> {
        let Json(req) = payload?;
        info!(limit = ?req.limit, "Building top cost drivers");
        to_json(state.insight_service.top_drivers(req).await)
    }
}
