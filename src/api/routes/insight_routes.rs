//! Insight routes (e.g., /api/v1/insights/*)

use axum::{routing::post, Router};
use crate::api::controller::insight::InsightController;
use crate::app_state::AppState;

pub fn insight_routes() -> Router<AppState> {
    Router::new()
        .route("/comparison", post(InsightController::compare_costs))
        .route("/efficiency", post(InsightController::efficiency_report))
        .route("/top-drivers", post(InsightController::top_drivers))
}
