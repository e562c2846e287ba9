//! Window controller: preset catalogue and prior-window resolution

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use tracing::info;

use crate::api::dto::window_dto::{PriorWindowDto, WindowPresetDto, WindowQuery};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct WindowController;

impl WindowController {
    pub async fn list_window_presets(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Vec<WindowPresetDto>>>, AppError> {
        to_json(state.window_service.list_window_presets().await)
    }

    pub async fn get_prior_window(
        State(state): State<AppState>,
        query: Result<Query<WindowQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<PriorWindowDto>>, AppError> {
        let Query(q) = query?;
        info!(window = ?q.window, "Resolving prior window");
        to_json(state.window_service.get_prior_window(q).await)
    }
}
