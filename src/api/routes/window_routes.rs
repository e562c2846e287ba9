//! Window routes (e.g., /api/v1/windows/*)

use axum::{routing::get, Router};
use crate::api::controller::window::WindowController;
use crate::app_state::AppState;

pub fn window_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(WindowController::list_window_presets))
        .route("/prior", get(WindowController::get_prior_window))
}
