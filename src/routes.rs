use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::api::dto::ApiResponse;
use crate::app_state::AppState;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    let api_v1 = Router::new()
        .nest("/windows", crate::api::routes::window_routes::window_routes())
        .nest("/insights", crate::api::routes::insight_routes::insight_routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1)
        .fallback(handler_404)
        .layer(CorsLayer::very_permissive())
}

async fn root() -> &'static str {
    "Server is running!"
}

async fn health_check() -> &'static str {
    "OK"
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err("The requested resource was not found")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::build_app_state;
    use crate::core::config::AppConfig;

    #[tokio::test]
    async fn liveness_handlers_answer() {
        assert_eq!(root().await, "Server is running!");
        assert_eq!(health_check().await, "OK");
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let res = handler_404().await.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn router_accepts_state() {
        let _router: Router = app_router().with_state(build_app_state(&AppConfig::default()));
    }
}
