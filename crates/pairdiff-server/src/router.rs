use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, SharedValidator};

/// Build the axum router with all pairdiff endpoints.
pub fn build_router(validator: SharedValidator, max_payload_bytes: usize) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/diff/:id", get(handler::get_diff))
        .route("/v1/diff/:id/left", post(handler::set_left))
        .route("/v1/diff/:id/right", post(handler::set_right))
        .layer(DefaultBodyLimit::max(max_payload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(validator)
}
