use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::json;
use tracing::info;

use pairdiff_store::InMemorySideStore;
use pairdiff_types::Side;
use pairdiff_validate::{Transport, ValidateResult, Validator};

use crate::error::{ServerError, ServerResult};
use crate::response::{ResponseBody, EQUAL_PAYLOADS};

/// Validator shared by every request.
pub type SharedValidator = Arc<Validator<InMemorySideStore, Transport>>;

/// `POST /v1/diff/:id/left`
pub async fn set_left(
    State(validator): State<SharedValidator>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<ResponseBody>> {
    store_side(validator, Side::Left, id, body).await
}

/// `POST /v1/diff/:id/right`
pub async fn set_right(
    State(validator): State<SharedValidator>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<ResponseBody>> {
    store_side(validator, Side::Right, id, body).await
}

/// `GET /v1/diff/:id`
pub async fn get_diff(
    State(validator): State<SharedValidator>,
    Path(id): Path<String>,
) -> ServerResult<Json<ResponseBody>> {
    info!(id = %id, "diff requested");
    blocking(move || validator.get_diff(&id)).await?;
    Ok(Json(ResponseBody::message(EQUAL_PAYLOADS)))
}

async fn store_side(
    validator: SharedValidator,
    side: Side,
    id: String,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<ResponseBody>> {
    let body = body.map_err(|rejection| ServerError::from_body_rejection(side, rejection))?;
    info!(id = %id, %side, bytes = body.len(), "payload received");
    let raw = String::from_utf8(body.to_vec()).map_err(|e| ServerError::InvalidBody {
        side,
        cause: e.to_string(),
    })?;

    let message = format!("the {side} value has been set on id {id}");
    blocking(move || validator.set_side(side, &id, raw)).await?;
    Ok(Json(ResponseBody::message(message)))
}

/// Run a validator call on the blocking pool; it takes the per-id lock and
/// may parse and diff large payloads.
async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> ValidateResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(format!("validator task failed: {e}")))?;
    Ok(result?)
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler(State(validator): State<SharedValidator>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "pairdiff-server",
        "version": env!("CARGO_PKG_VERSION"),
        "transport": validator.parser(),
    }))
}
