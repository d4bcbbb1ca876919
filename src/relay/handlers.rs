// HTTP handlers for the relay server

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::RelayError;
use super::RelayServer;
use crate::agent::RelayRequest;

/// `POST /` and `POST /po-agent`
///
/// The body is parsed by hand so that a malformed request is reported in the
/// usual `{ "error" }` envelope rather than as an extractor rejection.
pub async fn handle_relay(
    State(server): State<Arc<RelayServer>>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let request: RelayRequest = serde_json::from_slice(&body)
        .map_err(|e| RelayError::internal(format!("Invalid request body: {e}")))?;

    let result = server.relay().handle(&request).await?;
    Ok(Json(json!({ "result": result })))
}

/// `GET /health`
pub async fn health_check(State(server): State<Arc<RelayServer>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": server.relay().model(),
    }))
}

pub async fn handle_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
