use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use guestbook_log::{BlockOutcome, DeleteRequest, Guestbook};
use guestbook_types::Drawing;
use serde_json::json;

use crate::client_ip;
use crate::error::ApiError;

pub const SECRET_KEY_HEADER: &str = "secret-key";
pub const DRAWING_INDEX_HEADER: &str = "drawing-index";
pub const BLOCK_IP_HEADER: &str = "block-ip";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub guestbook: Arc<Guestbook>,
}

impl AppState {
    pub fn new(guestbook: Guestbook) -> Self {
        Self {
            guestbook: Arc::new(guestbook),
        }
    }
}

/// `GET`: the stored log, byte for byte.
pub async fn list_drawings(State(state): State<AppState>) -> Result<Response, ApiError> {
    let blob = state.guestbook.raw_log().await?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        blob,
    )
        .into_response())
}

/// `POST`: the body is one new drawing.
pub async fn submit_drawing(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let submitter = client_ip::submitter(&headers);
    let receipt = state
        .guestbook
        .append(Drawing::new(body), &submitter)
        .await?;
    tracing::debug!(index = receipt.index, "accepted drawing");
    Ok((StatusCode::OK, "Drawing saved successfully"))
}

/// `DELETE`: remove one drawing by storage-order index, optionally blocking
/// its submitter.
pub async fn delete_drawing(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    let request = DeleteRequest {
        secret: header(SECRET_KEY_HEADER),
        index: header(DRAWING_INDEX_HEADER),
        block_submitter: header(BLOCK_IP_HEADER).as_deref() == Some("true"),
    };

    let outcome = state.guestbook.delete(&request).await?;
    let message = match &outcome.block {
        BlockOutcome::Blocked { ip } => format!("Drawing deleted and IP {ip} blocked"),
        BlockOutcome::NoKnownIp => {
            "Drawing deleted (no IP on record, nothing blocked)".to_string()
        }
        BlockOutcome::Failed { .. } => "Drawing deleted (IP could not be blocked)".to_string(),
        BlockOutcome::NotRequested => "Drawing deleted successfully".to_string(),
    };
    Ok((StatusCode::OK, message))
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": "guestbook-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
