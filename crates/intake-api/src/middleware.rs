//! Request-level middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::models::SubmitResponse;

use crate::state::AppState;

/// Reject bodies whose declared Content-Length exceeds the configured
/// maximum, before any multipart parsing or upload work runs. Bodies without
/// a declared length still hit the body-limit layers downstream.
pub async fn body_size_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let limit = state.config.max_body_bytes() as u64;
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if let Some(length) = declared {
        if length > limit {
            tracing::debug!(
                content_length = length,
                limit_bytes = limit,
                "Rejecting oversized request body"
            );
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(SubmitResponse::failure("Request too large", None)),
            )
                .into_response();
        }
    }

    next.run(request).await
}
