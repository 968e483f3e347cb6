//! Whole-request deadline

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::types::ApiError;

/// Answers 504 when the handler does not finish within the deadline
///
/// The handler future is dropped on expiry, abandoning in-flight store and
/// model calls.
pub async fn timeout_middleware(
    State(timeout): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::gateway_timeout(format!(
            "Request did not complete within {}ms",
            timeout.as_millis()
        ))
        .into_response(),
    }
}
