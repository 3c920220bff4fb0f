//! Responses produced by the server itself rather than a route.

use std::any::Any;

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::api::ApiError;

/// Fallback for requests that match no registered (method, path) pair.
pub async fn route_not_found(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::debug!(method = %method, path = %uri.path(), "No route matched");
    (StatusCode::NOT_FOUND, "No matching route found")
}

/// Turn a panic in a handler or store into a 500 JSON error.
pub fn handler_panicked(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}
