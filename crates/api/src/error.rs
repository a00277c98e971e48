//! API error type producing the uniform failure envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orders::OrderError;

/// An operation failure reported to the caller.
///
/// Collaborator failures are logged server-side with their detail; the
/// caller only ever receives the operation's generic message in the
/// standard `{success:false, message}` envelope.
#[derive(Debug)]
pub struct ApiError {
    message: &'static str,
    detail: String,
}

impl ApiError {
    /// Wraps a service error under an operation-specific message.
    pub fn internal(message: &'static str, source: OrderError) -> Self {
        Self {
            message,
            detail: source.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.detail, "{}", self.message);

        let body = serde_json::json!({ "success": false, "message": self.message });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
