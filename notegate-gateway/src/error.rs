//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors that surface as non-200 HTTP responses.
///
/// User-correctable submission problems (bad position code, failed
/// integrity check, over-length message) are not here: those are
/// answered `200` with an ephemeral message, per the interactions
/// contract.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Missing headers or a signature that does not verify.
    #[error("invalid request signature")]
    Unauthorized,

    /// The body is not a parseable interaction object.
    #[error("malformed interaction payload: {0}")]
    MalformedInteraction(String),

    /// A discriminant or modal this webhook does not serve.
    #[error("unsupported interaction: {0}")]
    Unsupported(String),

    /// The note store rejected the write.
    #[error("store error: {0}")]
    Store(#[from] notegate_store::StoreError),

    /// A blocking store task was cancelled or panicked.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::MalformedInteraction(_) | GatewayError::Unsupported(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Store(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
