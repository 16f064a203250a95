//! Error types for the scanner
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Message shown for failures the caller cannot act on
pub const APOLOGY: &str = "An error occurred while processing your request. Please try again later.";

// == Scan Error Enum ==
/// Unified error type for the scanner.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Chain identifier not in the supported set
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    /// Address does not match the chain's format
    #[error("Invalid address format for this chain: {0}")]
    InvalidAddress(String),

    /// Provider answered but had no data
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with current state, e.g. a duplicate favorite
    #[error("{0}")]
    Conflict(String),

    /// Outbound request failed before a response arrived
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Screenshot file could not be read
    #[error("Screenshot unavailable: {0}")]
    Screenshot(#[from] std::io::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ScanError::UnsupportedChain(_) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Unsupported chain. Supported: {}",
                    crate::models::Chain::supported_list()
                ),
            ),
            ScanError::InvalidAddress(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid address format for this chain.".to_string(),
            ),
            ScanError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ScanError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ScanError::Upstream(_) | ScanError::Decode(_) => {
                error!(error = %self, "Upstream failure while handling request");
                (StatusCode::BAD_GATEWAY, APOLOGY.to_string())
            }
            ScanError::Screenshot(_) => {
                error!(error = %self, "Screenshot could not be served");
                (StatusCode::INTERNAL_SERVER_ERROR, APOLOGY.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the scanner.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ScanError::UnsupportedChain("doge".into()), StatusCode::BAD_REQUEST),
            (ScanError::InvalidAddress("0x1".into()), StatusCode::BAD_REQUEST),
            (ScanError::NotFound("none".into()), StatusCode::NOT_FOUND),
            (ScanError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                ScanError::Screenshot(std::io::ErrorKind::PermissionDenied.into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_decode_error_is_bad_gateway() {
        let err: ScanError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
