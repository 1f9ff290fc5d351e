//! Platform Error Types
//!
//! Two tiers: store-classified errors carry a numeric code and message that
//! callers see verbatim; everything else is unclassified and only ever shown
//! to callers as a fixed generic failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Numeric error codes shared with Parse-compatible clients.
pub mod codes {
    pub const OTHER_CAUSE: i32 = -1;
    pub const INTERNAL_SERVER_ERROR: i32 = 1;
    /// Also returned for a rejected login.
    pub const OBJECT_NOT_FOUND: i32 = 101;
    pub const INVALID_CLASS_NAME: i32 = 103;
    pub const INVALID_KEY_NAME: i32 = 105;
    pub const INVALID_JSON: i32 = 107;
    pub const SCRIPT_FAILED: i32 = 141;
    pub const VALIDATION_ERROR: i32 = 142;
    pub const USERNAME_MISSING: i32 = 200;
    pub const PASSWORD_MISSING: i32 = 201;
    pub const TEST_CLASS_LOCKED: i32 = 9001;

    /// Envelope code for unclassified failures.
    pub const UNEXPECTED: i32 = 500;
}

#[derive(Error, Debug)]
pub enum PlatformError {
    /// Rejected credentials or malformed login input
    #[error("{message}")]
    Auth { code: i32, message: String },

    /// Input or trigger validation failure
    #[error("{message}")]
    Validation { code: i32, message: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn auth(code: i32, message: impl Into<String>) -> Self {
        Self::Auth { code, message: message.into() }
    }

    pub fn validation(code: i32, message: impl Into<String>) -> Self {
        Self::Validation { code, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    pub fn invalid_login() -> Self {
        Self::auth(codes::OBJECT_NOT_FOUND, "Invalid username/password.")
    }

    pub fn script_failed(message: impl Into<String>) -> Self {
        Self::validation(codes::SCRIPT_FAILED, message)
    }

    /// Code and message for store-classified errors, `None` otherwise.
    pub fn classified(&self) -> Option<(i32, &str)> {
        match self {
            Self::Auth { code, message } | Self::Validation { code, message } => {
                Some((*code, message.as_str()))
            }
            _ => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.classified().is_some()
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// REST error body: `{"code": 142, "error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub error: String,
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let (status, body) = match self.classified() {
            Some((code, message)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse { code, error: message.to_string() },
            ),
            None => {
                error!(error = %self, "Unclassified failure in request handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        code: codes::INTERNAL_SERVER_ERROR,
                        error: "Internal server error.".to_string(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err = PlatformError::invalid_login();
        assert_eq!(err.classified(), Some((101, "Invalid username/password.")));
        assert_eq!(err.to_string(), "Invalid username/password.");

        let err = PlatformError::internal("socket closed");
        assert!(!err.is_classified());
    }

    #[test]
    fn test_status_mapping() {
        let response = PlatformError::validation(codes::VALIDATION_ERROR, "bad").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = PlatformError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
