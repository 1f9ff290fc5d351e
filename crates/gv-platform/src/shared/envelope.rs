//! Success/error envelope returned by every cloud function.
//!
//! Serialized as `{"status": "success", ...payload}` or
//! `{"status": "error", "code": 101, "message": "..."}`.

use serde::Serialize;
use tracing::error;

use super::error::{codes, PlatformError};

/// Message shown for any unclassified failure.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    pub message: String,
}

/// `T` must serialize as a map (a struct with named fields).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success(T),
    Error(ErrorBody),
}

impl<T> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Self::Success(payload)
    }

    /// Error envelope without a code
    pub fn message(message: impl Into<String>) -> Self {
        Self::Error(ErrorBody {
            code: None,
            message: message.into(),
        })
    }

    /// Classified errors pass through; anything else becomes the generic
    /// failure and the cause is only logged.
    pub fn from_error(err: &PlatformError) -> Self {
        match err.classified() {
            Some((code, message)) => Self::Error(ErrorBody {
                code: Some(code),
                message: message.to_string(),
            }),
            None => {
                error!(error = %err, "Unclassified failure converted to generic error");
                Self::Error(ErrorBody {
                    code: Some(codes::UNEXPECTED),
                    message: UNEXPECTED_MESSAGE.to_string(),
                })
            }
        }
    }

    pub fn from_result(result: super::error::Result<T>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Error(body) => Some(body),
            Self::Success(_) => None,
        }
    }
}
