//! Error Types for the TKD Mock API
//!
//! Every error a handler can surface maps to one wire code serialized as
//! `{"error": <code>}` with the matching HTTP status. Store failures that
//! the client cannot act on (poisoned lock, snapshot write) collapse to
//! `internal_error`; the detail goes to the log, not the wire.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tkd_core::StoreError;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Wire error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Request body is not parsable JSON
    InvalidJson,

    /// Unknown path or method combination
    NotFound,

    /// Timeline lookup for an unknown assertion id
    AssertionNotFound,

    /// Store failure the client cannot act on
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidJson => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound | ErrorCode::AssertionNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub code: ErrorCode,

    /// The assertion id a not-found lookup was for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_id: Option<String>,
}

impl ApiError {
    pub fn invalid_json() -> Self {
        Self {
            code: ErrorCode::InvalidJson,
            assertion_id: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            code: ErrorCode::NotFound,
            assertion_id: None,
        }
    }

    pub fn assertion_not_found(assertion_id: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::AssertionNotFound,
            assertion_id: Some(assertion_id.into()),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            code: ErrorCode::InternalError,
            assertion_id: None,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.assertion_id {
            Some(id) => write!(f, "{} ({})", self.code, id),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AssertionNotFound { assertion_id } => {
                ApiError::assertion_not_found(assertion_id)
            }
            other => {
                tracing::error!(error = %other, "store operation failed");
                ApiError::internal_error()
            }
        }
    }
}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// TESTS
// =============================================================================
