//! # API Error Type
//!
//! Unified error type for reconciliation service calls.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in Tillkeep                             │
//! │                                                                     │
//! │  ValidationError (core) ──┐                                         │
//! │                           ├──► ApiError { code, message } ──► UI    │
//! │  DbError (db) ────────────┘                                         │
//! │                                                                     │
//! │  Three codes matter to callers:                                     │
//! │    VALIDATION_ERROR  bad input; fix the request                     │
//! │    NOT_FOUND         unknown withdrawal id                          │
//! │    RETRIEVAL_ERROR   a store read failed; the whole call failed     │
//! │                                                                     │
//! │  "No data in range" is NEVER an error - an empty period returns     │
//! │  empty sequences and zero totals. Callers must be able to tell      │
//! │  empty apart from failed.                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use tillkeep_core::{CoreError, ValidationError};
use tillkeep_db::DbError;

/// API error returned from service calls.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Withdrawal not found: 999999"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown withdrawal id (404)
    NotFound,

    /// Input validation failed: non-positive amount, malformed or
    /// inverted date range, missing custom endpoint (400)
    ValidationError,

    /// An underlying store was unreachable or returned malformed data.
    /// No partial results: one failed read fails the whole call (502)
    RetrievalError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a retrieval error.
    pub fn retrieval(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::RetrievalError, message)
    }
}

/// Converts database errors to API errors.
///
/// NotFound and InvalidRange keep their identity; everything else is a
/// retrieval failure as far as callers are concerned (the details are
/// logged, not shipped).
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::InvalidRange { .. } => ApiError::validation(err.to_string()),
            DbError::UniqueViolation { field, value } => ApiError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => {
                tracing::error!(error = %err, "Store read failed");
                ApiError::retrieval("Underlying store unavailable")
            }
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::WithdrawalNotFound(id) => ApiError::not_found("Withdrawal", &id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for service operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================
