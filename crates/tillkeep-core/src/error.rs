//! # Error Types
//!
//! Domain-specific error types for tillkeep-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  tillkeep-core errors (this file)                                   │
//! │  ├── CoreError        - General domain errors                       │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  tillkeep-db errors (separate crate)                                │
//! │  └── DbError          - Retrieval / storage failures                │
//! │                                                                     │
//! │  tillkeep-recon errors (service crate)                              │
//! │  └── ApiError         - What callers see (serialized)               │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Caller    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, field, range)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::ParseMoneyError;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Withdrawal cannot be found.
    ///
    /// ## When This Occurs
    /// - Withdrawal id doesn't exist in the ledger
    /// - Withdrawal was deleted by a concurrent admin session
    #[error("Withdrawal not found: {0}")]
    WithdrawalNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements. Used for early
/// validation before any storage work runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    ///
    /// Covers the custom-period contract: selecting a custom period without
    /// both endpoints fails here, before any ledger read is issued.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    ///
    /// ## When This Occurs
    /// - Recording or editing a withdrawal with amount <= 0
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable amount or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl From<ParseMoneyError> for ValidationError {
    fn from(err: ParseMoneyError) -> Self {
        ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::WithdrawalNotFound("w-123".to_string());
        assert_eq!(err.to_string(), "Withdrawal not found: w-123");

        let err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "customStart".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_parse_money_error_converts() {
        let parse_err = "junk".parse::<crate::money::Money>().unwrap_err();
        let validation_err: ValidationError = parse_err.into();
        assert!(matches!(
            validation_err,
            ValidationError::InvalidFormat { .. }
        ));
    }
}
