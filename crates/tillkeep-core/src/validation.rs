//! # Validation Module
//!
//! Input validation for withdrawal mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Deserialization (serde)                                   │
//! │  └── Money parse rejects floats and sub-cent precision              │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  └── amount > 0, note normalization and length                      │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── CHECK (amount_cents > 0), NOT NULL, UNIQUE constraints         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MAX_NOTE_LENGTH;

/// Validates a withdrawal amount.
///
/// ## Rules
/// - Must be strictly positive; zero and negative amounts are rejected
///   (a negative withdrawal would be a deposit, which this ledger does
///   not model)
///
/// ## Example
/// ```rust
/// use tillkeep_core::money::Money;
/// use tillkeep_core::validation::validate_withdrawal_amount;
///
/// assert!(validate_withdrawal_amount(Money::from_cents(15_000)).is_ok());
/// assert!(validate_withdrawal_amount(Money::zero()).is_err());
/// assert!(validate_withdrawal_amount(Money::from_cents(-500)).is_err());
/// ```
pub fn validate_withdrawal_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Normalizes a withdrawal note.
///
/// ## Rules
/// - Trimmed of surrounding whitespace
/// - Empty after trimming stores as `None` (NULL in the ledger)
/// - At most [`MAX_NOTE_LENGTH`] characters after trimming
pub fn normalize_note(note: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(raw) = note else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > MAX_NOTE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "note".to_string(),
            max: MAX_NOTE_LENGTH,
        });
    }

    Ok(Some(trimmed.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_must_be_strictly_positive() {
        assert!(validate_withdrawal_amount(Money::from_cents(1)).is_ok());
        assert!(validate_withdrawal_amount(Money::from_cents(15_000)).is_ok());

        assert!(matches!(
            validate_withdrawal_amount(Money::zero()),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_withdrawal_amount(Money::from_cents(-500)).is_err());
    }

    #[test]
    fn test_note_is_trimmed() {
        assert_eq!(
            normalize_note(Some("  register float  ")).unwrap(),
            Some("register float".to_string())
        );
    }

    #[test]
    fn test_empty_note_becomes_none() {
        assert_eq!(normalize_note(None).unwrap(), None);
        assert_eq!(normalize_note(Some("")).unwrap(), None);
        assert_eq!(normalize_note(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_note_length_limit() {
        let long = "x".repeat(MAX_NOTE_LENGTH + 1);
        assert!(matches!(
            normalize_note(Some(&long)),
            Err(ValidationError::TooLong { .. })
        ));

        let exactly = "x".repeat(MAX_NOTE_LENGTH);
        assert!(normalize_note(Some(&exactly)).is_ok());
    }
}
