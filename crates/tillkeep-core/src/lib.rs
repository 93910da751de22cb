//! # tillkeep-core: Pure Business Logic for Tillkeep
//!
//! This crate is the **heart** of Tillkeep's cash reconciliation. It
//! contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Tillkeep Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │               tillkeep-recon (Service Layer)                │   │
//! │  │   summary, create/update/delete withdrawal, summary cache   │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ tillkeep-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌────────────────┐  │   │
//! │  │  │  money  │ │ period  │ │ reconcile │ │   validation   │  │   │
//! │  │  │  Money  │ │ ranges  │ │  combine  │ │ amount / note  │  │   │
//! │  │  └─────────┘ └─────────┘ └───────────┘ └────────────────┘  │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS          │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                 tillkeep-db (Database Layer)                │   │
//! │  │          SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BalanceEntry, Withdrawal, SalesSummary, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`period`] - Reporting-period resolution
//! - [`reconcile`] - Pure aggregation into operator/period totals
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; even "today" is a
//!    parameter, never a clock read
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), serialized
//!    as fixed-point decimal strings
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod period;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tillkeep_core::Money` instead of
// `use tillkeep_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use period::{DateRange, PeriodSelection};
pub use reconcile::{combine, ReconciliationReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a withdrawal note, in characters.
///
/// ## Business Reason
/// Notes are free text shown in the reconciliation table; a bound keeps
/// pathological input out of the ledger. Matches the column sizing used
/// by the admin dashboard.
pub const MAX_NOTE_LENGTH: usize = 500;
