//! # tillkeep-recon: Reconciliation Service for Tillkeep
//!
//! The caller-facing layer of the reconciliation subsystem: period
//! summaries, the withdrawal mutation surface, and the consistency
//! machinery that keeps the two honest with each other.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Callers (dashboard UI, other services)                 │
//! │       summary │ create/update/delete withdrawal                     │
//! └───────────────┼─────────────────────────────────────────────────────┘
//!                 │
//! ┌───────────────▼─────────────────────────────────────────────────────┐
//! │               tillkeep-recon (THIS CRATE)                           │
//! │                                                                     │
//! │  ┌──────────────┐   ┌───────────────┐   ┌──────────────────────┐   │
//! │  │  service.rs  │   │   cache.rs    │   │      error.rs        │   │
//! │  │ orchestrate  │◄──│ range-keyed,  │   │  ApiError + codes    │   │
//! │  │ + decorate   │   │ overlap-evict │   │                      │   │
//! │  └──────────────┘   └───────────────┘   └──────────────────────┘   │
//! └───────────────┬─────────────────────────────────────────────────────┘
//!                 │
//!        tillkeep-core (math) + tillkeep-db (storage)
//! ```
//!
//! ## The One Rule That Matters
//! `net_cash` is matched against physical cash in the drawer. Any cached
//! summary covering a mutated withdrawal's date is evicted before the
//! mutation is acknowledged, and an in-flight summary computation that
//! was overtaken by a mutation is never cached. Stale is a bug, not a
//! performance trade-off.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod error;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::SummaryCache;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use service::{
    OperatorRow, ReconciliationService, SummaryResponse, WithdrawalRequest, WithdrawalRow,
};
