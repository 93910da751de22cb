//! # Repository Module
//!
//! Repository implementations for database operations.
//!
//! ## Repository Pattern
//! Each repository owns the SQL for one data source and exposes typed
//! async methods. Repositories are cheap to create (they clone the pool
//! handle) so the `Database` accessor methods construct them on demand.
//!
//! ## Available Repositories
//! - [`balance::BalanceRepository`] - close-out snapshots (read + ingest)
//! - [`withdrawal::WithdrawalRepository`] - the mutable withdrawal ledger
//! - [`invoice::InvoiceRepository`] - invoice rollups (sales summaries)
//! - [`directory::DirectoryRepository`] - staff display-name lookups

use chrono::NaiveDate;

use crate::error::{DbError, DbResult};

pub mod balance;
pub mod directory;
pub mod invoice;
pub mod withdrawal;

/// Rejects inverted date ranges before any SQL runs.
///
/// Every period reader calls this: the period resolver hands custom
/// ranges through unvalidated, so enforcement lives with the reads.
pub(crate) fn ensure_range(start: NaiveDate, end: NaiveDate) -> DbResult<()> {
    if start > end {
        return Err(DbError::InvalidRange { start, end });
    }
    Ok(())
}
