//! # tillkeep-db: Database Layer for Tillkeep
//!
//! This crate provides database access for the Tillkeep reconciliation
//! engine. It uses SQLite for local storage with sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Tillkeep Data Flow                             │
//! │                                                                     │
//! │  ReconciliationService (tillkeep-recon)                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  tillkeep-db (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │  ┌────────────┐  ┌──────────────────┐  ┌───────────────┐   │   │
//! │  │  │  Database  │  │   Repositories   │  │  Migrations   │   │   │
//! │  │  │ (pool.rs)  │  │ balance.rs       │  │  (embedded)   │   │   │
//! │  │  │            │◄─│ withdrawal.rs    │  │ 001_init.sql  │   │   │
//! │  │  │ SqlitePool │  │ invoice.rs       │  │               │   │   │
//! │  │  │            │  │ directory.rs     │  │               │   │   │
//! │  │  └────────────┘  └──────────────────┘  └───────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │                SQLite Database (WAL mode)                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations per data source
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tillkeep_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/db.sqlite")).await?;
//! let entries = db.balances().list_in_range(start, end).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::balance::BalanceRepository;
pub use repository::directory::DirectoryRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::withdrawal::WithdrawalRepository;
