//! # Domain Types
//!
//! Core domain types used throughout Tillkeep.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  Source data (read from storage)                                    │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐     │
//! │  │  BalanceEntry   │  │   Withdrawal    │  │    Invoice      │     │
//! │  │  ─────────────  │  │  ─────────────  │  │  ─────────────  │     │
//! │  │  operator_id    │  │  admin_id       │  │  tender         │     │
//! │  │  entry_date     │  │  amount         │  │  total          │     │
//! │  │  opening        │  │  note           │  │  invoice_date   │     │
//! │  │  closing        │  │  withdrawn_on   │  └─────────────────┘     │
//! │  └─────────────────┘  └─────────────────┘                          │
//! │                                                                     │
//! │  Derived data (computed per request, never stored)                  │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐     │
//! │  │  SalesSummary   │  │ OperatorTotals  │  │  PeriodTotals   │     │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every stored entity has a UUID v4 `id` used for relations; operator and
//! admin ids are opaque references into the staff directory and resolve to
//! display names only at presentation time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Staff & Identity
// =============================================================================

/// Role of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(rename_all = "lowercase"))]
pub enum StaffRole {
    /// Store owner; full back-office access.
    Owner,
    /// Shift manager; may record withdrawals.
    Manager,
    /// Register operator; appears in per-operator breakdowns.
    Cashier,
}

/// The authenticated identity attached to every mutating call.
///
/// Supplied by the auth service (an external collaborator). This subsystem
/// trusts it and performs no authorization logic of its own beyond
/// requiring one to exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    /// Id of the authenticated admin (references the staff directory).
    pub admin_id: String,

    /// Role as asserted by the auth service.
    pub role: StaffRole,
}

// =============================================================================
// Balance Entries
// =============================================================================

/// One operator's register snapshot for one day.
///
/// Written once per operator per day by the close-out process and immutable
/// afterwards - there is no update or delete path in this subsystem.
///
/// `closing` is reported independently by the register and is NOT required
/// to equal `opening + cash_total + card_total`; the aggregator surfaces
/// the difference as a variance but never auto-corrects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BalanceEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Operator this snapshot belongs to.
    pub operator_id: String,

    /// Calendar date of the snapshot.
    pub entry_date: NaiveDate,

    /// Cash in the drawer at shift open.
    pub opening: Money,

    /// Cash tender taken during the day.
    pub cash_total: Money,

    /// Card tender taken during the day.
    pub card_total: Money,

    /// Counted drawer amount at close, as reported by the register.
    pub closing: Money,

    /// When the close-out row was recorded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Withdrawals
// =============================================================================

/// A single cash removal from the register.
///
/// `amount` is strictly positive. `admin_id`, `created_at`, and
/// `withdrawn_on` are assigned at creation and never change; an update may
/// only touch `amount` and `note`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Withdrawal {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Admin who recorded the withdrawal.
    pub admin_id: String,

    /// Amount removed from the register (> 0).
    pub amount: Money,

    /// Optional note; trimmed on input, empty notes are stored as NULL.
    pub note: Option<String>,

    /// When the withdrawal was recorded. Immutable across updates.
    pub created_at: DateTime<Utc>,

    /// Calendar date of `created_at`. This is the key used for period
    /// filtering and summary-cache invalidation.
    pub withdrawn_on: NaiveDate,
}

// =============================================================================
// Invoices
// =============================================================================

/// How an invoice was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(rename_all = "lowercase"))]
pub enum TenderType {
    Cash,
    Card,
    /// Vouchers, store credit, anything that is neither cash nor card.
    /// Counted in `invoice_count` but excluded from both sales buckets.
    Other,
}

/// A row of the invoice rollup source.
///
/// Owned by the invoice store; this subsystem only ingests and aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Calendar date the invoice was issued.
    pub invoice_date: NaiveDate,

    /// Payment method.
    pub tender: TenderType,

    /// Invoice total.
    pub total: Money,

    /// When the row was ingested.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Derived Aggregates
// =============================================================================

/// Invoice-sourced period aggregate. Recomputed on every query from the
/// invoice store; never persisted by this subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Sum of cash-tender invoice totals.
    pub cash_total: Money,

    /// Sum of card-tender invoice totals.
    pub card_total: Money,

    /// `cash_total + card_total`, exact under integer-cents arithmetic.
    pub total_sales: Money,

    /// Number of invoices in the period, any tender.
    pub invoice_count: i64,
}

impl SalesSummary {
    /// An empty period: zero sales, zero invoices.
    pub fn empty() -> Self {
        SalesSummary {
            cash_total: Money::zero(),
            card_total: Money::zero(),
            total_sales: Money::zero(),
            invoice_count: 0,
        }
    }
}

/// Balance totals for one operator across the period.
///
/// Same shape as the balance-derived part of [`PeriodTotals`]; the sum of
/// every field across all operators equals the corresponding period field
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorTotals {
    /// Operator these totals belong to.
    pub operator_id: String,

    pub opening: Money,
    pub cash_total: Money,
    pub card_total: Money,
    pub closing: Money,

    /// `closing - (opening + cash_total + card_total)`.
    ///
    /// Non-zero variance means the reported close-out disagrees with the
    /// recorded movements. Surfaced for the back office to chase, never
    /// auto-corrected.
    pub variance: Money,
}

/// Period-wide totals: the aggregator's headline output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub opening: Money,
    pub cash_total: Money,
    pub card_total: Money,
    pub closing: Money,

    /// Sum of per-operator variances.
    pub variance: Money,

    /// Sum of withdrawal amounts in the period.
    pub withdrawal_total: Money,

    /// `sales.cash_total - withdrawal_total`. The one figure users match
    /// against physical cash in the drawer; recomputed on every query,
    /// never served stale across a withdrawal mutation.
    pub net_cash: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
