//! # Reconciliation Service
//!
//! The caller-facing operations: period summaries and the withdrawal
//! mutation surface.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  summary(start, end)                                                │
//! │       │                                                             │
//! │       ├── cache hit? ──► return cached response                     │
//! │       │                                                             │
//! │       ▼ miss                                                        │
//! │  snapshot cache generation                                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  tokio::join! ─┬─ balances.list_in_range()                          │
//! │   (concurrent) ├─ withdrawals.list_in_range()                       │
//! │                └─ invoices.summarize()                              │
//! │       │                                                             │
//! │       │   any failure fails the whole call - no partial results     │
//! │       ▼                                                             │
//! │  combine() ──► decorate names ──► store_if_current ──► respond      │
//! │                                                                     │
//! │  create/update/delete withdrawal                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  validate ──► write ──► invalidate_date(withdrawn_on) ──► ACK       │
//! │  (eviction strictly precedes the acknowledgement: the mutating      │
//! │   caller can never read a summary that predates its own write)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Directory names are presentation decoration only: a missing staff row
//! - or a failed directory read - falls back to the raw id and never
//! fails a summary.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tillkeep_core::validation::{normalize_note, validate_withdrawal_amount};
use tillkeep_core::{
    combine, AdminIdentity, CoreError, DateRange, Money, OperatorTotals, PeriodSelection,
    PeriodTotals, Withdrawal,
};
use tillkeep_db::Database;

use crate::cache::SummaryCache;
use crate::error::ApiResult;

// =============================================================================
// Wire Types
// =============================================================================

/// Body of a withdrawal create or update call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    /// Decimal-string amount, e.g. `"150.00"`. Must be strictly positive.
    pub amount: Money,

    /// Optional note; trimmed, empty stores as null.
    pub note: Option<String>,
}

/// A withdrawal as shown in the reconciliation table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRow {
    pub id: String,
    pub admin_id: String,

    /// Display name from the staff directory; the raw id when unresolved.
    pub admin_name: String,

    pub amount: Money,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub withdrawn_on: NaiveDate,
}

/// One row of the per-operator breakdown table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorRow {
    pub operator_id: String,

    /// Display name from the staff directory; the raw id when unresolved.
    pub operator_name: String,

    pub opening: Money,
    pub cash_total: Money,
    pub card_total: Money,
    pub closing: Money,
    pub variance: Money,
}

/// Response of the summary operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Per-operator breakdown, one entry per operator with balance rows
    /// in the period.
    pub operator_totals: Vec<OperatorRow>,

    /// Period-wide totals including withdrawal_total and net_cash.
    pub period_totals: PeriodTotals,

    /// The period's withdrawals, most recent first.
    pub withdrawals: Vec<WithdrawalRow>,
}

// =============================================================================
// Service
// =============================================================================

/// The reconciliation service.
///
/// Explicitly constructed with its database handle; owns its summary
/// cache. Cloning shares both (the clone serves the same cache), which
/// is what a multi-session dashboard wants.
#[derive(Debug, Clone)]
pub struct ReconciliationService {
    db: Database,
    cache: Arc<SummaryCache<SummaryResponse>>,
}

impl ReconciliationService {
    /// Creates a service over the given database.
    pub fn new(db: Database) -> Self {
        ReconciliationService {
            db,
            cache: Arc::new(SummaryCache::new()),
        }
    }

    // -------------------------------------------------------------------------
    // Summary (read path)
    // -------------------------------------------------------------------------

    /// Builds the reconciliation summary for `[start, end]` inclusive.
    ///
    /// The three source reads run concurrently; a failure in any of them
    /// fails the whole call (callers must never mistake a half-loaded
    /// summary for a complete one). An empty period is a valid, empty
    /// response - not an error.
    pub async fn summary(&self, start: NaiveDate, end: NaiveDate) -> ApiResult<SummaryResponse> {
        let range = DateRange::new(start, end);

        if let Some(cached) = self.cache.get(range).await {
            debug!(%range, "Summary cache hit");
            return Ok((*cached).clone());
        }

        // Snapshot before the reads: if a mutation lands while they are
        // in flight, this computation must not enter the cache.
        let generation = self.cache.generation();

        let balance_repo = self.db.balances();
        let withdrawal_repo = self.db.withdrawals();
        let invoice_repo = self.db.invoices();

        let (balances, withdrawals, sales) = tokio::join!(
            balance_repo.list_in_range(start, end),
            withdrawal_repo.list_in_range(start, end),
            invoice_repo.summarize(start, end),
        );
        let balances = balances?;
        let withdrawals = withdrawals?;
        let sales = sales?;

        let report = combine(&balances, &withdrawals, &sales);

        let names = self.display_names().await;
        let response = SummaryResponse {
            operator_totals: report
                .operator_totals
                .into_iter()
                .map(|totals| operator_row(totals, &names))
                .collect(),
            period_totals: report.period_totals,
            withdrawals: withdrawals
                .into_iter()
                .map(|withdrawal| withdrawal_row(withdrawal, &names))
                .collect(),
        };

        let stored = self
            .cache
            .store_if_current(range, Arc::new(response.clone()), generation)
            .await;
        debug!(%range, stored, "Summary computed");

        Ok(response)
    }

    /// Resolves a period selection against `today`, then summarizes it.
    pub async fn summary_for(
        &self,
        selection: PeriodSelection,
        today: NaiveDate,
    ) -> ApiResult<SummaryResponse> {
        let range = selection.resolve(today)?;
        self.summary(range.start, range.end).await
    }

    // -------------------------------------------------------------------------
    // Withdrawal mutations (write path)
    // -------------------------------------------------------------------------

    /// Records a new withdrawal for the authenticated admin.
    pub async fn create_withdrawal(
        &self,
        identity: &AdminIdentity,
        request: WithdrawalRequest,
    ) -> ApiResult<WithdrawalRow> {
        validate_withdrawal_amount(request.amount)?;
        let note = normalize_note(request.note.as_deref())?;

        let withdrawal = self
            .db
            .withdrawals()
            .create(&identity.admin_id, request.amount, note)
            .await?;

        let evicted = self.cache.invalidate_date(withdrawal.withdrawn_on).await;
        info!(
            id = %withdrawal.id,
            admin_id = %identity.admin_id,
            amount = %withdrawal.amount,
            evicted,
            "Withdrawal recorded"
        );

        Ok(self.decorated_row(withdrawal).await)
    }

    /// Updates a withdrawal's amount and note.
    ///
    /// `admin_id` and `created_at` are immutable; the identity is required
    /// (auth is upstream) but the recorded admin never changes.
    pub async fn update_withdrawal(
        &self,
        identity: &AdminIdentity,
        id: &str,
        request: WithdrawalRequest,
    ) -> ApiResult<WithdrawalRow> {
        validate_withdrawal_amount(request.amount)?;
        let note = normalize_note(request.note.as_deref())?;

        let repo = self.db.withdrawals();
        let existing = repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::WithdrawalNotFound(id.to_string()))?;

        repo.update(id, request.amount, note.clone()).await?;

        let evicted = self.cache.invalidate_date(existing.withdrawn_on).await;
        info!(
            id = %id,
            admin_id = %identity.admin_id,
            amount = %request.amount,
            evicted,
            "Withdrawal updated"
        );

        let updated = Withdrawal {
            amount: request.amount,
            note,
            ..existing
        };
        Ok(self.decorated_row(updated).await)
    }

    /// Deletes a withdrawal permanently.
    pub async fn delete_withdrawal(&self, identity: &AdminIdentity, id: &str) -> ApiResult<()> {
        let repo = self.db.withdrawals();
        let existing = repo
            .get(id)
            .await?
            .ok_or_else(|| CoreError::WithdrawalNotFound(id.to_string()))?;

        repo.delete(id).await?;

        let evicted = self.cache.invalidate_date(existing.withdrawn_on).await;
        info!(
            id = %id,
            admin_id = %identity.admin_id,
            amount = %existing.amount,
            evicted,
            "Withdrawal deleted"
        );

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Name decoration
    // -------------------------------------------------------------------------

    /// Bulk display-name map. A directory failure degrades to raw ids -
    /// decoration must never fail a summary.
    async fn display_names(&self) -> HashMap<String, String> {
        match self.db.directory().display_names().await {
            Ok(names) => names,
            Err(err) => {
                warn!(error = %err, "Directory read failed; falling back to raw ids");
                HashMap::new()
            }
        }
    }

    /// Decorates a single withdrawal with its admin's display name.
    async fn decorated_row(&self, withdrawal: Withdrawal) -> WithdrawalRow {
        let admin_name = match self.db.directory().resolve_name(&withdrawal.admin_id).await {
            Ok(Some(name)) => name,
            Ok(None) => withdrawal.admin_id.clone(),
            Err(err) => {
                warn!(error = %err, "Directory lookup failed; falling back to raw id");
                withdrawal.admin_id.clone()
            }
        };

        WithdrawalRow {
            id: withdrawal.id,
            admin_id: withdrawal.admin_id,
            admin_name,
            amount: withdrawal.amount,
            note: withdrawal.note,
            created_at: withdrawal.created_at,
            withdrawn_on: withdrawal.withdrawn_on,
        }
    }
}

// =============================================================================
// Row Builders
// =============================================================================

fn resolve(names: &HashMap<String, String>, id: &str) -> String {
    names
        .get(id)
        .cloned()
        .unwrap_or_else(|| id.to_string())
}

fn operator_row(totals: OperatorTotals, names: &HashMap<String, String>) -> OperatorRow {
    let operator_name = resolve(names, &totals.operator_id);
    OperatorRow {
        operator_id: totals.operator_id,
        operator_name,
        opening: totals.opening,
        cash_total: totals.cash_total,
        card_total: totals.card_total,
        closing: totals.closing,
        variance: totals.variance,
    }
}

fn withdrawal_row(withdrawal: Withdrawal, names: &HashMap<String, String>) -> WithdrawalRow {
    let admin_name = resolve(names, &withdrawal.admin_id);
    WithdrawalRow {
        id: withdrawal.id,
        admin_id: withdrawal.admin_id,
        admin_name,
        amount: withdrawal.amount,
        note: withdrawal.note,
        created_at: withdrawal.created_at,
        withdrawn_on: withdrawal.withdrawn_on,
    }
}
