//! # Balance Repository
//!
//! Read path for per-operator, per-day register snapshots, plus the
//! ingestion point used by the close-out process.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  POS close-out (external) ──► record_close_out() ──► row written    │
//! │                                                                     │
//! │  Reconciliation ──► list_in_range() ──► immutable snapshots         │
//! │                                                                     │
//! │  There is NO update or delete: a close-out row never changes once   │
//! │  written, and UNIQUE(operator_id, entry_date) caps it at one per    │
//! │  operator-day.                                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::ensure_range;
use tillkeep_core::{BalanceEntry, Money};

/// Repository for balance close-out snapshots.
#[derive(Debug, Clone)]
pub struct BalanceRepository {
    pool: SqlitePool,
}

impl BalanceRepository {
    /// Creates a new BalanceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BalanceRepository { pool }
    }

    /// Lists all operators' snapshots within `[start, end]` inclusive.
    ///
    /// Side-effect-free. Ordering (date, then operator) is for stable
    /// output only; the aggregator doesn't depend on it.
    pub async fn list_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<BalanceEntry>> {
        ensure_range(start, end)?;

        let entries: Vec<BalanceEntry> = sqlx::query_as(
            r#"
            SELECT
                id,
                operator_id,
                entry_date,
                opening_cents    AS opening,
                cash_total_cents AS cash_total,
                card_total_cents AS card_total,
                closing_cents    AS closing,
                created_at
            FROM balance_entries
            WHERE entry_date BETWEEN ?1 AND ?2
            ORDER BY entry_date, operator_id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Records a close-out snapshot for one operator-day.
    ///
    /// ## Arguments
    /// * `operator_id` - the register operator
    /// * `entry_date`  - calendar date of the close-out
    /// * `opening`/`cash_total`/`card_total` - drawer movements
    /// * `closing` - counted drawer amount as reported by the register;
    ///   stored as-is, even when it disagrees with the movements
    ///
    /// ## Errors
    /// `UniqueViolation` when a snapshot already exists for this
    /// operator-day.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_close_out(
        &self,
        operator_id: &str,
        entry_date: NaiveDate,
        opening: Money,
        cash_total: Money,
        card_total: Money,
        closing: Money,
    ) -> DbResult<BalanceEntry> {
        let entry = BalanceEntry {
            id: Uuid::new_v4().to_string(),
            operator_id: operator_id.to_string(),
            entry_date,
            opening,
            cash_total,
            card_total,
            closing,
            created_at: Utc::now(),
        };

        debug!(id = %entry.id, operator_id = %entry.operator_id, date = %entry.entry_date, "Recording close-out");

        sqlx::query(
            r#"
            INSERT INTO balance_entries (
                id, operator_id, entry_date,
                opening_cents, cash_total_cents, card_total_cents, closing_cents,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.operator_id)
        .bind(entry.entry_date)
        .bind(entry.opening)
        .bind(entry.cash_total)
        .bind(entry.card_total)
        .bind(entry.closing)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Counts all snapshots (used by the seed tool's idempotence check).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM balance_entries")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use tillkeep_core::money::Money;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_bounds_are_inclusive() {
        let db = test_db().await;
        let repo = db.balances();

        for day in [1, 4, 8] {
            repo.record_close_out(
                "op-a",
                date(day),
                Money::from_cents(5_000),
                Money::from_cents(10_000),
                Money::from_cents(2_000),
                Money::from_cents(17_000),
            )
            .await
            .unwrap();
        }

        let all = repo.list_in_range(date(1), date(8)).await.unwrap();
        assert_eq!(all.len(), 3);

        // Both endpoints included
        let edges = repo.list_in_range(date(4), date(8)).await.unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].entry_date, date(4));
        assert_eq!(edges[1].entry_date, date(8));

        let none = repo.list_in_range(date(9), date(31)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_money_round_trips_through_storage() {
        let db = test_db().await;
        let repo = db.balances();

        repo.record_close_out(
            "op-a",
            date(1),
            Money::from_cents(5_001),
            Money::from_cents(9_999),
            Money::from_cents(0),
            Money::from_cents(15_100),
        )
        .await
        .unwrap();

        let entries = repo.list_in_range(date(1), date(1)).await.unwrap();
        assert_eq!(entries[0].opening.cents(), 5_001);
        assert_eq!(entries[0].cash_total.cents(), 9_999);
        assert_eq!(entries[0].card_total.cents(), 0);
        assert_eq!(entries[0].closing.cents(), 15_100);
    }

    #[tokio::test]
    async fn test_one_close_out_per_operator_day() {
        let db = test_db().await;
        let repo = db.balances();

        let zero = Money::zero();
        repo.record_close_out("op-a", date(1), zero, zero, zero, zero)
            .await
            .unwrap();

        let err = repo
            .record_close_out("op-a", date(1), zero, zero, zero, zero)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::DbError::UniqueViolation { .. }));

        // Different day or operator is fine
        repo.record_close_out("op-a", date(2), zero, zero, zero, zero)
            .await
            .unwrap();
        repo.record_close_out("op-b", date(1), zero, zero, zero, zero)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let db = test_db().await;

        let err = db
            .balances()
            .list_in_range(date(8), date(1))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::DbError::InvalidRange { .. }));
    }
}
