//! # Withdrawal Repository
//!
//! The mutable withdrawal ledger: the only write path in the
//! reconciliation subsystem.
//!
//! ## Withdrawal Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Withdrawal Lifecycle                             │
//! │                                                                     │
//! │  1. CREATE                                                          │
//! │     └── create(admin_id, amount, note) → Withdrawal                 │
//! │         id, created_at, withdrawn_on assigned here, once            │
//! │                                                                     │
//! │  2. (OPTIONAL) UPDATE                                               │
//! │     └── update(id, amount, note) → amount/note only                 │
//! │         admin_id, created_at, withdrawn_on never change             │
//! │                                                                     │
//! │  3. (OPTIONAL) DELETE                                               │
//! │     └── delete(id) → permanent; no soft-delete, no recovery         │
//! │                                                                     │
//! │  Every successful mutation must be followed by summary-cache        │
//! │  invalidation for withdrawn_on - the service layer owns that.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::ensure_range;
use tillkeep_core::{Money, Withdrawal};

/// Repository for withdrawal ledger operations.
#[derive(Debug, Clone)]
pub struct WithdrawalRepository {
    pool: SqlitePool,
}

impl WithdrawalRepository {
    /// Creates a new WithdrawalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WithdrawalRepository { pool }
    }

    /// Lists withdrawals whose date falls within `[start, end]` inclusive,
    /// ordered by `created_at` **descending**.
    ///
    /// Most-recent-first is a user-facing contract - the reconciliation
    /// table shows the latest withdrawal at the top - not an accident of
    /// the query plan.
    pub async fn list_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Withdrawal>> {
        ensure_range(start, end)?;

        let withdrawals: Vec<Withdrawal> = sqlx::query_as(
            r#"
            SELECT
                id,
                admin_id,
                amount_cents AS amount,
                note,
                created_at,
                withdrawn_on
            FROM withdrawals
            WHERE withdrawn_on BETWEEN ?1 AND ?2
            ORDER BY created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(withdrawals)
    }

    /// Sums withdrawal amounts for a period.
    ///
    /// The authoritative ledger-side total; the aggregator's
    /// `withdrawal_total` must always agree with it.
    pub async fn total_in_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Money> {
        ensure_range(start, end)?;

        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)
            FROM withdrawals
            WHERE withdrawn_on BETWEEN ?1 AND ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// Fetches a withdrawal by id.
    pub async fn get(&self, id: &str) -> DbResult<Option<Withdrawal>> {
        let withdrawal: Option<Withdrawal> = sqlx::query_as(
            r#"
            SELECT
                id,
                admin_id,
                amount_cents AS amount,
                note,
                created_at,
                withdrawn_on
            FROM withdrawals
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(withdrawal)
    }

    /// Creates a new withdrawal recorded by `admin_id`.
    ///
    /// Amount validation (strictly positive) and note normalization happen
    /// in the service layer before this is called; the CHECK constraint is
    /// the final backstop.
    pub async fn create(
        &self,
        admin_id: &str,
        amount: Money,
        note: Option<String>,
    ) -> DbResult<Withdrawal> {
        let created_at = Utc::now();
        let withdrawal = Withdrawal {
            id: Uuid::new_v4().to_string(),
            admin_id: admin_id.to_string(),
            amount,
            note,
            created_at,
            withdrawn_on: created_at.date_naive(),
        };

        self.insert(&withdrawal).await?;

        Ok(withdrawal)
    }

    /// Inserts a fully-formed withdrawal row.
    ///
    /// Used by [`create`](Self::create) and by tests that need explicit
    /// timestamps; production callers go through `create`.
    pub async fn insert(&self, withdrawal: &Withdrawal) -> DbResult<()> {
        debug!(id = %withdrawal.id, admin_id = %withdrawal.admin_id, amount = %withdrawal.amount, "Inserting withdrawal");

        sqlx::query(
            r#"
            INSERT INTO withdrawals (
                id, admin_id, amount_cents, note, created_at, withdrawn_on
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&withdrawal.id)
        .bind(&withdrawal.admin_id)
        .bind(withdrawal.amount)
        .bind(&withdrawal.note)
        .bind(withdrawal.created_at)
        .bind(withdrawal.withdrawn_on)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a withdrawal's amount and note.
    ///
    /// `admin_id`, `created_at`, and `withdrawn_on` are deliberately not
    /// in the UPDATE column list: immutability is enforced by the query
    /// shape, not by convention.
    ///
    /// ## Errors
    /// `NotFound` when no withdrawal has this id.
    pub async fn update(&self, id: &str, amount: Money, note: Option<String>) -> DbResult<()> {
        debug!(id = %id, amount = %amount, "Updating withdrawal");

        let result = sqlx::query(
            r#"
            UPDATE withdrawals SET
                amount_cents = ?2,
                note = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(&note)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Withdrawal", id));
        }

        Ok(())
    }

    /// Deletes a withdrawal permanently.
    ///
    /// ## Errors
    /// `NotFound` when no withdrawal has this id.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting withdrawal");

        let result = sqlx::query("DELETE FROM withdrawals WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Withdrawal", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// A withdrawal with an explicit timestamp, for ordering tests.
    fn withdrawal_at(id: &str, day: u32, hour: u32, cents: i64) -> Withdrawal {
        let created_at = Utc
            .with_ymd_and_hms(2026, 8, day, hour, 0, 0)
            .single()
            .unwrap();
        Withdrawal {
            id: id.to_string(),
            admin_id: "admin-1".to_string(),
            amount: Money::from_cents(cents),
            note: None,
            created_at,
            withdrawn_on: created_at.date_naive(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity_and_dates() {
        let db = test_db().await;
        let repo = db.withdrawals();

        let created = repo
            .create("admin-1", Money::from_cents(15_000), None)
            .await
            .unwrap();

        assert_eq!(created.admin_id, "admin-1");
        assert_eq!(created.amount.cents(), 15_000);
        assert_eq!(created.note, None);
        assert_eq!(created.withdrawn_on, created.created_at.date_naive());

        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.amount.cents(), 15_000);
        assert_eq!(fetched.note, None);
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first() {
        let db = test_db().await;
        let repo = db.withdrawals();

        // Inserted out of order on purpose
        repo.insert(&withdrawal_at("w-early", 2, 9, 1_000))
            .await
            .unwrap();
        repo.insert(&withdrawal_at("w-late", 4, 17, 3_000))
            .await
            .unwrap();
        repo.insert(&withdrawal_at("w-mid", 3, 12, 2_000))
            .await
            .unwrap();

        let listed = repo.list_in_range(date(1), date(8)).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["w-late", "w-mid", "w-early"]);
    }

    #[tokio::test]
    async fn test_list_filters_by_withdrawn_on_inclusive() {
        let db = test_db().await;
        let repo = db.withdrawals();

        repo.insert(&withdrawal_at("w-1", 1, 9, 1_000)).await.unwrap();
        repo.insert(&withdrawal_at("w-4", 4, 9, 1_000)).await.unwrap();
        repo.insert(&withdrawal_at("w-8", 8, 9, 1_000)).await.unwrap();

        let slice = repo.list_in_range(date(4), date(8)).await.unwrap();
        assert_eq!(slice.len(), 2);

        let single = repo.list_in_range(date(4), date(4)).await.unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].id, "w-4");
    }

    #[tokio::test]
    async fn test_total_sums_the_period() {
        let db = test_db().await;
        let repo = db.withdrawals();

        repo.insert(&withdrawal_at("w-1", 2, 9, 15_000))
            .await
            .unwrap();
        repo.insert(&withdrawal_at("w-2", 3, 9, 5_050)).await.unwrap();
        repo.insert(&withdrawal_at("w-out", 20, 9, 99_999))
            .await
            .unwrap();

        let total = repo.total_in_range(date(1), date(8)).await.unwrap();
        assert_eq!(total.cents(), 20_050);

        // Empty period is zero, not an error
        let empty = repo.total_in_range(date(9), date(15)).await.unwrap();
        assert!(empty.is_zero());
    }

    #[tokio::test]
    async fn test_update_touches_amount_and_note_only() {
        let db = test_db().await;
        let repo = db.withdrawals();

        let original = withdrawal_at("w-1", 2, 9, 15_000);
        repo.insert(&original).await.unwrap();

        repo.update(
            "w-1",
            Money::from_cents(20_000),
            Some("recount".to_string()),
        )
        .await
        .unwrap();

        let updated = repo.get("w-1").await.unwrap().unwrap();
        assert_eq!(updated.amount.cents(), 20_000);
        assert_eq!(updated.note.as_deref(), Some("recount"));
        // Immutable fields survived the update
        assert_eq!(updated.admin_id, original.admin_id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.withdrawn_on, original.withdrawn_on);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let db = test_db().await;

        let err = db
            .withdrawals()
            .update("999999", Money::from_cents(100), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let db = test_db().await;
        let repo = db.withdrawals();

        repo.insert(&withdrawal_at("w-1", 2, 9, 15_000))
            .await
            .unwrap();
        repo.delete("w-1").await.unwrap();

        assert!(repo.get("w-1").await.unwrap().is_none());

        // Second delete is NotFound, not a silent no-op
        let err = repo.delete("w-1").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let db = test_db().await;

        let err = db
            .withdrawals()
            .list_in_range(date(8), date(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidRange { .. }));

        let err = db
            .withdrawals()
            .total_in_range(date(8), date(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidRange { .. }));
    }
}
