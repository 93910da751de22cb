//! # Directory Repository
//!
//! Staff display-name lookups. Pure reference data: reconciliation reads
//! names from it at presentation time and tolerates missing rows by
//! falling back to the raw identifier - name resolution never fails a
//! summary.

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use crate::error::DbResult;
use tillkeep_core::StaffRole;

/// Repository for staff directory lookups.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: SqlitePool,
}

impl DirectoryRepository {
    /// Creates a new DirectoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DirectoryRepository { pool }
    }

    /// Fetches the full id → display-name map.
    ///
    /// The staff table is small (tens of rows); one bulk read per summary
    /// beats a lookup per operator row.
    pub async fn display_names(&self) -> DbResult<HashMap<String, String>> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, display_name FROM staff")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Resolves a single id to its display name.
    ///
    /// Returns `None` for unknown ids; callers fall back to the raw id.
    pub async fn resolve_name(&self, id: &str) -> DbResult<Option<String>> {
        let name: Option<String> = sqlx::query_scalar("SELECT display_name FROM staff WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }

    /// Inserts or updates a directory row.
    ///
    /// Ingestion point for the staff sync collaborator; also used by the
    /// seed tool and tests.
    pub async fn upsert(&self, id: &str, display_name: &str, role: StaffRole) -> DbResult<()> {
        debug!(id = %id, display_name = %display_name, "Upserting staff row");

        sqlx::query(
            r#"
            INSERT INTO staff (id, display_name, role, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET
                display_name = excluded.display_name,
                role = excluded.role
            "#,
        )
        .bind(id)
        .bind(display_name)
        .bind(role)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_resolve_known_and_unknown() {
        let db = test_db().await;
        let repo = db.directory();

        repo.upsert("op-a", "Dana Reyes", StaffRole::Cashier)
            .await
            .unwrap();

        assert_eq!(
            repo.resolve_name("op-a").await.unwrap(),
            Some("Dana Reyes".to_string())
        );
        // Unknown ids are None - the caller's fallback is the id itself
        assert_eq!(repo.resolve_name("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_display_names_bulk() {
        let db = test_db().await;
        let repo = db.directory();

        repo.upsert("op-a", "Dana Reyes", StaffRole::Cashier)
            .await
            .unwrap();
        repo.upsert("admin-1", "Sam Ortiz", StaffRole::Manager)
            .await
            .unwrap();

        let names = repo.display_names().await.unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get("op-a").map(String::as_str), Some("Dana Reyes"));
        assert_eq!(names.get("admin-1").map(String::as_str), Some("Sam Ortiz"));
    }

    #[tokio::test]
    async fn test_upsert_replaces_name() {
        let db = test_db().await;
        let repo = db.directory();

        repo.upsert("op-a", "Dana Reyes", StaffRole::Cashier)
            .await
            .unwrap();
        repo.upsert("op-a", "Dana Reyes-Cruz", StaffRole::Manager)
            .await
            .unwrap();

        assert_eq!(
            repo.resolve_name("op-a").await.unwrap(),
            Some("Dana Reyes-Cruz".to_string())
        );
    }
}
