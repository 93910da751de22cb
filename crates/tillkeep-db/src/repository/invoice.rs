//! # Invoice Repository
//!
//! Aggregate read over the invoice rollup source, producing the period
//! sales summary.
//!
//! ## Tender Buckets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  cash  ──► cash_total    (feeds net-cash reconciliation)            │
//! │  card  ──► card_total                                               │
//! │  other ──► neither bucket; still counted in invoice_count           │
//! │                                                                     │
//! │  total_sales = cash_total + card_total, computed in integer cents   │
//! │  AFTER the buckets are summed - never accumulated as a float.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::ensure_range;
use tillkeep_core::{Invoice, Money, SalesSummary, TenderType};

/// One aggregate row from the summarize query.
#[derive(sqlx::FromRow)]
struct SalesRow {
    cash_cents: i64,
    card_cents: i64,
    invoice_count: i64,
}

/// Repository for invoice rollups.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Summarizes invoice sales for `[start, end]` inclusive.
    ///
    /// Side-effect-free; recomputed on every call, never persisted.
    /// An empty period yields the zero summary, not an error.
    pub async fn summarize(&self, start: NaiveDate, end: NaiveDate) -> DbResult<SalesSummary> {
        ensure_range(start, end)?;

        let row: SalesRow = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN tender = 'cash' THEN total_cents END), 0) AS cash_cents,
                COALESCE(SUM(CASE WHEN tender = 'card' THEN total_cents END), 0) AS card_cents,
                COUNT(*) AS invoice_count
            FROM invoices
            WHERE invoice_date BETWEEN ?1 AND ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        let cash_total = Money::from_cents(row.cash_cents);
        let card_total = Money::from_cents(row.card_cents);

        Ok(SalesSummary {
            cash_total,
            card_total,
            total_sales: cash_total + card_total,
            invoice_count: row.invoice_count,
        })
    }

    /// Ingests one invoice row from the invoice store.
    pub async fn record_invoice(
        &self,
        invoice_date: NaiveDate,
        tender: TenderType,
        total: Money,
    ) -> DbResult<Invoice> {
        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_date,
            tender,
            total,
            created_at: Utc::now(),
        };

        debug!(id = %invoice.id, date = %invoice.invoice_date, total = %invoice.total, "Recording invoice");

        sqlx::query(
            r#"
            INSERT INTO invoices (id, invoice_date, tender, total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&invoice.id)
        .bind(invoice.invoice_date)
        .bind(invoice.tender)
        .bind(invoice.total)
        .bind(invoice.created_at)
        .execute(&self.pool)
        .await?;

        Ok(invoice)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
