//! # Reconciliation Math
//!
//! Pure aggregation of the three period reads into per-operator and
//! period-wide totals.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    combine() inputs & outputs                       │
//! │                                                                     │
//! │  balance entries ──┐                                                │
//! │  (per operator/day)│   group by operator,                           │
//! │                    ├──► sum opening/cash/card/closing ──► operator  │
//! │  withdrawals ──────┤                                      totals    │
//! │  (period slice)    │   sum amounts ──► withdrawal_total             │
//! │                    │                                                │
//! │  sales summary ────┘   net_cash = sales.cash_total                  │
//! │  (invoice store)                  - withdrawal_total                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Grouping and summation order are irrelevant: addition over integer
//! cents is associative and commutative, so no ordering guarantee is
//! required or exposed. Operator totals come back sorted by operator id
//! purely so output is deterministic.
//!
//! A period with zero balance rows still gets its withdrawal and sales
//! figures computed - a reporting window can contain withdrawals with no
//! matching close-out, and that must be surfaced, not hidden.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{BalanceEntry, OperatorTotals, PeriodTotals, SalesSummary, Withdrawal};

// =============================================================================
// Report
// =============================================================================

/// The aggregator's output: per-operator breakdown plus period totals.
///
/// Withdrawal rows themselves are not part of the math; the service layer
/// echoes the period's withdrawal list alongside this report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    /// One entry per operator with at least one balance row in the period,
    /// sorted by operator id.
    pub operator_totals: Vec<OperatorTotals>,

    /// Period-wide totals.
    pub period_totals: PeriodTotals,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Combines the three period reads into a reconciliation report.
///
/// ## Invariants Upheld
/// - Sum of every `OperatorTotals` field equals the corresponding
///   `PeriodTotals` field exactly (integer-cents arithmetic).
/// - `withdrawal_total` equals the sum of `withdrawals[].amount`.
/// - `net_cash = sales.cash_total - withdrawal_total`.
/// - `variance` per operator is `closing - (opening + cash + card)`;
///   surfaced, never corrected.
pub fn combine(
    balances: &[BalanceEntry],
    withdrawals: &[Withdrawal],
    sales: &SalesSummary,
) -> ReconciliationReport {
    // Group balance rows by operator. BTreeMap gives deterministic output
    // order; the totals themselves don't depend on it.
    let mut by_operator: BTreeMap<&str, OperatorTotals> = BTreeMap::new();

    for entry in balances {
        let totals = by_operator
            .entry(entry.operator_id.as_str())
            .or_insert_with(|| OperatorTotals {
                operator_id: entry.operator_id.clone(),
                opening: Money::zero(),
                cash_total: Money::zero(),
                card_total: Money::zero(),
                closing: Money::zero(),
                variance: Money::zero(),
            });

        totals.opening += entry.opening;
        totals.cash_total += entry.cash_total;
        totals.card_total += entry.card_total;
        totals.closing += entry.closing;
        totals.variance += entry.closing - (entry.opening + entry.cash_total + entry.card_total);
    }

    let operator_totals: Vec<OperatorTotals> = by_operator.into_values().collect();

    let mut period = PeriodTotals {
        opening: Money::zero(),
        cash_total: Money::zero(),
        card_total: Money::zero(),
        closing: Money::zero(),
        variance: Money::zero(),
        withdrawal_total: withdrawals.iter().map(|w| w.amount).sum(),
        net_cash: Money::zero(),
    };

    for totals in &operator_totals {
        period.opening += totals.opening;
        period.cash_total += totals.cash_total;
        period.card_total += totals.card_total;
        period.closing += totals.closing;
        period.variance += totals.variance;
    }

    period.net_cash = sales.cash_total - period.withdrawal_total;

    ReconciliationReport {
        operator_totals,
        period_totals: period,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
