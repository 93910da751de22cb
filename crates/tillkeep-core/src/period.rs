//! # Reporting Periods
//!
//! Turns a user-selected reporting mode into a concrete inclusive date
//! range.
//!
//! ## Period Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  today:   [today, today]                                            │
//! │  week:    [today - 7 days, today]     (rolling, NOT calendar week)  │
//! │  month:   [1st of month, today]                                     │
//! │  custom:  [start, end] as given       (both endpoints required)     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dates are plain calendar dates (`NaiveDate`) with no time-of-day and no
//! timezone conversion - the caller's calendar date is authoritative, which
//! is why `resolve` takes `today` as an argument instead of reading a clock.
//!
//! A custom range passes through **unvalidated**: whether `start <= end` is
//! the ledger readers' concern, so that an inverted range fails the same
//! way on every read path.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive `[start, end]` calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range without validating endpoint order.
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// A single-day range.
    pub const fn single(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    /// Whether `date` falls inside the range (inclusive bounds).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// =============================================================================
// Period Selection
// =============================================================================

/// A user-selected reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum PeriodSelection {
    /// The single calendar day of `today`.
    Today,

    /// The rolling seven days ending at `today`.
    Week,

    /// From the first of `today`'s month through `today`.
    Month,

    /// An explicit range. Both endpoints are required; they are passed
    /// through to the readers without an order check.
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl PeriodSelection {
    /// Resolves the selection against the caller's calendar date.
    ///
    /// ## Errors
    /// `ValidationError::Required` when a custom selection is missing
    /// either endpoint.
    pub fn resolve(&self, today: NaiveDate) -> ValidationResult<DateRange> {
        match *self {
            PeriodSelection::Today => Ok(DateRange::single(today)),

            PeriodSelection::Week => Ok(DateRange::new(today - Duration::days(7), today)),

            PeriodSelection::Month => {
                let first = today
                    .with_day(1)
                    .expect("the first of a valid date's month is always valid");
                Ok(DateRange::new(first, today))
            }

            PeriodSelection::Custom { start, end } => {
                let start = start.ok_or_else(|| ValidationError::Required {
                    field: "customStart".to_string(),
                })?;
                let end = end.ok_or_else(|| ValidationError::Required {
                    field: "customEnd".to_string(),
                })?;
                Ok(DateRange::new(start, end))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_is_single_day() {
        let range = PeriodSelection::Today.resolve(date(2026, 8, 8)).unwrap();
        assert_eq!(range.start, date(2026, 8, 8));
        assert_eq!(range.end, date(2026, 8, 8));
    }

    #[test]
    fn test_week_is_rolling_not_calendar_aligned() {
        // A Saturday; a calendar-aligned week would snap to Monday
        let range = PeriodSelection::Week.resolve(date(2026, 8, 8)).unwrap();
        assert_eq!(range.start, date(2026, 8, 1));
        assert_eq!(range.end, date(2026, 8, 8));
    }

    #[test]
    fn test_week_crosses_month_and_year_boundaries() {
        let range = PeriodSelection::Week.resolve(date(2026, 1, 3)).unwrap();
        assert_eq!(range.start, date(2025, 12, 27));
        assert_eq!(range.end, date(2026, 1, 3));
    }

    #[test]
    fn test_month_starts_on_the_first() {
        let range = PeriodSelection::Month.resolve(date(2026, 8, 8)).unwrap();
        assert_eq!(range.start, date(2026, 8, 1));
        assert_eq!(range.end, date(2026, 8, 8));

        // On the 1st, start == end
        let range = PeriodSelection::Month.resolve(date(2026, 8, 1)).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_custom_requires_both_endpoints() {
        let missing_end = PeriodSelection::Custom {
            start: Some(date(2026, 8, 1)),
            end: None,
        };
        assert!(matches!(
            missing_end.resolve(date(2026, 8, 8)),
            Err(ValidationError::Required { .. })
        ));

        let missing_start = PeriodSelection::Custom {
            start: None,
            end: Some(date(2026, 8, 8)),
        };
        assert!(missing_start.resolve(date(2026, 8, 8)).is_err());
    }

    #[test]
    fn test_custom_passes_through_unvalidated() {
        // Inverted on purpose: order checks belong to the readers
        let inverted = PeriodSelection::Custom {
            start: Some(date(2026, 8, 8)),
            end: Some(date(2026, 8, 1)),
        };
        let range = inverted.resolve(date(2026, 8, 8)).unwrap();
        assert_eq!(range.start, date(2026, 8, 8));
        assert_eq!(range.end, date(2026, 8, 1));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2026, 8, 1), date(2026, 8, 8));
        assert!(range.contains(date(2026, 8, 1)));
        assert!(range.contains(date(2026, 8, 8)));
        assert!(range.contains(date(2026, 8, 4)));
        assert!(!range.contains(date(2026, 7, 31)));
        assert!(!range.contains(date(2026, 8, 9)));
    }

    #[test]
    fn test_selection_deserializes_from_wire_shape() {
        let selection: PeriodSelection = serde_json::from_str(r#"{"mode":"week"}"#).unwrap();
        assert_eq!(selection, PeriodSelection::Week);

        let selection: PeriodSelection =
            serde_json::from_str(r#"{"mode":"custom","start":"2026-08-01","end":"2026-08-08"}"#)
                .unwrap();
        assert_eq!(
            selection,
            PeriodSelection::Custom {
                start: Some(date(2026, 8, 1)),
                end: Some(date(2026, 8, 8)),
            }
        );
    }
}
