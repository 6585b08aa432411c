//! Calendar primitives for day counting and month arithmetic.
//!
//! Month arithmetic clamps the day-of-month to the last valid day of the
//! target month (Jan 31 + 1 month = Feb 28/29). The same policy applies
//! forward and backward.

use chrono::{Datelike, Months, NaiveDate};

use super::error::ProrationError;

/// Number of whole days from `a` to `b`, floored at zero.
///
/// Every day count in this crate goes through this function.
#[must_use]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days().max(0)
}

/// Number of days (28-31) in the month containing `date`.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        2 if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Advances `date` by `months` calendar months, clamping the day.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ProrationError> {
    date.checked_add_months(Months::new(months))
        .ok_or(ProrationError::DateOutOfRange {
            date,
            months: i64::from(months),
        })
}

/// Moves `date` back by `months` calendar months, clamping the day.
pub fn sub_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ProrationError> {
    date.checked_sub_months(Months::new(months))
        .ok_or(ProrationError::DateOutOfRange {
            date,
            months: -i64::from(months),
        })
}
