//! Proration error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Proration-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProrationError {
    /// Period code outside the supported set.
    #[error("Unsupported billing period: {0} months (expected 1, 3, 6, 12, 24, 36, 48 or 60)")]
    UnsupportedPeriod(u32),

    /// The billing period ending on the expiry date has no days.
    #[error("Billing period from {period_start} to {end} contains no days")]
    EmptyPeriod {
        /// Computed period start.
        period_start: NaiveDate,
        /// Period end (expiry date).
        end: NaiveDate,
    },

    /// Month arithmetic left the representable calendar.
    #[error("Date {date} shifted by {months} months is out of range")]
    DateOutOfRange {
        /// Date being shifted.
        date: NaiveDate,
        /// Signed month offset.
        months: i64,
    },

    /// Decimal overflow while accumulating the remaining value.
    #[error("Arithmetic overflow while prorating")]
    Overflow,
}
