//! Proration data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vpsval_shared::Currency;

use super::period::BillingPeriod;

/// Inputs of a single proration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationInput {
    /// Date the remaining term changes hands.
    pub transaction_date: NaiveDate,
    /// Date the prepaid term ends.
    pub expiry_date: NaiveDate,
    /// Price of one billing period.
    pub periodic_price: Decimal,
    /// Billing period the price covers.
    pub period: BillingPeriod,
    /// Currency the price is billed in.
    pub currency: Currency,
}

/// Trailing partial month of a monthly proration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialMonth {
    /// Start of the partial month.
    pub from: NaiveDate,
    /// Days charged.
    pub days: i64,
    /// Days in the calendar month containing `from` (the rate denominator).
    pub month_days: u32,
    /// Cost of the partial month.
    pub cost: Decimal,
}

/// Monthly proration details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyProration {
    /// Whole calendar months elapsed.
    pub full_months: u32,
    /// Trailing partial month, if any.
    pub partial: Option<PartialMonth>,
    /// Total remaining value.
    pub value: Decimal,
}

impl MonthlyProration {
    pub(crate) const fn empty() -> Self {
        Self {
            full_months: 0,
            partial: None,
            value: Decimal::ZERO,
        }
    }
}

/// Multi-month proration details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiMonthProration {
    /// Start of the billing period that ends on the expiry date.
    pub period_start: NaiveDate,
    /// Days in that billing period.
    pub total_days: i64,
    /// Price divided by `total_days`.
    pub daily_cost: Decimal,
    /// Days from the transaction date to the expiry date, before capping.
    pub remaining_days: i64,
    /// Days charged, capped at `total_days`.
    pub leftover_days: i64,
    /// Total remaining value.
    pub value: Decimal,
}

impl MultiMonthProration {
    /// Returns true if the remaining days exceeded one full period.
    #[must_use]
    pub const fn is_capped(&self) -> bool {
        self.remaining_days > self.leftover_days
    }
}

/// How a remaining value was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ProrationBreakdown {
    /// Month-by-month walk for one-month periods.
    Monthly(MonthlyProration),
    /// Daily rate over a period anchored on the expiry date.
    MultiMonth(MultiMonthProration),
}

impl ProrationBreakdown {
    /// Remaining value in the billing currency.
    #[must_use]
    pub fn value(&self) -> Decimal {
        match self {
            Self::Monthly(m) => m.value,
            Self::MultiMonth(m) => m.value,
        }
    }
}

/// Result of a proration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationResult {
    /// Remaining value in the billing currency.
    pub remaining_value: Decimal,
    /// Arithmetic behind the value.
    pub breakdown: ProrationBreakdown,
    /// Ordered, numbered derivation lines.
    pub steps: Vec<String>,
}
