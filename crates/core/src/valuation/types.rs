//! Valuation data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vpsval_shared::types::money::round_for_display;
use vpsval_shared::{Currency, Money};

use crate::proration::{BillingPeriod, ProrationBreakdown, ProrationInput};

/// Everything needed to value a prepaid subscription transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationInput {
    /// Date the remaining term changes hands.
    pub transaction_date: NaiveDate,
    /// Date the prepaid term ends.
    pub expiry_date: NaiveDate,
    /// Price of one billing period, in `currency`.
    pub periodic_price: Decimal,
    /// Billing period the price covers.
    pub period: BillingPeriod,
    /// Billing currency.
    pub currency: Currency,
    /// Currency results are compared in.
    pub reference_currency: Currency,
    /// Units of `currency` per 1 `reference_currency`.
    pub exchange_rate: Decimal,
    /// Asking price of the transfer, in `reference_currency`.
    pub transaction_price: Decimal,
}

impl ValuationInput {
    /// The proration part of this input.
    #[must_use]
    pub const fn proration_input(&self) -> ProrationInput {
        ProrationInput {
            transaction_date: self.transaction_date,
            expiry_date: self.expiry_date,
            periodic_price: self.periodic_price,
            period: self.period,
            currency: self.currency,
        }
    }
}

/// How the asking price compares with the remaining value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceAssessment {
    /// Asking more than the remaining value.
    Premium,
    /// Asking less than the remaining value.
    Discount,
    /// Asking exactly the remaining value (at display precision).
    AtPar,
}

impl PriceAssessment {
    /// Classifies a price difference at display precision.
    #[must_use]
    pub fn from_difference(difference: Decimal) -> Self {
        let shown = round_for_display(difference);
        if shown > Decimal::ZERO {
            Self::Premium
        } else if shown < Decimal::ZERO {
            Self::Discount
        } else {
            Self::AtPar
        }
    }
}

/// Result of a valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    /// Remaining value in the billing currency.
    pub remaining_value: Money,
    /// Remaining value in the reference currency.
    pub reference_value: Money,
    /// Transaction price minus reference value, in the reference currency.
    pub price_difference: Money,
    /// Sign of `price_difference`.
    pub assessment: PriceAssessment,
    /// Exchange rate used (units of billing currency per reference unit).
    pub exchange_rate: Decimal,
    /// Arithmetic behind the remaining value.
    pub breakdown: ProrationBreakdown,
    /// Ordered, numbered derivation lines.
    pub steps: Vec<String>,
}
