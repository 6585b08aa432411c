//! Exchange rate types and logic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vpsval_shared::Currency;

use super::error::CurrencyError;

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: Currency,
    /// Target currency code.
    pub to_currency: Currency,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::NonPositiveRate` if `rate <= 0`.
    pub fn new(
        from_currency: Currency,
        to_currency: Currency,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> Result<Self, CurrencyError> {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate(rate));
        }
        Ok(Self {
            from_currency,
            to_currency,
            rate,
            effective_date,
        })
    }

    /// Identity rate of a currency against itself.
    #[must_use]
    pub const fn identity(currency: Currency, effective_date: NaiveDate) -> Self {
        Self {
            from_currency: currency,
            to_currency: currency,
            rate: Decimal::ONE,
            effective_date,
        }
    }

    /// Returns the inverse rate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            from_currency: self.to_currency,
            to_currency: self.from_currency,
            rate: Decimal::ONE / self.rate,
            effective_date: self.effective_date,
        }
    }

    /// Converts an amount in `to_currency` back into `from_currency` (`amount / rate`).
    pub fn convert_back(&self, amount: Decimal) -> Result<Decimal, CurrencyError> {
        super::conversion::to_reference(amount, self.rate)
    }
}
