//! Exchange rate books and their providers.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vpsval_shared::Currency;

use super::error::{CurrencyError, RateError};
use super::exchange::ExchangeRate;

/// A set of rates quoted against one base currency, fetched together.
///
/// Each rate is the number of units of a currency per 1 unit of `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBook {
    /// Currency every rate is quoted against.
    pub base: Currency,
    /// Units of each currency per 1 `base`.
    pub rates: BTreeMap<Currency, Decimal>,
    /// When the book was obtained.
    pub fetched_at: DateTime<Utc>,
}

impl RateBook {
    /// Creates a book from already-parsed rates.
    ///
    /// Non-positive rates are dropped; the base is always quoted at 1.
    #[must_use]
    pub fn new(base: Currency, rates: impl IntoIterator<Item = (Currency, Decimal)>) -> Self {
        let mut rates: BTreeMap<Currency, Decimal> = rates
            .into_iter()
            .filter(|(_, rate)| *rate > Decimal::ZERO)
            .collect();
        rates.insert(base, Decimal::ONE);
        Self {
            base,
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// A book with no quotes; every lookup yields the default rate of 1.
    #[must_use]
    pub fn empty(base: Currency) -> Self {
        Self::new(base, [])
    }

    /// Creates a book from raw provider quotes keyed by currency code.
    ///
    /// Codes outside the supported currency set are ignored.
    #[must_use]
    pub fn from_quotes<'a>(
        base: Currency,
        quotes: impl IntoIterator<Item = (&'a str, Decimal)>,
    ) -> Self {
        Self::new(
            base,
            quotes
                .into_iter()
                .filter_map(|(code, rate)| code.parse::<Currency>().ok().map(|c| (c, rate))),
        )
    }

    /// Rate of `currency` against the base, or 1 when it is not quoted.
    #[must_use]
    pub fn rate_for(&self, currency: Currency) -> Decimal {
        self.rates.get(&currency).copied().unwrap_or(Decimal::ONE)
    }

    /// Units of `currency` per 1 `reference`, triangulated through the base.
    pub fn cross_rate(
        &self,
        currency: Currency,
        reference: Currency,
    ) -> Result<Decimal, CurrencyError> {
        self.rate_for(currency)
            .checked_div(self.rate_for(reference))
            .ok_or(CurrencyError::Overflow)
    }

    /// Returns true if `currency` has a real quote in this book.
    #[must_use]
    pub fn quotes(&self, currency: Currency) -> bool {
        self.rates.contains_key(&currency)
    }

    /// Currencies quoted in this book, in menu order.
    #[must_use]
    pub fn currencies(&self) -> Vec<Currency> {
        Currency::ALL
            .into_iter()
            .filter(|c| self.rates.contains_key(c))
            .collect()
    }

    /// Rate of `currency` as an [`ExchangeRate`] from the base.
    pub fn exchange_rate(&self, currency: Currency) -> Result<ExchangeRate, CurrencyError> {
        ExchangeRate::new(
            self.base,
            currency,
            self.rate_for(currency),
            self.fetched_at.date_naive(),
        )
    }
}

/// Source of rate books.
pub trait RateProvider: Send + Sync {
    /// Fetches the current rates quoted against `base`.
    fn fetch(&self, base: Currency) -> Result<RateBook, RateError>;
}

/// Provider serving a fixed set of rates, typically from configuration.
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    base: Currency,
    rates: HashMap<Currency, Decimal>,
}

impl StaticRateProvider {
    /// Creates a provider quoting `rates` against `base`.
    #[must_use]
    pub const fn new(base: Currency, rates: HashMap<Currency, Decimal>) -> Self {
        Self { base, rates }
    }
}

impl RateProvider for StaticRateProvider {
    fn fetch(&self, base: Currency) -> Result<RateBook, RateError> {
        if base != self.base {
            return Err(RateError::UnsupportedBase(base));
        }
        Ok(RateBook::new(
            self.base,
            self.rates.iter().map(|(c, r)| (*c, *r)),
        ))
    }
}
