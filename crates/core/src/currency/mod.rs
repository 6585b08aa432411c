//! Exchange rates, reference-currency conversion and rate caching.

pub mod cache;
pub mod conversion;
pub mod error;
pub mod exchange;
pub mod provider;

#[cfg(test)]
mod props;

pub use cache::{RateCache, RateLookup, RateOrigin};
pub use conversion::to_reference;
pub use error::{CurrencyError, RateError};
pub use exchange::ExchangeRate;
pub use provider::{RateBook, RateProvider, StaticRateProvider};
