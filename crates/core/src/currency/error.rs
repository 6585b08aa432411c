//! Currency error types.

use rust_decimal::Decimal;
use thiserror::Error;
use vpsval_shared::Currency;

/// Conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Exchange rates must be strictly positive.
    #[error("Exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// Decimal overflow during conversion.
    #[error("Arithmetic overflow while converting")]
    Overflow,
}

/// Rate provider errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// The provider cannot quote against this base currency.
    #[error("Rates against {0} are not available")]
    UnsupportedBase(Currency),

    /// Transport-level failure.
    #[error("Rate request failed: {0}")]
    Request(String),

    /// The provider answered with an error.
    #[error("Rate provider error: {0}")]
    Api(String),

    /// The provider's answer could not be decoded.
    #[error("Invalid rate response: {0}")]
    Decode(String),
}
