//! Valuation error types.

use thiserror::Error;
use vpsval_shared::AppError;

use crate::currency::CurrencyError;
use crate::proration::ProrationError;

/// Valuation-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// Proration rejected the dates or period.
    #[error(transparent)]
    Proration(#[from] ProrationError),

    /// Conversion into the reference currency failed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Decimal overflow while comparing against the transaction price.
    #[error("Arithmetic overflow while computing the price difference")]
    Overflow,
}

impl From<ValuationError> for AppError {
    fn from(err: ValuationError) -> Self {
        Self::Calculation(err.to_string())
    }
}
