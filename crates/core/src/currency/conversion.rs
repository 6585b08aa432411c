//! Currency conversion logic.
//!
//! Conversions are not rounded here; amounts are rounded only for display.

use rust_decimal::Decimal;

use super::error::CurrencyError;

/// Expresses `amount` in the reference currency.
///
/// `rate` is quoted as units of the amount's currency per 1 reference unit,
/// so the result is `amount / rate`.
pub fn to_reference(amount: Decimal, rate: Decimal) -> Result<Decimal, CurrencyError> {
    if rate <= Decimal::ZERO {
        return Err(CurrencyError::NonPositiveRate(rate));
    }
    amount.checked_div(rate).ok_or(CurrencyError::Overflow)
}
