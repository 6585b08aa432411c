//! Valuation service.
//!
//! Prorates the remaining term, converts it into the reference currency and
//! compares it with the asking price. Every call recomputes from its input.

use rust_decimal::Decimal;
use tracing::debug;
use vpsval_shared::Money;

use super::error::ValuationError;
use super::types::{PriceAssessment, Valuation, ValuationInput};
use crate::currency::{RateBook, to_reference};
use crate::proration::ProrationEngine;
use crate::proration::derivation::push_conversion_step;

/// Service for valuing prepaid subscription transfers.
pub struct ValuationService;

impl ValuationService {
    /// Values `input`.
    ///
    /// A billing currency equal to the reference currency is converted at 1,
    /// whatever rate the input carries.
    ///
    /// # Errors
    ///
    /// Returns an error if proration fails, the exchange rate is not
    /// positive, or an amount overflows.
    pub fn evaluate(input: &ValuationInput) -> Result<Valuation, ValuationError> {
        let proration = ProrationEngine::prorate(&input.proration_input())?;

        let exchange_rate = if input.currency == input.reference_currency {
            Decimal::ONE
        } else {
            input.exchange_rate
        };
        let reference_amount = to_reference(proration.remaining_value, exchange_rate)?;
        let difference = input
            .transaction_price
            .checked_sub(reference_amount)
            .ok_or(ValuationError::Overflow)?;

        let mut steps = proration.steps;
        push_conversion_step(
            &mut steps,
            input.currency,
            reference_amount,
            input.reference_currency,
        );

        debug!(
            period = %input.period,
            remaining = %proration.remaining_value,
            reference = %reference_amount,
            "Valuation computed"
        );

        Ok(Valuation {
            remaining_value: Money::new(proration.remaining_value, input.currency),
            reference_value: Money::new(reference_amount, input.reference_currency),
            price_difference: Money::new(difference, input.reference_currency),
            assessment: PriceAssessment::from_difference(difference),
            exchange_rate,
            breakdown: proration.breakdown,
            steps,
        })
    }

    /// Values `input` with its exchange rate taken from `book`.
    ///
    /// Books quoted against another base are triangulated through it;
    /// currencies the book does not quote count as 1 base unit.
    ///
    /// # Errors
    ///
    /// Same as [`ValuationService::evaluate`].
    pub fn evaluate_with_rates(
        input: &ValuationInput,
        book: &RateBook,
    ) -> Result<Valuation, ValuationError> {
        let input = ValuationInput {
            exchange_rate: book.cross_rate(input.currency, input.reference_currency)?,
            ..input.clone()
        };
        Self::evaluate(&input)
    }
}
