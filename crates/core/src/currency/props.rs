//! Property-based tests for currency operations.
//!
//! - Reference conversion round-trips through the rate
//! - Rate books never hand out non-positive rates

use proptest::prelude::*;
use rust_decimal::Decimal;
use vpsval_shared::Currency;

use super::conversion::to_reference;
use super::provider::RateBook;

/// Strategy to generate non-negative decimal amounts (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate any exchange rate, including invalid ones.
fn any_rate() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* amount and positive rate, converting to the reference
    /// currency and back SHALL reproduce the amount to 1e-9.
    #[test]
    fn prop_to_reference_round_trips(
        amount in amount(),
        rate in positive_rate(),
    ) {
        let reference = to_reference(amount, rate).unwrap();
        let back = reference * rate;
        prop_assert!((back - amount).abs() <= Decimal::new(1, 9));
    }

    /// *For any* non-negative amount and positive rate, the reference value
    /// SHALL be non-negative.
    #[test]
    fn prop_to_reference_non_negative(
        amount in amount(),
        rate in positive_rate(),
    ) {
        prop_assert!(to_reference(amount, rate).unwrap() >= Decimal::ZERO);
    }

    /// *For any* quotes, every rate in a book SHALL be positive and the base
    /// SHALL be quoted at 1.
    #[test]
    fn prop_rate_book_rates_positive(
        base in currency(),
        quotes in prop::collection::vec((currency(), any_rate()), 0..16),
    ) {
        let book = RateBook::new(base, quotes);
        prop_assert_eq!(book.rate_for(base), Decimal::ONE);
        for c in Currency::ALL {
            prop_assert!(book.rate_for(c) > Decimal::ZERO);
        }
    }
}
