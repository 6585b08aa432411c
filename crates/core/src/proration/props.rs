//! Property-based tests for proration.
//!
//! - Monthly proration is zero when nothing remains
//! - Monthly proration never decreases as the expiry date moves later
//! - A whole calendar month costs exactly the monthly price
//! - A partial month costs days × price / days-in-month
//! - Multi-month proration never exceeds one period's price
//! - Day counting is never negative

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calendar::{add_months, days_between, days_in_month};
use super::engine::ProrationEngine;
use super::period::BillingPeriod;

/// Strategy for any date between 2000-01-01 and 2099-12-31.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..36_524).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Strategy for dates whose day-of-month exists in every month.
fn date_on_common_day() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for prices (0.00 to 10,000.00).
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for multi-month periods.
fn multi_month_period() -> impl Strategy<Value = BillingPeriod> {
    prop_oneof![
        Just(BillingPeriod::Quarterly),
        Just(BillingPeriod::SemiAnnual),
        Just(BillingPeriod::Annual),
        Just(BillingPeriod::Biennial),
        Just(BillingPeriod::Triennial),
        Just(BillingPeriod::Quadrennial),
        Just(BillingPeriod::Quinquennial),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* start and `end <= start`, monthly proration SHALL be zero.
    #[test]
    fn prop_monthly_zero_when_expired(
        start in any_date(),
        back in 0i64..2000,
        price in price(),
    ) {
        let end = start - Duration::days(back);
        let result = ProrationEngine::monthly(start, end, price).unwrap();
        prop_assert_eq!(result.value, Decimal::ZERO);
    }

    /// *For any* start, monthly proration SHALL be non-decreasing in `end`.
    #[test]
    fn prop_monthly_monotonic_in_end(
        start in any_date(),
        a in 0i64..800,
        b in 0i64..800,
        price in price(),
    ) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near_value = ProrationEngine::monthly(start, start + Duration::days(near), price)
            .unwrap()
            .value;
        let far_value = ProrationEngine::monthly(start, start + Duration::days(far), price)
            .unwrap()
            .value;
        prop_assert!(
            near_value <= far_value,
            "value at +{} days ({}) exceeds value at +{} days ({})",
            near, near_value, far, far_value
        );
    }

    /// *For any* date, one calendar month later SHALL cost exactly the price.
    #[test]
    fn prop_full_month_costs_price(
        start in any_date(),
        price in price(),
    ) {
        let end = add_months(start, 1).unwrap();
        let result = ProrationEngine::monthly(start, end, price).unwrap();
        prop_assert_eq!(result.value, price);
        prop_assert_eq!(result.full_months, 1);
    }

    /// *For any* date on a day every month has and `k < days_in_month`,
    /// the cost SHALL be `k × price / days_in_month`.
    #[test]
    fn prop_partial_month_rate(
        start in date_on_common_day(),
        k in 0i64..31,
        price in price(),
    ) {
        let month_days = i64::from(days_in_month(start));
        prop_assume!(k < month_days);

        let result = ProrationEngine::monthly(start, start + Duration::days(k), price).unwrap();
        let expected = Decimal::from(k) * price / Decimal::from(month_days);
        let tolerance = Decimal::new(1, 9);
        prop_assert!((result.value - expected).abs() <= tolerance);
        prop_assert_eq!(result.full_months, 0);
    }

    /// *For any* multi-month input, leftover days SHALL not exceed the
    /// period length and the value SHALL not exceed the price.
    #[test]
    fn prop_multi_month_never_exceeds_price(
        start in any_date(),
        end in any_date(),
        price in price(),
        period in multi_month_period(),
    ) {
        let result = ProrationEngine::multi_month(start, end, price, period.months()).unwrap();
        prop_assert!(result.leftover_days <= result.total_days);
        prop_assert!(result.leftover_days >= 0);
        prop_assert!(result.value <= price);
        prop_assert!(result.value >= Decimal::ZERO);
    }

    /// *For any* dates, `days_between` SHALL be non-negative and zero on equal dates.
    #[test]
    fn prop_days_between_non_negative(
        a in any_date(),
        b in any_date(),
    ) {
        prop_assert!(days_between(a, b) >= 0);
        prop_assert_eq!(days_between(a, a), 0);
        prop_assert!(days_between(a, b) == 0 || days_between(b, a) == 0);
    }
}
