//! Proration engine.
//!
//! Two algorithms:
//! - one-month periods walk forward from the transaction date one calendar
//!   month at a time, charging the full price per elapsed month and a daily
//!   rate based on the actual length of the trailing month;
//! - longer periods anchor one full period on the expiry date, derive a daily
//!   rate from its real day count, and charge the remaining days capped at
//!   one period.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::calendar::{add_months, days_between, days_in_month, sub_months};
use super::derivation::build_derivation;
use super::error::ProrationError;
use super::types::{
    MonthlyProration, MultiMonthProration, PartialMonth, ProrationBreakdown, ProrationInput,
    ProrationResult,
};

/// Engine for prorating prepaid billing periods.
pub struct ProrationEngine;

impl ProrationEngine {
    /// Prorates `input`, choosing the algorithm from its billing period.
    ///
    /// # Errors
    ///
    /// Returns an error if month arithmetic leaves the calendar, the billing
    /// period has no days, or the value overflows.
    pub fn prorate(input: &ProrationInput) -> Result<ProrationResult, ProrationError> {
        let breakdown = if input.period.is_monthly() {
            ProrationBreakdown::Monthly(Self::monthly(
                input.transaction_date,
                input.expiry_date,
                input.periodic_price,
            )?)
        } else {
            ProrationBreakdown::MultiMonth(Self::multi_month(
                input.transaction_date,
                input.expiry_date,
                input.periodic_price,
                input.period.months(),
            )?)
        };

        let steps = build_derivation(input, &breakdown);

        Ok(ProrationResult {
            remaining_value: breakdown.value(),
            breakdown,
            steps,
        })
    }

    /// Remaining value of a monthly plan from `start` to `end`.
    ///
    /// Returns zero when `end <= start`.
    pub fn monthly(
        start: NaiveDate,
        end: NaiveDate,
        monthly_price: Decimal,
    ) -> Result<MonthlyProration, ProrationError> {
        let mut result = MonthlyProration::empty();
        if end <= start {
            return Ok(result);
        }

        let mut current = start;
        loop {
            let days_in_this_month = days_in_month(current);
            let candidate = add_months(current, 1)?;

            if candidate > end {
                let days = days_between(current, end);
                let cost = prorate_days(monthly_price, days, i64::from(days_in_this_month))?;
                result.value = result
                    .value
                    .checked_add(cost)
                    .ok_or(ProrationError::Overflow)?;
                result.partial = Some(PartialMonth {
                    from: current,
                    days,
                    month_days: days_in_this_month,
                    cost,
                });
                break;
            }

            result.value = result
                .value
                .checked_add(monthly_price)
                .ok_or(ProrationError::Overflow)?;
            result.full_months += 1;
            current = candidate;
            if current >= end {
                break;
            }
        }

        Ok(result)
    }

    /// Remaining value of a `period_months` plan from `start` to `end`.
    ///
    /// The billing period is the `period_months` calendar months ending on
    /// `end`. Days charged never exceed the days in that period, and a
    /// transaction on or after `end` is worth zero.
    pub fn multi_month(
        start: NaiveDate,
        end: NaiveDate,
        price: Decimal,
        period_months: u32,
    ) -> Result<MultiMonthProration, ProrationError> {
        let period_start = sub_months(end, period_months)?;
        let total_days = days_between(period_start, end);
        if total_days <= 0 {
            return Err(ProrationError::EmptyPeriod { period_start, end });
        }

        let remaining_days = days_between(start, end);
        let leftover_days = remaining_days.min(total_days);

        let daily_cost = price
            .checked_div(Decimal::from(total_days))
            .ok_or(ProrationError::Overflow)?;
        // price * leftover / total, so a capped result is exactly `price`
        let value = prorate_days(price, leftover_days, total_days)?;

        Ok(MultiMonthProration {
            period_start,
            total_days,
            daily_cost,
            remaining_days,
            leftover_days,
            value,
        })
    }
}

fn prorate_days(price: Decimal, days: i64, denominator: i64) -> Result<Decimal, ProrationError> {
    price
        .checked_mul(Decimal::from(days))
        .and_then(|v| v.checked_div(Decimal::from(denominator)))
        .ok_or(ProrationError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_partial_month_uses_month_length() {
        // 30 of January's 31 days
        let result =
            ProrationEngine::monthly(date(2024, 1, 16), date(2024, 2, 15), dec!(10)).unwrap();
        assert_eq!(result.full_months, 0);
        let partial = result.partial.unwrap();
        assert_eq!(partial.days, 30);
        assert_eq!(partial.month_days, 31);
        assert_eq!(result.value.round_dp(3), dec!(9.677));
    }

    #[test]
    fn test_monthly_exact_month() {
        let result =
            ProrationEngine::monthly(date(2024, 1, 16), date(2024, 2, 16), dec!(10)).unwrap();
        assert_eq!(result.full_months, 1);
        assert!(result.partial.is_none());
        assert_eq!(result.value, dec!(10));
    }

    #[test]
    fn test_monthly_month_plus_one_day() {
        // Feb 16 -> Feb 17 is 1 day of February 2024 (29 days)
        let result =
            ProrationEngine::monthly(date(2024, 1, 16), date(2024, 2, 17), dec!(29)).unwrap();
        assert_eq!(result.full_months, 1);
        assert_eq!(result.partial.unwrap().month_days, 29);
        assert_eq!(result.value, dec!(30));
    }

    #[test]
    fn test_monthly_end_before_start_is_zero() {
        let result =
            ProrationEngine::monthly(date(2024, 5, 1), date(2024, 4, 1), dec!(10)).unwrap();
        assert_eq!(result, MonthlyProration::empty());

        let result =
            ProrationEngine::monthly(date(2024, 5, 1), date(2024, 5, 1), dec!(10)).unwrap();
        assert_eq!(result.value, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_from_month_end_clamps_then_walks() {
        // Jan 31 -> Feb 29 (clamped) -> Mar 29, then 2 days of March
        let result =
            ProrationEngine::monthly(date(2024, 1, 31), date(2024, 3, 31), dec!(31)).unwrap();
        assert_eq!(result.full_months, 2);
        let partial = result.partial.unwrap();
        assert_eq!(partial.from, date(2024, 3, 29));
        assert_eq!(partial.days, 2);
        assert_eq!(result.value, dec!(64));
    }

    #[test]
    fn test_multi_month_leap_year_period() {
        let result =
            ProrationEngine::multi_month(date(2024, 7, 1), date(2025, 1, 1), dec!(60), 12).unwrap();
        assert_eq!(result.period_start, date(2024, 1, 1));
        assert_eq!(result.total_days, 366);
        assert_eq!(result.leftover_days, 184);
        assert!(!result.is_capped());
        assert_eq!(result.value.round_dp(3), dec!(30.164));
    }

    #[test]
    fn test_multi_month_caps_at_full_period() {
        let result =
            ProrationEngine::multi_month(date(2020, 1, 1), date(2025, 1, 1), dec!(60), 12).unwrap();
        assert_eq!(result.remaining_days, 1827);
        assert_eq!(result.leftover_days, 366);
        assert!(result.is_capped());
        assert_eq!(result.value, dec!(60));
    }

    #[test]
    fn test_multi_month_start_after_end_is_zero() {
        let result =
            ProrationEngine::multi_month(date(2025, 3, 1), date(2025, 1, 1), dec!(60), 6).unwrap();
        assert_eq!(result.remaining_days, 0);
        assert_eq!(result.value, Decimal::ZERO);
    }

    #[test]
    fn test_multi_month_zero_length_period_is_rejected() {
        let result = ProrationEngine::multi_month(date(2025, 1, 1), date(2025, 2, 1), dec!(60), 0);
        assert_eq!(
            result,
            Err(ProrationError::EmptyPeriod {
                period_start: date(2025, 2, 1),
                end: date(2025, 2, 1),
            })
        );
    }

    #[test]
    fn test_multi_month_quarter_daily_cost() {
        // Apr 30 - 3 months = Jan 30, a 90-day quarter
        let result =
            ProrationEngine::multi_month(date(2025, 3, 1), date(2025, 4, 30), dec!(90), 3).unwrap();
        assert_eq!(result.period_start, date(2025, 1, 30));
        assert_eq!(result.total_days, 90);
        assert_eq!(result.daily_cost, dec!(1));
        assert_eq!(result.leftover_days, 60);
        assert_eq!(result.value, dec!(60));
    }

    #[test]
    fn test_monthly_overflow_is_reported() {
        let result = ProrationEngine::monthly(date(2024, 1, 1), date(2024, 3, 1), Decimal::MAX);
        assert_eq!(result, Err(ProrationError::Overflow));
    }
}
