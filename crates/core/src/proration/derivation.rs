//! Human-readable derivation of a proration.
//!
//! Every figure shown here is taken from the breakdown the engine computed.
//! Amounts are shown with 3 decimal places.

use std::fmt::Display;

use rust_decimal::Decimal;
use vpsval_shared::Currency;
use vpsval_shared::types::money::round_for_display;

use super::types::{MonthlyProration, MultiMonthProration, ProrationBreakdown, ProrationInput};

/// Appends `body` as the next numbered step.
pub fn push_step(steps: &mut Vec<String>, body: impl Display) {
    let number = steps.len() + 1;
    steps.push(format!("{number}. {body}"));
}

/// Builds the numbered derivation of `breakdown`.
#[must_use]
pub fn build_derivation(input: &ProrationInput, breakdown: &ProrationBreakdown) -> Vec<String> {
    let mut steps = Vec::new();
    match breakdown {
        ProrationBreakdown::Monthly(monthly) => monthly_steps(&mut steps, input, monthly),
        ProrationBreakdown::MultiMonth(multi) => multi_month_steps(&mut steps, input, multi),
    }
    steps
}

/// Appends the reference-currency line when the currencies differ.
pub fn push_conversion_step(
    steps: &mut Vec<String>,
    billing_currency: Currency,
    reference_value: Decimal,
    reference_currency: Currency,
) {
    if billing_currency != reference_currency {
        push_step(
            steps,
            format_args!(
                "Reference value ≈ {:.3} {reference_currency}.",
                round_for_display(reference_value)
            ),
        );
    }
}

fn monthly_steps(steps: &mut Vec<String>, input: &ProrationInput, monthly: &MonthlyProration) {
    let currency = input.currency;
    let price = input.periodic_price;

    push_step(
        steps,
        "Monthly billing: charged per whole calendar month plus the remaining days.",
    );

    if input.expiry_date <= input.transaction_date {
        push_step(
            steps,
            format_args!(
                "Expiry date {} is not after transaction date {}, nothing remains.",
                input.expiry_date, input.transaction_date
            ),
        );
    } else {
        let mut walk = format!(
            "Transaction date {} to expiry date {}: {} full month(s) × {price} {currency}",
            input.transaction_date, input.expiry_date, monthly.full_months
        );
        if let Some(partial) = &monthly.partial {
            walk.push_str(&format!(
                " + {} day(s) from {} × {price}/{} {currency}/day",
                partial.days, partial.from, partial.month_days
            ));
        }
        walk.push('.');
        push_step(steps, walk);
    }

    push_step(
        steps,
        format_args!(
            "Remaining value = {:.3} {currency}.",
            round_for_display(monthly.value)
        ),
    );
}

fn multi_month_steps(
    steps: &mut Vec<String>,
    input: &ProrationInput,
    multi: &MultiMonthProration,
) {
    let currency = input.currency;
    let daily = round_for_display(multi.daily_cost);

    push_step(
        steps,
        format_args!(
            "Expiry date {} minus {} months is {}.",
            input.expiry_date,
            input.period.months(),
            multi.period_start
        ),
    );
    push_step(
        steps,
        format_args!(
            "Period length: {} days, daily rate = {}/{} = {daily:.3} {currency}/day.",
            multi.total_days, input.periodic_price, multi.total_days
        ),
    );

    let mut remaining = format!(
        "Transaction date {} to expiry date {} => remaining days = {}",
        input.transaction_date, input.expiry_date, multi.leftover_days
    );
    if multi.is_capped() {
        remaining.push_str(&format!(
            " (capped from {} at one full period)",
            multi.remaining_days
        ));
    }
    remaining.push('.');
    push_step(steps, remaining);

    push_step(
        steps,
        format_args!(
            "Remaining value = {daily:.3} × {} = {:.3} {currency}.",
            multi.leftover_days,
            round_for_display(multi.value)
        ),
    );
}
