//! Prorated remaining value of a prepaid billing period.

pub mod calendar;
pub mod derivation;
pub mod engine;
pub mod error;
pub mod period;
pub mod types;

#[cfg(test)]
mod props;


pub use calendar::{add_months, days_between, days_in_month, sub_months};
pub use derivation::build_derivation;
pub use engine::ProrationEngine;
pub use error::ProrationError;
pub use period::BillingPeriod;
pub use types::{
    MonthlyProration, MultiMonthProration, PartialMonth, ProrationBreakdown, ProrationInput,
    ProrationResult,
};
