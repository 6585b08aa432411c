//! Core business logic for Vpsval.
//!
//! This crate contains pure business logic with ZERO network dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `proration` - Remaining value of a prepaid billing period
//! - `currency` - Exchange rates, conversion and rate caching
//! - `valuation` - Full valuation of a subscription transfer and its report

pub mod currency;
pub mod proration;
pub mod valuation;
