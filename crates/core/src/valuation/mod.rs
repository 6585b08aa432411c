//! Valuation of a prepaid subscription transfer.
//!
//! Combines proration with reference-currency conversion and compares the
//! result with the asking price.

pub mod error;
pub mod report;
pub mod service;
pub mod types;


pub use error::ValuationError;
pub use report::{render_markdown, render_text};
pub use service::ValuationService;
pub use types::{PriceAssessment, Valuation, ValuationInput};
