//! Command-line arguments.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use vpsval_core::proration::BillingPeriod;
use vpsval_shared::Currency;

/// Output rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for a terminal.
    Text,
    /// Markdown for pasting into a listing.
    Markdown,
    /// The full valuation as JSON.
    Json,
}

/// Values the unused term of a prepaid VPS subscription.
#[derive(Parser, Debug)]
#[command(name = "vpsval", version, about = "Remaining value of a prepaid VPS subscription")]
pub struct Cli {
    /// Date the remaining term changes hands (defaults to today).
    #[arg(short = 't', long)]
    pub transaction_date: Option<NaiveDate>,

    /// Date the prepaid term ends.
    #[arg(short = 'e', long)]
    pub expiry_date: NaiveDate,

    /// Price of one billing period.
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    pub price: Decimal,

    /// Billing period as a month count (1, 3, 6, 12, 24, 36, 48, 60) or a label.
    #[arg(long, default_value = "1")]
    pub period: BillingPeriod,

    /// Billing currency (defaults to the reference currency).
    #[arg(short = 'c', long)]
    pub currency: Option<Currency>,

    /// Currency results are compared in (overrides configuration).
    #[arg(long)]
    pub reference_currency: Option<Currency>,

    /// Asking price of the transfer, in the reference currency.
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub transaction_price: Decimal,

    /// Units of billing currency per 1 reference unit; skips rate lookup.
    #[arg(short = 'r', long)]
    pub rate: Option<Decimal>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write log events to stderr as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}
