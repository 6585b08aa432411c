//! Plain-text and markdown renderings of a valuation.

use std::fmt::Write as _;

use super::types::{PriceAssessment, Valuation};

/// One-line remaining value, with the reference value when currencies differ.
#[must_use]
pub fn summary_line(valuation: &Valuation) -> String {
    let mut line = valuation.remaining_value.to_string();
    if valuation.remaining_value.currency != valuation.reference_value.currency {
        let _ = write!(line, " (≈ {})", valuation.reference_value);
    }
    line
}

/// Premium / discount line for the asking price.
#[must_use]
pub fn assessment_line(valuation: &Valuation) -> String {
    let difference = valuation.price_difference;
    match valuation.assessment {
        PriceAssessment::Premium => format!("Premium: {difference}"),
        PriceAssessment::Discount => format!(
            "Discount: {:.3} {}",
            difference.display_amount().abs(),
            difference.currency
        ),
        PriceAssessment::AtPar => "Transaction price equals remaining value".to_string(),
    }
}

/// Renders the valuation for a terminal.
#[must_use]
pub fn render_text(valuation: &Valuation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Remaining value: {}", summary_line(valuation));
    let _ = writeln!(out, "{}", assessment_line(valuation));
    let _ = writeln!(out);
    let _ = writeln!(out, "Steps:");
    for step in &valuation.steps {
        let _ = writeln!(out, "{step}");
    }
    out
}

/// Renders the valuation as markdown for pasting into a listing.
#[must_use]
pub fn render_markdown(valuation: &Valuation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### Result");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Remaining value:** {}", summary_line(valuation));
    let _ = writeln!(out);
    let _ = writeln!(out, "**{}**", assessment_line(valuation));
    let _ = writeln!(out);
    let _ = writeln!(out, "### Steps");
    let _ = writeln!(out, "```");
    for step in &valuation.steps {
        let _ = writeln!(out, "{}", step.trim());
    }
    let _ = writeln!(out, "```");
    out
}
