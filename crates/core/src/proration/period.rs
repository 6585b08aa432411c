//! Billing period codes.

use serde::{Deserialize, Serialize};

use super::error::ProrationError;

/// Recurring span a subscription price covers.
///
/// Encoded on the wire as a month count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BillingPeriod {
    /// One calendar month.
    Monthly,
    /// 3 months.
    Quarterly,
    /// 6 months.
    SemiAnnual,
    /// 12 months.
    Annual,
    /// 24 months.
    Biennial,
    /// 36 months.
    Triennial,
    /// 48 months.
    Quadrennial,
    /// 60 months.
    Quinquennial,
}

impl BillingPeriod {
    /// Every supported period, shortest first.
    pub const ALL: [Self; 8] = [
        Self::Monthly,
        Self::Quarterly,
        Self::SemiAnnual,
        Self::Annual,
        Self::Biennial,
        Self::Triennial,
        Self::Quadrennial,
        Self::Quinquennial,
    ];

    /// Length of the period in calendar months.
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::SemiAnnual => 6,
            Self::Annual => 12,
            Self::Biennial => 24,
            Self::Triennial => 36,
            Self::Quadrennial => 48,
            Self::Quinquennial => 60,
        }
    }

    /// Returns true for the one-month period, which uses month-walking proration.
    #[must_use]
    pub const fn is_monthly(self) -> bool {
        matches!(self, Self::Monthly)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Annual => "annual",
            Self::Biennial => "biennial",
            Self::Triennial => "triennial",
            Self::Quadrennial => "quadrennial",
            Self::Quinquennial => "quinquennial",
        }
    }
}

impl TryFrom<u32> for BillingPeriod {
    type Error = ProrationError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|p| p.months() == months)
            .ok_or(ProrationError::UnsupportedPeriod(months))
    }
}

impl From<BillingPeriod> for u32 {
    fn from(period: BillingPeriod) -> Self {
        period.months()
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BillingPeriod {
    type Err = String;

    /// Accepts a month count ("12") or a label ("annual").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(months) = s.parse::<u32>() {
            return Self::try_from(months).map_err(|e| e.to_string());
        }
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.label() == lower)
            .ok_or_else(|| format!("Unknown billing period: {s}"))
    }
}
