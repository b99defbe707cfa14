//! Claim record types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Denial reason text meaning the claim was not denied.
///
/// This is a data convention of the claims export, compared exactly and
/// case-sensitively. Any other text (including a blank cell) is a denial.
pub const NO_DENIAL: &str = "None";

/// One billed service line from an uploaded claims file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim identifier as exported
    pub claim_id: String,
    /// CPT procedure code, trimmed
    pub cpt_code: String,
    /// ICD-10 diagnosis code
    pub icd10_code: String,
    /// Modifier, trimmed; the missing-value sentinel when blank
    pub modifier: String,
    /// Payer name
    pub payer: String,
    /// Billed amount, `None` when the cell was blank
    pub billed_amount: Option<Amount>,
    /// Allowed amount, `None` when the cell was blank
    pub allowed_amount: Option<Amount>,
    /// Denial reason, trimmed; `NO_DENIAL` for clean claims
    pub denial_reason: String,
}

impl Claim {
    /// Whether the claim carries a denial
    pub fn is_denied(&self) -> bool {
        self.denial_reason != NO_DENIAL
    }
}

/// A monetary cell as it came out of the export.
///
/// Amounts are display-only, so text that is not a number (`N/A`,
/// `pending`) is kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Parsed(Decimal),
    Raw(String),
}

impl Amount {
    /// Parse a cell such as `1,250.00` or `$85`; blank cells are `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let cleaned: String = trimmed
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        Some(match cleaned.parse::<Decimal>() {
            Ok(value) => Amount::Parsed(value),
            Err(_) => Amount::Raw(trimmed.to_string()),
        })
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Parsed(value) => Some(*value),
            Amount::Raw(_) => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Parsed(value) => write!(f, "${}", value),
            Amount::Raw(text) => f.write_str(text),
        }
    }
}

/// Aggregate counts for the dashboard tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub total: usize,
    pub denied: usize,
    pub clean: usize,
}
