//! Annotation view types

use crate::claims::Claim;
use crate::reference::{CitationEntry, PayerRule};
use serde::Serialize;

/// A claim paired with what the annotator found for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimAnnotation<'a> {
    pub claim: &'a Claim,
    pub finding: Finding,
}

impl ClaimAnnotation<'_> {
    pub fn is_denied(&self) -> bool {
        matches!(self.finding, Finding::Denied(_))
    }
}

/// Outcome for a single claim
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Finding {
    /// No denial; nothing was looked up
    Clean,
    /// Denied, with whatever guidance the reference tables hold
    Denied(DenialFinding),
}

/// Guidance gathered for a denied claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenialFinding {
    /// Denial reason as recorded on the claim
    pub reason: String,
    /// Payer appeals tip and source policy, if the payer is known
    pub payer_guidance: Option<PayerRule>,
    /// Citations pulled in by the denial reason, in load order
    pub citations: Vec<CitationEntry>,
}
