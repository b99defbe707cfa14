//! Denial annotator

use super::types::{ClaimAnnotation, DenialFinding, Finding};
use crate::claims::Claim;
use crate::config::{AnnotationConfig, CaseSensitivity};
use crate::reference::ReferenceLookup;

/// Looks up payer guidance and citations for denied claims
#[derive(Debug, Clone)]
pub struct DenialAnnotator {
    keyword: String,
    keyword_case: CaseSensitivity,
}

impl DenialAnnotator {
    /// Create an annotator from configuration
    pub fn new(config: &AnnotationConfig) -> Self {
        Self {
            keyword: config.modifier_keyword.clone(),
            keyword_case: config.keyword_case,
        }
    }

    /// Annotate one claim.
    ///
    /// Clean claims short-circuit before any reference lookup. For denied
    /// claims the payer rule is looked up by exact payer name, and when the
    /// denial reason contains the configured keyword every citation whose
    /// source mentions the keyword is attached.
    pub fn annotate<'a, R>(&self, claim: &'a Claim, refs: &R) -> ClaimAnnotation<'a>
    where
        R: ReferenceLookup + ?Sized,
    {
        if !claim.is_denied() {
            return ClaimAnnotation {
                claim,
                finding: Finding::Clean,
            };
        }

        let payer_guidance = refs.payer_rule(&claim.payer).cloned();

        let citations = if self.keyword_case.contains(&claim.denial_reason, &self.keyword) {
            refs.citations_matching(&self.keyword)
                .into_iter()
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        ClaimAnnotation {
            claim,
            finding: Finding::Denied(DenialFinding {
                reason: claim.denial_reason.clone(),
                payer_guidance,
                citations,
            }),
        }
    }

    /// Annotate every claim, preserving order
    pub fn annotate_all<'a, R>(&self, claims: &'a [Claim], refs: &R) -> Vec<ClaimAnnotation<'a>>
    where
        R: ReferenceLookup + ?Sized,
    {
        claims.iter().map(|c| self.annotate(c, refs)).collect()
    }
}

impl Default for DenialAnnotator {
    fn default() -> Self {
        Self::new(&AnnotationConfig::default())
    }
}
