//! Claim scoring against free-text questions
//!
//! A question is lower-cased and trimmed, then checked for literal
//! containment in three claim fields. Each hit adds a fixed weight:
//!
//! | Field         | Weight | Reason                |
//! |---------------|--------|-----------------------|
//! | CPT code      | 2      | `CPT match`           |
//! | Modifier      | 1      | `Modifier match`      |
//! | Denial reason | 0.5    | `Denial reason match` |
//!
//! Claims scoring zero are dropped; the rest are ordered by descending
//! score, ties keeping claim-set order.

use crate::claims::Claim;
use crate::config::EmptyQueryPolicy;
use serde::Serialize;
use std::fmt;

/// Why a claim matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    Cpt,
    Modifier,
    DenialReason,
}

impl MatchReason {
    /// Score contributed by this reason
    pub fn weight(self) -> f64 {
        match self {
            MatchReason::Cpt => 2.0,
            MatchReason::Modifier => 1.0,
            MatchReason::DenialReason => 0.5,
        }
    }

    fn field(self, claim: &Claim) -> &str {
        match self {
            MatchReason::Cpt => &claim.cpt_code,
            MatchReason::Modifier => &claim.modifier,
            MatchReason::DenialReason => &claim.denial_reason,
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchReason::Cpt => "CPT match",
            MatchReason::Modifier => "Modifier match",
            MatchReason::DenialReason => "Denial reason match",
        };
        f.write_str(label)
    }
}

const REASONS: [MatchReason; 3] = [
    MatchReason::Cpt,
    MatchReason::Modifier,
    MatchReason::DenialReason,
];

/// A scored claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub claim: &'a Claim,
    pub score: f64,
    pub reasons: Vec<MatchReason>,
}

impl MatchResult<'_> {
    /// Reasons joined for display, e.g. `CPT match, Denial reason match`
    pub fn explanation(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Lower-case and trim a question
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Score one claim against an already-normalized query
pub fn score_claim<'a>(claim: &'a Claim, query: &str) -> Option<MatchResult<'a>> {
    let reasons: Vec<MatchReason> = REASONS
        .into_iter()
        .filter(|r| r.field(claim).to_lowercase().contains(query))
        .collect();

    if reasons.is_empty() {
        return None;
    }
    let score: f64 = reasons.iter().map(|r| r.weight()).sum();
    Some(MatchResult {
        claim,
        score,
        reasons,
    })
}

/// Ranks claims against a question
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryMatcher {
    empty_query: EmptyQueryPolicy,
}

impl QueryMatcher {
    pub fn new(empty_query: EmptyQueryPolicy) -> Self {
        Self { empty_query }
    }

    /// Whether a normalized query should be looked up at all
    pub fn accepts(&self, normalized: &str) -> bool {
        !normalized.is_empty() || self.empty_query == EmptyQueryPolicy::MatchAll
    }

    /// Score every claim and return the hits, best first.
    ///
    /// `sort_by` is stable, so equal scores keep claim-set order.
    pub fn match_claims<'a>(&self, claims: &'a [Claim], query: &str) -> Vec<MatchResult<'a>> {
        let query = normalize_query(query);
        if !self.accepts(&query) {
            return Vec::new();
        }

        let mut matches: Vec<MatchResult<'a>> = claims
            .iter()
            .filter_map(|claim| score_claim(claim, &query))
            .collect();
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(id: &str, cpt: &str, modifier: &str, reason: &str) -> Claim {
        Claim {
            claim_id: id.to_string(),
            cpt_code: cpt.to_string(),
            icd10_code: "E11.9".to_string(),
            modifier: modifier.to_string(),
            payer: "Aetna".to_string(),
            billed_amount: None,
            allowed_amount: None,
            denial_reason: reason.to_string(),
        }
    }

    fn ids<'a>(matches: &[MatchResult<'a>]) -> Vec<&'a str> {
        matches.iter().map(|m| m.claim.claim_id.as_str()).collect()
    }

    #[test]
    fn test_modifier_only_match() {
        let claims = vec![claim("C1", "99213", "59", "Modifier not valid for this CPT")];
        let matches = QueryMatcher::default().match_claims(&claims, "59");

        // "59" is not in "99213" nor in the denial reason text
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, 1.0);
        assert_eq!(matches[0].reasons, vec![MatchReason::Modifier]);
    }

    #[test]
    fn test_phrase_must_be_literal_substring() {
        let claims = vec![claim("C1", "99213", "59", "Modifier not valid for this CPT")];
        let matches = QueryMatcher::default().match_claims(&claims, "modifier 59");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_denial_reason_match_is_case_insensitive() {
        let claims = vec![claim("C1", "99213", "59", "Modifier not valid for this CPT")];
        let matches = QueryMatcher::default().match_claims(&claims, "  MODIFIER NOT ");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, 0.5);
        assert_eq!(matches[0].explanation(), "Denial reason match");
    }

    #[test]
    fn test_weights_are_additive() {
        // "25" hits the CPT code, the modifier and the denial reason
        let c = claim("C1", "99225", "25", "Modifier 25 missing");
        let result = score_claim(&c, "25").unwrap();
        assert_eq!(result.score, 3.5);
        assert_eq!(
            result.reasons,
            vec![MatchReason::Cpt, MatchReason::Modifier, MatchReason::DenialReason]
        );
        assert_eq!(
            result.explanation(),
            "CPT match, Modifier match, Denial reason match"
        );
    }

    #[test]
    fn test_each_field_adds_exactly_its_weight() {
        let base = claim("C1", "11111", "22", "None");
        let base_score = score_claim(&base, "7").map(|m| m.score).unwrap_or(0.0);
        assert_eq!(base_score, 0.0);

        let with_cpt = claim("C1", "77777", "22", "None");
        assert_eq!(score_claim(&with_cpt, "7").unwrap().score, base_score + 2.0);

        let with_cpt_and_modifier = claim("C1", "77777", "7", "None");
        assert_eq!(
            score_claim(&with_cpt_and_modifier, "7").unwrap().score,
            base_score + 3.0
        );

        let with_all = claim("C1", "77777", "7", "Code 7 invalid");
        assert_eq!(score_claim(&with_all, "7").unwrap().score, base_score + 3.5);
    }

    #[test]
    fn test_sorted_descending_and_stable_on_ties() {
        let claims = vec![
            claim("A", "11111", "99", "None"),         // modifier: 1
            claim("B", "99214", "", "None"),           // cpt: 2
            claim("C", "22222", "99", "None"),         // modifier: 1
            claim("D", "99215", "99", "None"),         // cpt + modifier: 3
            claim("E", "33333", "", "Code 99 denied"), // denial: 0.5
            claim("F", "99216", "", "None"),           // cpt: 2
        ];
        let matches = QueryMatcher::default().match_claims(&claims, "99");

        assert_eq!(ids(&matches), vec!["D", "B", "F", "A", "C", "E"]);
        let scores: Vec<f64> = matches.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![3.0, 2.0, 2.0, 1.0, 1.0, 0.5]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let claims = vec![claim("C1", "99213", "59", "None")];
        assert!(QueryMatcher::default()
            .match_claims(&claims, "global period")
            .is_empty());
    }

    #[test]
    fn test_blank_query_ignored_by_default() {
        let claims = vec![claim("C1", "99213", "59", "None")];
        let matcher = QueryMatcher::default();
        assert!(matcher.match_claims(&claims, "").is_empty());
        assert!(matcher.match_claims(&claims, "   ").is_empty());
    }

    #[test]
    fn test_blank_query_matches_everything_when_configured() {
        let claims = vec![
            claim("C1", "99213", "59", "None"),
            claim("C2", "99214", "", "Bundled"),
        ];
        let matcher = QueryMatcher::new(EmptyQueryPolicy::MatchAll);
        let matches = matcher.match_claims(&claims, "  ");

        assert_eq!(ids(&matches), vec!["C1", "C2"]);
        assert!(matches.iter().all(|m| m.score == 3.5));
    }

    #[test]
    fn test_matching_is_deterministic() {
        let claims = vec![
            claim("C1", "99213", "59", "Modifier not valid"),
            claim("C2", "99214", "", "None"),
        ];
        let matcher = QueryMatcher::default();
        assert_eq!(
            matcher.match_claims(&claims, "992"),
            matcher.match_claims(&claims, "992")
        );
    }
}
