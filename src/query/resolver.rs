//! Answer resolution: claim matches, then the Q&A bank, then a fallback

use super::matcher::{normalize_query, MatchResult, QueryMatcher};
use crate::claims::Claim;
use crate::config::QueryConfig;
use crate::reference::ReferenceLookup;
use crate::session::{ConversationEntry, ConversationLog};
use serde::Serialize;
use std::fmt;

/// Which source produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// One or more claims matched the question
    ClaimMatches,
    /// A preloaded Q&A bank answer
    QaBank,
    /// The generic fallback message
    Fallback,
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnswerSource::ClaimMatches => "claim matches",
            AnswerSource::QaBank => "Q&A bank",
            AnswerSource::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// Outcome of resolving one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution<'a> {
    pub source: AnswerSource,
    pub answer: String,
    /// Ranked matches; empty unless `source` is `ClaimMatches`
    pub matches: Vec<MatchResult<'a>>,
}

/// Resolves questions through the fallback chain and records them
#[derive(Debug, Clone)]
pub struct AnswerResolver {
    matcher: QueryMatcher,
    fallback_message: String,
}

impl AnswerResolver {
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            matcher: QueryMatcher::new(config.empty_query),
            fallback_message: config.fallback_message.clone(),
        }
    }

    /// Answer a question without recording it.
    ///
    /// Claim matches win over the Q&A bank, which wins over the fallback.
    /// Nothing here fails: an empty result at one step moves on to the next.
    pub fn answer<'a, R>(&self, question: &str, claims: &'a [Claim], refs: &R) -> Resolution<'a>
    where
        R: ReferenceLookup + ?Sized,
    {
        let matches = self.matcher.match_claims(claims, question);
        if !matches.is_empty() {
            tracing::debug!(matches = matches.len(), "Answered from claim matches");
            return Resolution {
                source: AnswerSource::ClaimMatches,
                answer: format_matches(&matches),
                matches,
            };
        }

        let normalized = normalize_query(question);
        if self.matcher.accepts(&normalized) {
            if let Some(answer) = refs.qa_answer(&normalized) {
                tracing::debug!("Answered from Q&A bank");
                return Resolution {
                    source: AnswerSource::QaBank,
                    answer: answer.to_string(),
                    matches: Vec::new(),
                };
            }
        }

        tracing::debug!("No claim or Q&A bank match, using fallback");
        Resolution {
            source: AnswerSource::Fallback,
            answer: self.fallback_message.clone(),
            matches: Vec::new(),
        }
    }

    /// Answer a question and append it to the conversation log
    pub fn resolve<'a, R>(
        &self,
        question: &str,
        claims: &'a [Claim],
        refs: &R,
        log: &mut ConversationLog,
    ) -> Resolution<'a>
    where
        R: ReferenceLookup + ?Sized,
    {
        let resolution = self.answer(question, claims, refs);
        log.append(ConversationEntry::new(
            question,
            resolution.answer.clone(),
            resolution.source,
        ));
        resolution
    }
}

impl Default for AnswerResolver {
    fn default() -> Self {
        Self::new(&QueryConfig::default())
    }
}

/// Render ranked matches as the logged answer text
pub fn format_matches(matches: &[MatchResult<'_>]) -> String {
    let mut text = format!(
        "Found {} matching claims ranked by relevance:\n",
        matches.len()
    );
    for m in matches {
        let c = m.claim;
        text.push_str(&format!(
            "\n- (Score {}) Claim ID: {}, CPT: {}, Modifier: {}, Payer: {}, Denial: {} (Reason: {})",
            m.score,
            c.claim_id,
            c.cpt_code,
            c.modifier,
            c.payer,
            c.denial_reason,
            m.explanation()
        ));
    }
    text
}
