//! Reference table row types

use serde::{Deserialize, Serialize};

/// One row of the payer denial logic matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerRule {
    /// Payer name, matched exactly against a claim's payer
    pub payer: String,
    /// Appeals advice for denials from this payer
    pub appeals_tip: String,
    /// Policy document the advice comes from
    pub source_policy: String,
}

/// One row of the citation knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    /// Source label, searched by category
    pub source: String,
    /// Summary of the rule
    pub summary: String,
    /// Link or document reference
    pub link: String,
}

/// One row of the custom Q&A bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaBankEntry {
    /// Question key, lower-cased and trimmed
    pub question: String,
    /// Answer returned verbatim
    pub answer: String,
}

impl QaBankEntry {
    /// Build an entry, normalizing the question key
    pub fn new(question: &str, answer: impl Into<String>) -> Self {
        Self {
            question: question.trim().to_lowercase(),
            answer: answer.into(),
        }
    }

    /// Whether this row answers an already-normalized query.
    ///
    /// Containment is checked both ways: a short query can hit a longer
    /// stored question, and a longer sentence can contain a stored key.
    pub fn answers(&self, query: &str) -> bool {
        self.question.contains(query) || query.contains(&self.question)
    }
}
