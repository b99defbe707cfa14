//! Append-only conversation log

use crate::query::AnswerSource;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One question and the answer given to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationEntry {
    /// Question exactly as submitted
    pub question: String,
    /// Answer exactly as returned
    pub answer: String,
    /// Source that produced the answer
    pub source: AnswerSource,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            source,
            recorded_at: Utc::now(),
        }
    }
}

/// Ordered question/answer history for one session.
///
/// Entries can only be appended; there is no edit or delete. A session
/// reset replaces the whole log.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end
    pub fn append(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    /// Every entry in arrival order
    pub fn all(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
