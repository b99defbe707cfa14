//! Question answering over the active claim set
//!
//! - [`matcher`]: weighted substring scoring of claims
//! - [`resolver`]: claim matches, then Q&A bank, then fallback

pub mod matcher;
pub mod resolver;

pub use matcher::{normalize_query, score_claim, MatchReason, MatchResult, QueryMatcher};
pub use resolver::{format_matches, AnswerResolver, AnswerSource, Resolution};
