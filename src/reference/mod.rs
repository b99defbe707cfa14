//! Reference tables
//!
//! The citation knowledge base, the payer denial logic matrix and the
//! custom Q&A bank. Loaded once, read-only afterwards.

pub mod store;
pub mod types;

pub use store::{ReferenceLookup, ReferenceStore};
pub use types::{CitationEntry, PayerRule, QaBankEntry};
