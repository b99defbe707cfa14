//! Claim Audit - interactive denial review and claim question answering
//!
//! A user uploads a claims spreadsheet; the crate flags denials, attaches
//! payer appeals guidance and coding citations from two reference tables,
//! and answers free-text questions by scoring claims or falling back to a
//! preloaded Q&A bank.
//!
//! ## Architecture
//!
//! ```text
//!  ┌──────────────────────┐        ┌──────────────────────┐
//!  │   Reference Store    │        │      Claim Set       │
//!  │ citations · payers · │        │  uploaded claims,    │
//!  │ Q&A bank (read-only) │        │  normalized          │
//!  └──────────┬───────────┘        └──────────┬───────────┘
//!             │                               │
//!             ├───────────────┬───────────────┤
//!             ▼               │               ▼
//!  ┌──────────────────────┐   │    ┌──────────────────────┐
//!  │   Denial Annotator   │   └───►│    Query Matcher     │
//!  │ payer tip, citations │        │ weighted substrings  │
//!  └──────────────────────┘        └──────────┬───────────┘
//!                                             ▼
//!                                  ┌──────────────────────┐
//!                                  │   Answer Resolver    │
//!                                  │ claims → bank → msg  │
//!                                  └──────────┬───────────┘
//!                                             ▼
//!                                  ┌──────────────────────┐
//!                                  │   Conversation Log   │
//!                                  └──────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`reference`]: reference tables and lookups
//! - [`claims`]: claims ingestion and counts
//! - [`denial`]: per-claim denial annotation
//! - [`query`]: claim scoring and answer resolution
//! - [`session`]: conversation log and the host-owned review session
//! - [`config`]: configuration management
//! - [`table`]: header-checked CSV input
//! - [`error`]: error type and `Result` alias

pub mod claims;
pub mod config;
pub mod denial;
pub mod error;
pub mod query;
pub mod reference;
pub mod session;
pub mod table;

pub use config::AuditConfig;
pub use error::{Error, Result};
