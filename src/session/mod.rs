//! Session state
//!
//! A `ReviewSession` owns everything one user's review touches: the active
//! claim set and the conversation log, plus a shared handle on the
//! reference tables. The host creates it and passes it around explicitly.

pub mod log;
pub mod review;

pub use log::{ConversationEntry, ConversationLog};
pub use review::ReviewSession;
