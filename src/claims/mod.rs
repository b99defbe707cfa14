//! Uploaded claims
//!
//! A claims file is ingested into an immutable `ClaimSet`. Re-uploading
//! replaces the whole set.

pub mod set;
pub mod types;

pub use set::ClaimSet;
pub use types::{Amount, Claim, ClaimSummary, NO_DENIAL};
