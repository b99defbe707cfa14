//! Denial annotation
//!
//! Attaches payer appeals guidance and coding citations to denied claims.
//! Produces a view over the claims; neither claims nor reference data
//! are modified.

pub mod annotator;
pub mod types;

pub use annotator::DenialAnnotator;
pub use types::{ClaimAnnotation, DenialFinding, Finding};
