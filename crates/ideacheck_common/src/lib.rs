//! Ideacheck Common - Report schema and pure transforms for ideacheck
//!
//! Nothing in this crate performs I/O. The daemon owns every network call;
//! this crate turns model text into a validation report.

pub mod extract;
pub mod idea;
pub mod normalize;
pub mod prompts;
pub mod report;

pub use extract::extract_json;
pub use idea::{IdeaError, IdeaInput, MIN_IDEA_CHARS};
pub use normalize::normalize;
pub use report::*;
