//! Types shared across the matcher, the indexer and the orchestrator.

mod candidate;
mod mode;
mod outcome;

pub(crate) use candidate::file_name_of;
pub use candidate::{Candidate, Payload};
pub use mode::SearchMode;
pub use outcome::{MatchResult, Selection};
