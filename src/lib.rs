//! Quick-open matching and ranking for editors.
//!
//! The crate searches four data sets through one surface: indexed files,
//! lines inside those files, open buffers and a command catalog. Hosts drive
//! a [`SearchOrchestrator`] with query edits and mode switches, poll it with
//! [`SearchOrchestrator::tick`], and receive selections through
//! [`FinderEvents`].
//!
//! The building blocks are public as well: [`Matcher`] scores a single
//! candidate, [`systems::filesystem::scan`] builds an [`IndexSnapshot`] and
//! [`systems::search::run_query`] ranks a data set synchronously.

pub mod app_dirs;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod orchestrator;
pub mod registry;
pub mod systems;
pub mod types;

pub use config::{DEFAULT_DEBOUNCE, FinderConfig, ResultLimits, SearchSettings};
pub use error::{ModeParseError, RegistryError};
pub use matcher::{FuzzyMatch, Matcher, ScoreWeights};
pub use orchestrator::{
	Debouncer, FinderEvent, FinderEvents, NoEvents, SearchOrchestrator, SearchState,
};
pub use registry::{CommandEntry, ModeRegistry};
pub use systems::filesystem::{IndexSnapshot, IndexerOptions};
pub use types::{Candidate, MatchResult, Payload, SearchMode, Selection};
