use super::streaming::SearchData;
use crate::types::{MatchResult, SearchMode};

/// Commands understood by the background search worker.
#[derive(Debug)]
pub(crate) enum SearchCommand {
	/// Run a search for the provided query and mode.
	Query {
		/// Identifier that lets the orchestrator correlate responses with the originating query.
		id: u64,
		/// Query text as typed; the worker trims it.
		query: String,
		/// Which data set to search.
		mode: SearchMode,
	},
	/// Swap in a new index snapshot, buffer list or command catalog.
	Replace(SearchData),
	/// Stop the background worker thread.
	Shutdown,
}

/// Ranked results for one completed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchResult {
	pub(crate) id: u64,
	pub(crate) mode: SearchMode,
	pub(crate) query: String,
	pub(crate) results: Vec<MatchResult>,
}
