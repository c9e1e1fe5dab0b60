//! Ranking routines and the background worker that runs them.

mod aggregator;
mod commands;
mod streaming;
mod tuning;
mod worker;

pub(crate) use commands::{SearchCommand, SearchResult};
pub use streaming::{
	QueryContext, QueryToken, SearchData, SearchPass, run_query, search_buffers, search_commands,
	search_content, search_files,
};
pub(crate) use tuning::ABORT_CHECK_INTERVAL;
pub(crate) use worker::spawn;
