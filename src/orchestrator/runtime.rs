use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use tracing::warn;

use crate::config::ResultLimits;
use crate::matcher::Matcher;
use crate::systems::search::{self, SearchCommand, SearchData, SearchResult};
use crate::types::SearchMode;

/// Orchestrator side of the search worker: issues queries and tracks which
/// one is current.
pub(crate) struct SearchRuntime {
	tx: Sender<SearchCommand>,
	rx: Receiver<SearchResult>,
	latest_query_id: Arc<AtomicU64>,
	next_query_id: u64,
	current_query_id: Option<u64>,
	in_flight: bool,
}

impl SearchRuntime {
	pub(crate) fn spawn(matcher: Matcher, limits: ResultLimits) -> Self {
		let (tx, rx, latest_query_id) = search::spawn(matcher, limits);
		Self {
			tx,
			rx,
			latest_query_id,
			next_query_id: 0,
			current_query_id: None,
			in_flight: false,
		}
	}

	pub(crate) fn shutdown(&self) {
		let _ = self.tx.send(SearchCommand::Shutdown);
	}

	/// Send a query to the worker, superseding every earlier one.
	pub(crate) fn issue_search(&mut self, query: String, mode: SearchMode) -> u64 {
		let id = self.bump();
		self.current_query_id = Some(id);
		self.in_flight = true;
		if self
			.tx
			.send(SearchCommand::Query { id, query, mode })
			.is_err()
		{
			warn!(id, "search worker disconnected");
			self.in_flight = false;
		}
		id
	}

	/// Invalidate whatever is in flight without issuing a new query.
	pub(crate) fn cancel(&mut self) {
		self.bump();
		self.current_query_id = None;
		self.in_flight = false;
	}

	fn bump(&mut self) -> u64 {
		self.next_query_id = self.next_query_id.saturating_add(1);
		self.latest_query_id
			.store(self.next_query_id, AtomicOrdering::Release);
		self.next_query_id
	}

	pub(crate) fn matches_latest(&self, result_id: u64) -> bool {
		Some(result_id) == self.current_query_id
	}

	pub(crate) fn record_result_completion(&mut self) {
		self.in_flight = false;
	}

	pub(crate) fn is_in_flight(&self) -> bool {
		self.in_flight
	}

	pub(crate) fn replace_data(&self, data: SearchData) {
		if self.tx.send(SearchCommand::Replace(data)).is_err() {
			warn!("search worker disconnected");
		}
	}

	pub(crate) fn try_recv(&mut self) -> Result<SearchResult, TryRecvError> {
		self.rx.try_recv()
	}

	pub(crate) fn recv_timeout(&mut self, timeout: Duration) -> Result<SearchResult, RecvTimeoutError> {
		self.rx.recv_timeout(timeout)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_the_latest_id_matches() {
		let mut runtime = SearchRuntime::spawn(Matcher::default(), ResultLimits::default());
		let first = runtime.issue_search("a".into(), SearchMode::Commands);
		let second = runtime.issue_search("ab".into(), SearchMode::Commands);
		assert!(!runtime.matches_latest(first));
		assert!(runtime.matches_latest(second));
		assert!(runtime.is_in_flight());

		runtime.cancel();
		assert!(!runtime.matches_latest(second));
		assert!(!runtime.is_in_flight());
		runtime.shutdown();
	}
}
