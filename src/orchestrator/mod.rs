//! The quick-open state machine.
//!
//! [`SearchOrchestrator`] owns the query, the active mode, the debounce
//! window and the current result set. Searching happens on a background
//! worker; every issued query gets a fresh id and results for any other id
//! are dropped on arrival.

mod debounce;
mod events;
mod runtime;

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

pub use debounce::Debouncer;
pub use events::{FinderEvent, FinderEvents, NoEvents};
use runtime::SearchRuntime;

use crate::config::{FinderConfig, SearchSettings};
use crate::error::RegistryError;
use crate::matcher::Matcher;
use crate::registry::ModeRegistry;
use crate::systems::filesystem::{IndexSnapshot, IndexerOptions, scan};
use crate::systems::search::{SearchData, SearchResult};
use crate::types::{MatchResult, SearchMode, Selection};

/// Where the orchestrator is in the query lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchState {
	/// No search issued since the last mode switch.
	#[default]
	Idle,
	/// A search is running on the worker.
	Searching,
	/// The latest search completed and its results are current.
	Displaying,
}

struct BuiltIndex {
	root: PathBuf,
	snapshot: Arc<IndexSnapshot>,
}

/// Quick-open controller driven by host input.
pub struct SearchOrchestrator<E: FinderEvents = NoEvents> {
	settings: SearchSettings,
	indexer: IndexerOptions,
	registry: ModeRegistry,
	events: E,
	mode: SearchMode,
	query: String,
	root: Option<PathBuf>,
	index: Option<BuiltIndex>,
	results: Vec<MatchResult>,
	debounce: Debouncer,
	search: SearchRuntime,
	shown: bool,
	state: SearchState,
	data_dirty: bool,
}

impl<E: FinderEvents> SearchOrchestrator<E> {
	/// Build an orchestrator and start its search worker.
	pub fn new(config: FinderConfig, registry: ModeRegistry, events: E) -> Self {
		let FinderConfig {
			indexer,
			search,
			scoring,
		} = config;
		Self {
			settings: search,
			indexer,
			registry,
			events,
			mode: SearchMode::default(),
			query: String::new(),
			root: None,
			index: None,
			results: Vec::new(),
			debounce: Debouncer::new(search.debounce),
			search: SearchRuntime::spawn(Matcher::new(scoring), search.limits),
			shown: false,
			state: SearchState::Idle,
			data_dirty: true,
		}
	}

	/// Set the directory indexed by the file and content modes.
	///
	/// The index is rebuilt lazily the next time one of those modes searches.
	pub fn set_root(&mut self, root: impl Into<PathBuf>) {
		let root = root.into();
		if self.root.as_ref() == Some(&root) {
			return;
		}
		debug!(root = %root.display(), "root changed");
		self.root = Some(root);
		if self.index.take().is_some() {
			self.data_dirty = true;
		}
	}

	/// Replace the open buffers searched by buffer mode.
	pub fn set_open_files<I, P>(&mut self, paths: I)
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.registry.set_buffers(paths);
		self.data_dirty = true;
	}

	/// Extend the command catalog.
	pub fn register_command(
		&mut self,
		name: impl Into<String>,
		action: impl Into<String>,
	) -> Result<(), RegistryError> {
		self.registry.register_command(name, action)?;
		self.data_dirty = true;
		Ok(())
	}

	/// Switch modes, clearing the query and results.
	///
	/// Any pending or in-flight search is dropped. File and content modes
	/// build the index here when none exists for the current root.
	pub fn set_mode(&mut self, mode: SearchMode) {
		self.debounce.cancel();
		self.search.cancel();
		self.query.clear();
		self.clear_results();
		self.mode = mode;
		self.state = SearchState::Idle;
		if mode.uses_index() {
			self.ensure_index();
		}
		trace!(%mode, "mode switched");
	}

	pub fn show_file_search(&mut self, root: impl Into<PathBuf>) {
		self.set_root(root);
		self.show(SearchMode::Files);
	}

	pub fn show_content_search(&mut self, root: impl Into<PathBuf>) {
		self.set_root(root);
		self.show(SearchMode::Content);
	}

	pub fn show_buffer_search<I, P>(&mut self, open_files: I)
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.set_open_files(open_files);
		self.show(SearchMode::Buffers);
	}

	pub fn show_command_search(&mut self) {
		self.show(SearchMode::Commands);
	}

	fn show(&mut self, mode: SearchMode) {
		self.set_mode(mode);
		self.shown = true;
		self.refresh();
	}

	/// Store the raw query and restart the debounce window at `now`.
	pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
		self.query = text.into();
		self.debounce.schedule(now);
	}

	/// Fire the debounce if due and apply any finished results.
	///
	/// Returns whether the result set changed.
	pub fn tick(&mut self, now: Instant) -> bool {
		if self.debounce.fire_if_due(now) {
			self.refresh();
		}
		self.pump_results()
	}

	/// Search for the current query right away.
	pub fn refresh(&mut self) {
		self.debounce.cancel();
		if self.mode.uses_index() {
			self.ensure_index();
		}
		self.sync_data();
		let id = self.search.issue_search(self.query.clone(), self.mode);
		self.state = SearchState::Searching;
		debug!(id, mode = %self.mode, query = %self.query, "search issued");
	}

	/// Apply every result the worker has delivered so far.
	pub fn pump_results(&mut self) -> bool {
		let mut changed = false;
		loop {
			match self.search.try_recv() {
				Ok(result) => changed |= self.accept(result),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					warn!("search worker disconnected");
					break;
				}
			}
		}
		changed
	}

	/// Block until the latest search has completed or `timeout` elapses.
	///
	/// Returns `true` when no search is left in flight.
	pub fn wait_for_results(&mut self, timeout: Duration) -> bool {
		self.pump_results();
		let deadline = Instant::now() + timeout;
		while self.search.is_in_flight() {
			let remaining = deadline.saturating_duration_since(Instant::now());
			if remaining.is_zero() {
				break;
			}
			match self.search.recv_timeout(remaining) {
				Ok(result) => {
					self.accept(result);
				}
				Err(RecvTimeoutError::Timeout) => break,
				Err(RecvTimeoutError::Disconnected) => {
					warn!("search worker disconnected");
					break;
				}
			}
		}
		!self.search.is_in_flight()
	}

	fn accept(&mut self, result: SearchResult) -> bool {
		if !self.search.matches_latest(result.id) || result.mode != self.mode {
			trace!(id = result.id, "discarding stale results");
			return false;
		}
		self.search.record_result_completion();
		self.state = SearchState::Displaying;
		self.results = result.results;
		self.events.result_count_changed(self.results.len());
		true
	}

	#[must_use]
	pub fn results(&self) -> &[MatchResult] {
		&self.results
	}

	/// Raw query text as last set by the host.
	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn mode(&self) -> SearchMode {
		self.mode
	}

	#[must_use]
	pub fn state(&self) -> SearchState {
		self.state
	}

	#[must_use]
	pub fn is_shown(&self) -> bool {
		self.shown
	}

	/// Index used by the file and content modes, if one has been built.
	#[must_use]
	pub fn snapshot(&self) -> Option<&IndexSnapshot> {
		self.index.as_ref().map(|index| index.snapshot.as_ref())
	}

	#[must_use]
	pub fn registry(&self) -> &ModeRegistry {
		&self.registry
	}

	#[must_use]
	pub fn settings(&self) -> &SearchSettings {
		&self.settings
	}

	pub fn events(&self) -> &E {
		&self.events
	}

	pub fn events_mut(&mut self) -> &mut E {
		&mut self.events
	}

	/// Resolve the result at `index`, notify the host and dismiss.
	pub fn select(&mut self, index: usize) -> Option<Selection> {
		let selection = Selection::from(self.results.get(index)?);
		match &selection {
			Selection::File { path } => self.events.file_chosen(path),
			Selection::Buffer { path } => self.events.buffer_chosen(path),
			Selection::Content { path, line } => self.events.content_chosen(path, *line),
			Selection::Command { action } => self.events.command_chosen(action),
		}
		debug!(?selection, "result selected");
		self.dismiss();
		Some(selection)
	}

	/// Hide the surface and forget the query, results and index.
	pub fn dismiss(&mut self) {
		self.shown = false;
		self.debounce.cancel();
		self.search.cancel();
		self.query.clear();
		self.clear_results();
		self.state = SearchState::Idle;
		if self.index.take().is_some() {
			self.data_dirty = true;
		}
	}

	fn clear_results(&mut self) {
		if !self.results.is_empty() {
			self.results.clear();
			self.events.result_count_changed(0);
		}
	}

	fn current_root(&self) -> PathBuf {
		self.root
			.clone()
			.or_else(|| env::current_dir().ok())
			.unwrap_or_else(|| PathBuf::from("."))
	}

	fn ensure_index(&mut self) {
		let root = self.current_root();
		if self
			.index
			.as_ref()
			.is_some_and(|index| index.root == root)
		{
			return;
		}
		let snapshot = Arc::new(scan(&root, &self.indexer));
		self.index = Some(BuiltIndex { root, snapshot });
		self.data_dirty = true;
	}

	fn sync_data(&mut self) {
		if !self.data_dirty {
			return;
		}
		let snapshot = self
			.index
			.as_ref()
			.map(|index| Arc::clone(&index.snapshot))
			.unwrap_or_default();
		self.search.replace_data(SearchData {
			snapshot,
			buffers: self.registry.buffer_table(),
			commands: self.registry.command_table(),
		});
		self.data_dirty = false;
	}

	/// Root the file and content modes search, if the host set one.
	#[must_use]
	pub fn root(&self) -> Option<&Path> {
		self.root.as_deref()
	}
}

impl<E: FinderEvents> Drop for SearchOrchestrator<E> {
	fn drop(&mut self) {
		self.search.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::TempDir;

	use super::*;

	const WAIT: Duration = Duration::from_secs(5);

	fn commands_only() -> SearchOrchestrator<Vec<FinderEvent>> {
		let mut registry = ModeRegistry::empty();
		registry
			.register_commands([("New File", "newFile"), ("Open File", "openFile")])
			.expect("register");
		SearchOrchestrator::new(FinderConfig::default(), registry, Vec::new())
	}

	fn labels<E: FinderEvents>(finder: &SearchOrchestrator<E>) -> Vec<String> {
		finder
			.results()
			.iter()
			.map(|result| result.label().to_string())
			.collect()
	}

	#[test]
	fn showing_issues_an_empty_query_search() {
		let mut finder = commands_only();
		finder.show_command_search();
		assert!(finder.is_shown());
		assert_eq!(finder.state(), SearchState::Searching);
		assert!(finder.wait_for_results(WAIT));
		assert_eq!(finder.state(), SearchState::Displaying);
		assert_eq!(labels(&finder), vec!["New File", "Open File"]);
	}

	#[test]
	fn query_waits_for_the_debounce_window() {
		let mut finder = commands_only();
		finder.show_command_search();
		finder.wait_for_results(WAIT);

		let start = Instant::now();
		finder.set_query("of", start);
		assert!(!finder.tick(start + Duration::from_millis(10)));
		assert_eq!(finder.state(), SearchState::Displaying);
		assert_eq!(labels(&finder), vec!["New File", "Open File"]);

		finder.tick(start + finder.settings().debounce);
		assert!(finder.wait_for_results(WAIT));
		assert_eq!(labels(&finder), vec!["Open File"]);
	}

	#[test]
	fn selecting_a_command_fires_one_event_and_dismisses() {
		let mut finder = commands_only();
		finder.show_command_search();
		finder.wait_for_results(WAIT);

		let selection = finder.select(1).expect("selection");
		assert_eq!(selection.command(), Some("openFile"));
		assert!(!finder.is_shown());
		assert!(finder.results().is_empty());

		let chosen: Vec<&FinderEvent> = finder
			.events()
			.iter()
			.filter(|event| !matches!(event, FinderEvent::ResultCountChanged { .. }))
			.collect();
		assert_eq!(
			chosen,
			vec![&FinderEvent::CommandChosen {
				action: "openFile".into()
			}]
		);
	}

	#[test]
	fn out_of_range_selection_is_ignored() {
		let mut finder = commands_only();
		finder.show_command_search();
		finder.wait_for_results(WAIT);
		assert_eq!(finder.select(10), None);
		assert!(finder.is_shown());
	}

	#[test]
	fn mode_switch_clears_query_and_results() {
		let mut finder = commands_only();
		finder.show_command_search();
		finder.wait_for_results(WAIT);
		finder.set_query("new", Instant::now());

		finder.set_mode(SearchMode::Buffers);
		assert_eq!(finder.query(), "");
		assert!(finder.results().is_empty());
		assert_eq!(finder.state(), SearchState::Idle);
		assert_eq!(
			finder.events().last(),
			Some(&FinderEvent::ResultCountChanged { count: 0 })
		);
	}

	#[test]
	fn file_mode_indexes_the_root_once() {
		let dir = TempDir::new().expect("tempdir");
		fs::write(dir.path().join("main.rs"), "fn main() {}\n").expect("write");

		let mut finder = SearchOrchestrator::new(FinderConfig::default(), ModeRegistry::empty(), NoEvents);
		finder.show_file_search(dir.path());
		finder.wait_for_results(WAIT);
		assert_eq!(labels(&finder), vec!["main.rs"]);

		fs::write(dir.path().join("late.rs"), "").expect("write");
		finder.refresh();
		finder.wait_for_results(WAIT);
		assert_eq!(labels(&finder), vec!["main.rs"]);

		finder.dismiss();
		assert!(finder.snapshot().is_none());
		finder.show_file_search(dir.path());
		finder.wait_for_results(WAIT);
		assert_eq!(labels(&finder), vec!["late.rs", "main.rs"]);
	}
}
