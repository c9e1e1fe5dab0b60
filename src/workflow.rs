use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use quickpick::{FinderEvent, MatchResult, SearchMode, SearchOrchestrator, Selection};
use serde::Serialize;

use crate::settings::ResolvedConfig;

/// Upper bound on how long a single search may take before giving up.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// What a one-shot run produced.
#[derive(Debug, Serialize)]
pub(crate) struct WorkflowOutcome {
	pub(crate) mode: SearchMode,
	pub(crate) query: String,
	pub(crate) results: Vec<MatchResult>,
	pub(crate) selection: Option<Selection>,
	pub(crate) events: Vec<FinderEvent>,
}

/// Drives the orchestrator the way an editor would: show a mode, type the
/// query, wait for the debounced search and optionally pick a result.
pub(crate) struct SearchWorkflow {
	finder: SearchOrchestrator<Vec<FinderEvent>>,
	root: PathBuf,
	buffers: Vec<PathBuf>,
	mode: SearchMode,
	query: String,
	select: Option<usize>,
}

impl SearchWorkflow {
	pub(crate) fn from_config(
		config: ResolvedConfig,
		mode: SearchMode,
		query: String,
		buffers: Vec<PathBuf>,
		select: Option<usize>,
	) -> Result<Self> {
		let registry = config.registry()?;
		let ResolvedConfig { root, finder, .. } = config;
		Ok(Self {
			finder: SearchOrchestrator::new(finder, registry, Vec::new()),
			root,
			buffers,
			mode,
			query,
			select,
		})
	}

	pub(crate) fn run(mut self) -> Result<WorkflowOutcome> {
		match self.mode {
			SearchMode::Files => self.finder.show_file_search(self.root.clone()),
			SearchMode::Content => self.finder.show_content_search(self.root.clone()),
			SearchMode::Buffers => self.finder.show_buffer_search(self.buffers.clone()),
			SearchMode::Commands => self.finder.show_command_search(),
		}
		self.wait()?;

		if !self.query.is_empty() {
			let now = Instant::now();
			self.finder.set_query(self.query.clone(), now);
			self.finder.tick(now + self.finder.settings().debounce);
			self.wait()?;
		}

		let results = self.finder.results().to_vec();
		let selection = match self.select {
			Some(position) => match position
				.checked_sub(1)
				.and_then(|index| self.finder.select(index))
			{
				Some(selection) => Some(selection),
				None => bail!(
					"cannot select result {position}: only {} results",
					results.len()
				),
			},
			None => None,
		};

		Ok(WorkflowOutcome {
			mode: self.mode,
			query: self.query,
			results,
			selection,
			events: std::mem::take(self.finder.events_mut()),
		})
	}

	fn wait(&mut self) -> Result<()> {
		if !self.finder.wait_for_results(SEARCH_TIMEOUT) {
			bail!("search did not finish within {SEARCH_TIMEOUT:?}");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use quickpick::FinderConfig;
	use tempfile::tempdir;

	use super::*;

	fn config(root: PathBuf) -> ResolvedConfig {
		ResolvedConfig {
			root,
			finder: FinderConfig::default(),
			commands: Vec::new(),
		}
	}

	#[test]
	fn file_query_selects_the_top_match() {
		let dir = tempdir().expect("tempdir");
		fs::create_dir(dir.path().join("src")).expect("mkdir");
		fs::write(dir.path().join("src/main.rs"), "").expect("write");
		fs::write(dir.path().join("README.md"), "").expect("write");

		let outcome = SearchWorkflow::from_config(
			config(dir.path().to_path_buf()),
			SearchMode::Files,
			"main".into(),
			Vec::new(),
			Some(1),
		)
		.expect("workflow")
		.run()
		.expect("run");

		assert_eq!(outcome.results.len(), 1);
		let selection = outcome.selection.expect("selection");
		assert!(selection.path().expect("path").ends_with("src/main.rs"));
		assert!(outcome
			.events
			.iter()
			.any(|event| matches!(event, FinderEvent::FileChosen { .. })));
	}

	#[test]
	fn selecting_past_the_end_fails() {
		let outcome = SearchWorkflow::from_config(
			config(PathBuf::from("/")),
			SearchMode::Commands,
			"zzzzzz".into(),
			Vec::new(),
			Some(1),
		)
		.expect("workflow")
		.run();
		assert!(outcome.is_err());
	}
}
