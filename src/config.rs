//! Runtime configuration for the quick-open engine.

use std::time::Duration;

use crate::matcher::ScoreWeights;
use crate::systems::filesystem::IndexerOptions;
use crate::types::SearchMode;

/// Default quiescence delay between the last keystroke and the search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Maximum number of results kept per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
	pub files: usize,
	pub buffers: usize,
	pub commands: usize,
	pub content: usize,
}

impl Default for ResultLimits {
	fn default() -> Self {
		Self {
			files: 100,
			buffers: 100,
			commands: 100,
			content: 200,
		}
	}
}

impl ResultLimits {
	#[must_use]
	pub fn for_mode(&self, mode: SearchMode) -> usize {
		match mode {
			SearchMode::Files => self.files,
			SearchMode::Buffers => self.buffers,
			SearchMode::Commands => self.commands,
			SearchMode::Content => self.content,
		}
	}
}

/// Timing and truncation settings for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
	pub debounce: Duration,
	pub limits: ResultLimits,
}

impl Default for SearchSettings {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			limits: ResultLimits::default(),
		}
	}
}

/// Everything needed to build a [`SearchOrchestrator`](crate::SearchOrchestrator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinderConfig {
	pub indexer: IndexerOptions,
	pub search: SearchSettings,
	pub scoring: ScoreWeights,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn name_modes_cap_at_one_hundred_and_content_at_two_hundred() {
		let limits = ResultLimits::default();
		assert_eq!(limits.for_mode(SearchMode::Files), 100);
		assert_eq!(limits.for_mode(SearchMode::Buffers), 100);
		assert_eq!(limits.for_mode(SearchMode::Commands), 100);
		assert_eq!(limits.for_mode(SearchMode::Content), 200);
	}
}
