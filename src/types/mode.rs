use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeParseError;

/// Identifies which data set the quick-open surface is searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
	/// Fuzzy match over indexed file paths relative to the root.
	#[default]
	Files,
	/// Literal line search inside indexed files.
	Content,
	/// Fuzzy match over the command catalog.
	Commands,
	/// Fuzzy match over the file names of open buffers.
	Buffers,
}

impl SearchMode {
	/// Stable string identifier for the mode, used in configuration and output.
	#[must_use]
	pub const fn id(self) -> &'static str {
		match self {
			SearchMode::Files => "files",
			SearchMode::Content => "content",
			SearchMode::Commands => "commands",
			SearchMode::Buffers => "buffers",
		}
	}

	/// Human readable label for a mode header.
	#[must_use]
	pub const fn title(self) -> &'static str {
		match self {
			SearchMode::Files => "Files",
			SearchMode::Content => "Search in Files",
			SearchMode::Commands => "Commands",
			SearchMode::Buffers => "Open Buffers",
		}
	}

	/// List of all supported modes in their default order.
	#[must_use]
	pub const fn all() -> [SearchMode; 4] {
		[
			SearchMode::Files,
			SearchMode::Content,
			SearchMode::Commands,
			SearchMode::Buffers,
		]
	}

	/// Whether the mode searches the filesystem index of the current root.
	#[must_use]
	pub const fn uses_index(self) -> bool {
		matches!(self, SearchMode::Files | SearchMode::Content)
	}

	/// Whether an empty query lists every candidate in this mode.
	///
	/// Content search treats the empty query as "match nothing".
	#[must_use]
	pub const fn empty_query_matches_all(self) -> bool {
		!matches!(self, SearchMode::Content)
	}
}

impl fmt::Display for SearchMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}

impl FromStr for SearchMode {
	type Err = ModeParseError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let normalized = value.trim().to_ascii_lowercase();
		match normalized.as_str() {
			"files" | "file" => Ok(SearchMode::Files),
			"content" | "grep" => Ok(SearchMode::Content),
			"commands" | "command" => Ok(SearchMode::Commands),
			"buffers" | "buffer" => Ok(SearchMode::Buffers),
			_ => Err(ModeParseError {
				value: value.to_string(),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_round_trip_through_from_str() {
		for mode in SearchMode::all() {
			assert_eq!(mode.id().parse::<SearchMode>(), Ok(mode));
		}
	}

	#[test]
	fn unknown_mode_is_rejected() {
		let err = "symbols".parse::<SearchMode>().unwrap_err();
		assert_eq!(err.value, "symbols");
	}

	#[test]
	fn only_content_mode_rejects_empty_queries() {
		assert!(SearchMode::Files.empty_query_matches_all());
		assert!(SearchMode::Buffers.empty_query_matches_all());
		assert!(SearchMode::Commands.empty_query_matches_all());
		assert!(!SearchMode::Content.empty_query_matches_all());
	}
}
