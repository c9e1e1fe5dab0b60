use std::path::PathBuf;

use serde::Serialize;

use super::candidate::{Candidate, Payload};

/// A ranked match ready to be shown to the user.
///
/// `positions` holds the character indices of `candidate.label` consumed by
/// the query, in strictly increasing order. A result is only ever built for a
/// successful match, so `score` is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
	pub score: u32,
	pub positions: Vec<usize>,
	pub candidate: Candidate,
}

impl MatchResult {
	#[must_use]
	pub fn new(score: u32, positions: Vec<usize>, candidate: Candidate) -> Self {
		Self {
			score,
			positions,
			candidate,
		}
	}

	/// Text the query was matched against.
	#[must_use]
	pub fn label(&self) -> &str {
		&self.candidate.label
	}
}

/// The resolved choice handed back to the host once the user picks a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Selection {
	File { path: PathBuf },
	Buffer { path: PathBuf },
	Content { path: PathBuf, line: usize },
	Command { action: String },
}

impl From<&Payload> for Selection {
	fn from(payload: &Payload) -> Self {
		match payload {
			Payload::File { path } => Selection::File { path: path.clone() },
			Payload::Buffer { path } => Selection::Buffer { path: path.clone() },
			Payload::Line { path, line } => Selection::Content {
				path: path.clone(),
				line: *line,
			},
			Payload::Command { action } => Selection::Command {
				action: action.clone(),
			},
		}
	}
}

impl Selection {
	/// Return the selected file path, if the selection carries one.
	#[must_use]
	pub fn path(&self) -> Option<&std::path::Path> {
		match self {
			Selection::File { path }
			| Selection::Buffer { path }
			| Selection::Content { path, .. } => Some(path),
			Selection::Command { .. } => None,
		}
	}

	/// Return the selected command action, if the user picked a command.
	#[must_use]
	pub fn command(&self) -> Option<&str> {
		match self {
			Selection::Command { action } => Some(action),
			_ => None,
		}
	}
}

impl From<&MatchResult> for Selection {
	fn from(result: &MatchResult) -> Self {
		Selection::from(&result.candidate.payload)
	}
}
