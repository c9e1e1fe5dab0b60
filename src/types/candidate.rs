use std::path::{Path, PathBuf};

use serde::Serialize;

/// What a candidate resolves to once the user picks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
	/// An indexed file, stored as an absolute path.
	File { path: PathBuf },
	/// An open buffer, stored as the path the host supplied.
	Buffer { path: PathBuf },
	/// A command action identifier.
	Command { action: String },
	/// A line inside an indexed file. Line numbers start at 1.
	Line { path: PathBuf, line: usize },
}

/// A searchable unit shown in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
	/// Text the query is matched against; match positions index into it.
	pub label: String,
	/// Secondary text shown next to the label, such as the full buffer path.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub detail: Option<String>,
	pub payload: Payload,
}

impl Candidate {
	/// Build a file candidate labelled with its path relative to the root.
	#[must_use]
	pub fn file(relative: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		Self {
			label: relative.into(),
			detail: None,
			payload: Payload::File { path: path.into() },
		}
	}

	/// Build a buffer candidate labelled with the file name of `path`.
	#[must_use]
	pub fn buffer(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		Self {
			label: file_name_of(&path),
			detail: Some(path.display().to_string()),
			payload: Payload::Buffer { path },
		}
	}

	/// Build a command candidate.
	#[must_use]
	pub fn command(name: impl Into<String>, action: impl Into<String>) -> Self {
		Self {
			label: name.into(),
			detail: None,
			payload: Payload::Command {
				action: action.into(),
			},
		}
	}

	/// Build a content candidate for one matching line.
	#[must_use]
	pub fn line(label: impl Into<String>, path: impl Into<PathBuf>, line: usize) -> Self {
		Self {
			label: label.into(),
			detail: None,
			payload: Payload::Line {
				path: path.into(),
				line,
			},
		}
	}

	/// Path carried by the payload, if any.
	#[must_use]
	pub fn path(&self) -> Option<&Path> {
		match &self.payload {
			Payload::File { path } | Payload::Buffer { path } | Payload::Line { path, .. } => {
				Some(path)
			}
			Payload::Command { .. } => None,
		}
	}
}

/// Return the final path component, falling back to the whole path.
pub(crate) fn file_name_of(path: &Path) -> String {
	path.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.to_string_lossy().into_owned())
}
