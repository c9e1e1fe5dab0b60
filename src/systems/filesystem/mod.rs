mod content;
mod options;
mod traversal;

use std::path::{Path, PathBuf};

pub use content::{ContentHit, LiteralPattern, scan_contents};
pub use options::{DEFAULT_MAX_DEPTH, IndexerOptions, normalize_extension};
pub use traversal::scan;

/// Immutable list of indexed files for one root.
///
/// Snapshots are rebuilt on root change and shared read-only between the
/// orchestrator and the search worker; they are never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSnapshot {
	root: PathBuf,
	files: Vec<PathBuf>,
}

impl IndexSnapshot {
	#[must_use]
	pub fn new(root: PathBuf, files: Vec<PathBuf>) -> Self {
		Self { root, files }
	}

	/// Snapshot for a root that could not be walked.
	#[must_use]
	pub fn empty(root: impl Into<PathBuf>) -> Self {
		Self::new(root.into(), Vec::new())
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Absolute paths in enumeration order.
	#[must_use]
	pub fn files(&self) -> &[PathBuf] {
		&self.files
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.files.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}

	/// Path of `path` relative to the root, with `/` separators.
	#[must_use]
	pub fn relative(&self, path: &Path) -> String {
		let relative = path.strip_prefix(&self.root).unwrap_or(path);
		relative.to_string_lossy().replace('\\', "/")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relative_paths_strip_the_root() {
		let snapshot = IndexSnapshot::new(
			PathBuf::from("/work"),
			vec![PathBuf::from("/work/src/main.rs")],
		);
		assert_eq!(snapshot.relative(&snapshot.files()[0]), "src/main.rs");
		assert_eq!(snapshot.relative(Path::new("/elsewhere/x.rs")), "/elsewhere/x.rs");
	}
}
