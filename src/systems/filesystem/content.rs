use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::matcher::fold;
use crate::systems::search::ABORT_CHECK_INTERVAL;

use super::IndexSnapshot;

/// A single line containing the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHit {
	pub path: PathBuf,
	/// One-based line number.
	pub line: usize,
	/// Line text without the line terminator.
	pub text: String,
}

/// Case-insensitive literal needle prepared once per query.
#[derive(Debug, Clone)]
pub struct LiteralPattern {
	folded: Vec<char>,
}

impl LiteralPattern {
	#[must_use]
	pub fn new(query: &str) -> Self {
		Self {
			folded: query.chars().map(fold).collect(),
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.folded.is_empty()
	}

	/// Number of characters in the needle.
	#[must_use]
	pub fn len(&self) -> usize {
		self.folded.len()
	}

	/// Character index of the first occurrence of the needle in `haystack`.
	#[must_use]
	pub fn find_in(&self, haystack: &str) -> Option<usize> {
		if self.folded.is_empty() {
			return None;
		}
		let folded: Vec<char> = haystack.chars().map(fold).collect();
		folded
			.windows(self.folded.len())
			.position(|window| window == self.folded.as_slice())
	}
}

/// Scan every indexed file for lines containing `query` literally.
///
/// Hits are produced in index order, then line order, and scanning stops
/// once `limit` hits were collected or `keep_going` returns `false`.
/// `keep_going` is consulted before each file and every
/// `ABORT_CHECK_INTERVAL` lines within a file. Unreadable files are skipped.
pub fn scan_contents(
	snapshot: &IndexSnapshot,
	query: &str,
	limit: usize,
	mut keep_going: impl FnMut() -> bool,
) -> Vec<ContentHit> {
	let pattern = LiteralPattern::new(query);
	let mut hits = Vec::new();
	if pattern.is_empty() || limit == 0 {
		return hits;
	}

	for path in snapshot.files() {
		if !keep_going() {
			break;
		}
		if scan_file(path, &pattern, limit, &mut hits, &mut keep_going).is_break() {
			break;
		}
		if hits.len() >= limit {
			break;
		}
	}

	hits
}

/// Breaks when `keep_going` asked to stop part way through the file.
fn scan_file(
	path: &Path,
	pattern: &LiteralPattern,
	limit: usize,
	hits: &mut Vec<ContentHit>,
	keep_going: &mut impl FnMut() -> bool,
) -> ControlFlow<()> {
	let file = match File::open(path) {
		Ok(file) => file,
		Err(err) => {
			trace!(path = %path.display(), error = %err, "skipping unreadable file");
			return ControlFlow::Continue(());
		}
	};

	let mut reader = BufReader::new(file);
	let mut buf = Vec::new();
	let mut line_number = 0usize;

	while hits.len() < limit {
		buf.clear();
		match reader.read_until(b'\n', &mut buf) {
			Ok(0) => break,
			Ok(_) => {}
			Err(err) => {
				trace!(path = %path.display(), error = %err, "stopping read of file");
				break;
			}
		}
		line_number += 1;
		if line_number % ABORT_CHECK_INTERVAL == 0 && !keep_going() {
			trace!(path = %path.display(), line = line_number, "content scan interrupted");
			return ControlFlow::Break(());
		}

		let text = String::from_utf8_lossy(strip_line_ending(&buf));
		if pattern.find_in(&text).is_some() {
			hits.push(ContentHit {
				path: path.to_path_buf(),
				line: line_number,
				text: text.into_owned(),
			});
		}
	}
	ControlFlow::Continue(())
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
	let line = line.strip_suffix(b"\n").unwrap_or(line);
	line.strip_suffix(b"\r").unwrap_or(line)
}
