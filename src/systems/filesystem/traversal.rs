use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::time::Instant;

use ignore::WalkBuilder;
use tracing::{debug, trace};

use super::{IndexSnapshot, IndexerOptions};

/// Walk `root` and collect every indexable file below it.
///
/// A missing or unreadable root produces an empty snapshot. Unreadable
/// entries below the root are skipped.
pub fn scan(root: impl AsRef<Path>, options: &IndexerOptions) -> IndexSnapshot {
	let requested = root.as_ref();
	let root = match fs::canonicalize(requested) {
		Ok(path) if path.is_dir() => path,
		Ok(path) => {
			debug!(root = %path.display(), "index root is not a directory");
			return IndexSnapshot::empty(requested);
		}
		Err(err) => {
			debug!(root = %requested.display(), error = %err, "index root is unavailable");
			return IndexSnapshot::empty(requested);
		}
	};

	let started = Instant::now();
	let filter = options.filter();
	let walk_filter = filter.clone();

	let walker = WalkBuilder::new(&root)
		.standard_filters(false)
		.git_ignore(options.git_ignore)
		.git_exclude(options.git_ignore)
		.require_git(false)
		.follow_links(options.follow_symlinks)
		.max_depth(Some(options.max_depth))
		.sort_by_file_path(listing_order)
		.filter_entry(move |entry| {
			entry.depth() == 0 || !walk_filter.is_excluded(entry.file_name())
		})
		.build();

	let mut files = Vec::new();
	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				trace!(error = %err, "skipping unreadable entry");
				continue;
			}
		};

		let Some(file_type) = entry.file_type() else {
			continue;
		};
		if !file_type.is_file() {
			continue;
		}
		if filter.is_indexed(entry.path()) {
			files.push(entry.into_path());
		}
	}

	debug!(
		root = %root.display(),
		files = files.len(),
		elapsed_ms = started.elapsed().as_millis() as u64,
		"index built"
	);

	IndexSnapshot::new(root, files)
}

/// Files come before subdirectories, each group ordered by name ignoring case.
fn listing_order(a: &Path, b: &Path) -> Ordering {
	a.is_dir()
		.cmp(&b.is_dir())
		.then_with(|| folded_name(a).cmp(&folded_name(b)))
		.then_with(|| a.file_name().cmp(&b.file_name()))
}

fn folded_name(path: &Path) -> String {
	path.file_name()
		.map(|name| name.to_string_lossy().to_lowercase())
		.unwrap_or_default()
}
