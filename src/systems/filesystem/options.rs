use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

/// Configuration options for the quick-open directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerOptions {
	/// Maximum number of directory levels below the root a file may sit at.
	/// Files directly inside the root are at depth 1.
	pub max_depth: usize,
	/// File extensions (without the dot) that are indexed.
	pub extensions: Vec<String>,
	/// Exact file names that are indexed regardless of extension.
	pub file_names: Vec<String>,
	/// Directory or file names that are never entered or indexed.
	pub excludes: Vec<String>,
	/// Respect `.gitignore` files found while walking.
	pub git_ignore: bool,
	/// Follow symbolic links during traversal.
	pub follow_symlinks: bool,
}

impl Default for IndexerOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
			file_names: DEFAULT_FILE_NAMES.iter().map(|name| name.to_string()).collect(),
			excludes: DEFAULT_EXCLUDES.iter().map(|name| name.to_string()).collect(),
			git_ignore: false,
			follow_symlinks: false,
		}
	}
}

pub const DEFAULT_MAX_DEPTH: usize = 8;

const DEFAULT_EXTENSIONS: &[&str] = &[
	"md", "txt", "cpp", "h", "hpp", "c", "py", "rs", "js", "ts", "jsx", "tsx", "json", "yaml",
	"yml", "toml", "html", "css", "scss", "sh", "bash", "zsh",
];

const DEFAULT_FILE_NAMES: &[&str] = &["CMakeLists.txt", "Makefile", "Cargo.toml"];

const DEFAULT_EXCLUDES: &[&str] = &[
	"node_modules",
	".git",
	".svn",
	".hg",
	"__pycache__",
	"target",
	"build",
	"dist",
	".cache",
	"vendor",
];

impl IndexerOptions {
	/// Compile the options into the lookup sets used during traversal.
	pub(crate) fn filter(&self) -> EntryFilter {
		EntryFilter {
			extensions: self
				.extensions
				.iter()
				.map(|ext| normalize_extension(ext))
				.filter(|ext| !ext.is_empty())
				.collect(),
			file_names: self.file_names.iter().cloned().collect(),
			excludes: self.excludes.iter().cloned().collect(),
		}
	}
}

/// Precomputed name checks for the walker.
#[derive(Debug, Clone)]
pub(crate) struct EntryFilter {
	extensions: HashSet<String>,
	file_names: HashSet<String>,
	excludes: HashSet<String>,
}

impl EntryFilter {
	/// Whether an entry below the root should be skipped entirely.
	pub(crate) fn is_excluded(&self, name: &OsStr) -> bool {
		let name = name.to_string_lossy();
		name.starts_with('.') || self.excludes.contains(name.as_ref())
	}

	/// Whether a file should be emitted into the index.
	pub(crate) fn is_indexed(&self, path: &Path) -> bool {
		let Some(name) = path.file_name().and_then(OsStr::to_str) else {
			return false;
		};
		if self.file_names.contains(name) {
			return true;
		}
		path.extension()
			.and_then(OsStr::to_str)
			.is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
	}
}

/// Normalize an extension by trimming and removing leading dots.
pub fn normalize_extension(ext: &str) -> String {
	ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
