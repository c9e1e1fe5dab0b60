use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use super::aggregator::ScoreAggregator;
use super::tuning::{ABORT_CHECK_INTERVAL, CONTENT_LINE_CHARS, CONTENT_MATCH_SCORE};
use crate::config::ResultLimits;
use crate::matcher::Matcher;
use crate::registry::CommandEntry;
use crate::systems::filesystem::{IndexSnapshot, LiteralPattern, scan_contents};
use crate::types::{Candidate, MatchResult, SearchMode, file_name_of};

/// Everything the search routines read. Cloning only bumps reference counts.
#[derive(Debug, Clone, Default)]
pub struct SearchData {
	pub snapshot: Arc<IndexSnapshot>,
	pub buffers: Arc<[PathBuf]>,
	pub commands: Arc<[CommandEntry]>,
}

/// Identifies a query so long running passes can notice they were superseded.
#[derive(Clone, Copy, Debug)]
pub struct QueryToken<'a> {
	id: u64,
	latest: Option<&'a AtomicU64>,
}

impl<'a> QueryToken<'a> {
	/// Token for a synchronous call that can never be superseded.
	#[must_use]
	pub fn detached() -> Self {
		Self { id: 0, latest: None }
	}

	/// Token tied to the shared latest-query counter.
	#[must_use]
	pub fn tracked(id: u64, latest: &'a AtomicU64) -> Self {
		Self {
			id,
			latest: Some(latest),
		}
	}

	#[must_use]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Whether a newer query has been issued since this one.
	#[must_use]
	pub fn is_stale(&self) -> bool {
		self.latest
			.is_some_and(|latest| latest.load(AtomicOrdering::Acquire) != self.id)
	}
}

/// Result of a single search pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPass {
	Completed(Vec<MatchResult>),
	/// A newer query superseded this one; nothing should be delivered.
	Aborted,
}

impl SearchPass {
	/// Results of a completed pass, or `None` when the pass was aborted.
	#[must_use]
	pub fn into_results(self) -> Option<Vec<MatchResult>> {
		match self {
			SearchPass::Completed(results) => Some(results),
			SearchPass::Aborted => None,
		}
	}
}

/// Shared inputs for one search pass.
#[derive(Clone, Copy, Debug)]
pub struct QueryContext<'a> {
	pub data: &'a SearchData,
	pub matcher: &'a Matcher,
	pub limits: ResultLimits,
	pub token: QueryToken<'a>,
}

/// Dispatch `query` to the routine for `mode`.
///
/// Surrounding whitespace is ignored, so an all-blank query is the empty
/// query.
pub fn run_query(mode: SearchMode, query: &str, context: QueryContext<'_>) -> SearchPass {
	let query = query.trim();
	if query.is_empty() && !mode.empty_query_matches_all() {
		return SearchPass::Completed(Vec::new());
	}
	let limit = context.limits.for_mode(mode);
	match mode {
		SearchMode::Files => search_files(&context.data.snapshot, query, limit, context),
		SearchMode::Buffers => search_buffers(&context.data.buffers, query, limit, context),
		SearchMode::Commands => search_commands(&context.data.commands, query, limit, context),
		SearchMode::Content => search_content(&context.data.snapshot, query, limit, context.token),
	}
}

/// A list of candidates the fuzzy matcher can rank.
trait Dataset {
	fn len(&self) -> usize;

	/// Text matched against the query for `index`.
	fn key_for(&self, index: usize) -> Cow<'_, str>;

	fn candidate(&self, index: usize) -> Candidate;
}

struct IndexedFiles<'a>(&'a IndexSnapshot);

impl Dataset for IndexedFiles<'_> {
	fn len(&self) -> usize {
		self.0.len()
	}

	fn key_for(&self, index: usize) -> Cow<'_, str> {
		Cow::Owned(self.0.relative(&self.0.files()[index]))
	}

	fn candidate(&self, index: usize) -> Candidate {
		let path = &self.0.files()[index];
		Candidate::file(self.0.relative(path), path.clone())
	}
}

impl Dataset for [PathBuf] {
	fn len(&self) -> usize {
		<[PathBuf]>::len(self)
	}

	fn key_for(&self, index: usize) -> Cow<'_, str> {
		Cow::Owned(file_name_of(&self[index]))
	}

	fn candidate(&self, index: usize) -> Candidate {
		Candidate::buffer(self[index].clone())
	}
}

impl Dataset for [CommandEntry] {
	fn len(&self) -> usize {
		<[CommandEntry]>::len(self)
	}

	fn key_for(&self, index: usize) -> Cow<'_, str> {
		Cow::Borrowed(&self[index].name)
	}

	fn candidate(&self, index: usize) -> Candidate {
		let entry = &self[index];
		Candidate::command(entry.name.clone(), entry.action.clone())
	}
}

/// Rank indexed files by their path relative to the root.
pub fn search_files(
	snapshot: &IndexSnapshot,
	query: &str,
	limit: usize,
	context: QueryContext<'_>,
) -> SearchPass {
	rank_dataset(&IndexedFiles(snapshot), query, limit, context)
}

/// Rank open buffers by file name.
pub fn search_buffers(
	buffers: &[PathBuf],
	query: &str,
	limit: usize,
	context: QueryContext<'_>,
) -> SearchPass {
	rank_dataset(buffers, query, limit, context)
}

/// Rank catalog commands by display name.
pub fn search_commands(
	commands: &[CommandEntry],
	query: &str,
	limit: usize,
	context: QueryContext<'_>,
) -> SearchPass {
	rank_dataset(commands, query, limit, context)
}

fn rank_dataset<D>(dataset: &D, query: &str, limit: usize, context: QueryContext<'_>) -> SearchPass
where
	D: Dataset + ?Sized,
{
	let token = context.token;
	let mut aggregator = ScoreAggregator::new(limit);

	for index in 0..dataset.len() {
		if index % ABORT_CHECK_INTERVAL == 0 && token.is_stale() {
			return SearchPass::Aborted;
		}
		let key = dataset.key_for(index);
		if let Some(found) = context.matcher.score(query, &key) {
			aggregator.push(index, found.score, found.positions);
		}
	}

	if token.is_stale() {
		return SearchPass::Aborted;
	}

	let results = aggregator
		.finish()
		.into_iter()
		.map(|ranked| MatchResult::new(ranked.score, ranked.positions, dataset.candidate(ranked.index)))
		.collect();
	SearchPass::Completed(results)
}

/// Literal, case-insensitive line search over the indexed files.
///
/// Every hit carries the same relevance, so results stay in path then line
/// order. Labels show at most `CONTENT_LINE_CHARS` characters of the trimmed
/// line; a match cut off by that limit is shown without highlight positions.
/// The empty query matches nothing.
pub fn search_content(
	snapshot: &IndexSnapshot,
	query: &str,
	limit: usize,
	token: QueryToken<'_>,
) -> SearchPass {
	if query.is_empty() {
		return SearchPass::Completed(Vec::new());
	}

	let pattern = LiteralPattern::new(query);
	let hits = scan_contents(snapshot, query, limit, || !token.is_stale());
	if token.is_stale() {
		return SearchPass::Aborted;
	}

	let results = hits
		.into_iter()
		.map(|hit| {
			let prefix = format!("{}:{}: ", snapshot.relative(&hit.path), hit.line);
			let shown: String = hit.text.trim().chars().take(CONTENT_LINE_CHARS).collect();
			let positions = pattern
				.find_in(&shown)
				.map(|offset| {
					let start = prefix.chars().count() + offset;
					(start..start + pattern.len()).collect()
				})
				.unwrap_or_default();
			let label = format!("{prefix}{shown}");
			MatchResult::new(
				CONTENT_MATCH_SCORE,
				positions,
				Candidate::line(label, hit.path, hit.line),
			)
		})
		.collect();
	SearchPass::Completed(results)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::ModeRegistry;

	fn data_with_files(files: &[&str]) -> SearchData {
		let root = PathBuf::from("/work");
		let files = files.iter().map(|file| root.join(file)).collect();
		SearchData {
			snapshot: Arc::new(IndexSnapshot::new(root, files)),
			..SearchData::default()
		}
	}

	fn run(data: &SearchData, mode: SearchMode, query: &str) -> Vec<MatchResult> {
		let matcher = Matcher::default();
		let context = QueryContext {
			data,
			matcher: &matcher,
			limits: ResultLimits::default(),
			token: QueryToken::detached(),
		};
		run_query(mode, query, context)
			.into_results()
			.expect("detached queries never abort")
	}

	fn labels(results: &[MatchResult]) -> Vec<&str> {
		results.iter().map(MatchResult::label).collect()
	}

	#[test]
	fn files_match_on_the_relative_path() {
		let data = data_with_files(&["src/main.rs", "src/lib.rs", "README.md"]);
		let results = run(&data, SearchMode::Files, "main");
		assert_eq!(labels(&results), vec!["src/main.rs"]);
		assert_eq!(results[0].positions, vec![4, 5, 6, 7]);
	}

	#[test]
	fn empty_query_lists_everything_in_enumeration_order() {
		let data = data_with_files(&["b.rs", "a.rs", "c.rs"]);
		let results = run(&data, SearchMode::Files, "   ");
		assert_eq!(labels(&results), vec!["b.rs", "a.rs", "c.rs"]);
		assert!(results.iter().all(|result| result.score == 1));
	}

	#[test]
	fn file_results_are_capped_to_the_best_scores() {
		let names: Vec<String> = (0..150)
			.map(|index| format!("{}match{index:03}.rs", "x".repeat(index % 7)))
			.collect();
		let refs: Vec<&str> = names.iter().map(String::as_str).collect();
		let data = data_with_files(&refs);

		let results = run(&data, SearchMode::Files, "match");
		assert_eq!(results.len(), 100);

		let matcher = Matcher::default();
		let mut expected: Vec<(u32, usize)> = names
			.iter()
			.enumerate()
			.map(|(index, name)| (matcher.score("match", name).expect("match").score, index))
			.collect();
		expected.sort_by(|a, b| b.0.cmp(&a.0));
		let expected: Vec<&str> = expected[..100]
			.iter()
			.map(|(_, index)| names[*index].as_str())
			.collect();
		assert_eq!(labels(&results), expected);
	}

	#[test]
	fn buffers_match_on_file_name_only() {
		let data = SearchData {
			buffers: vec![PathBuf::from("/main/other.rs"), PathBuf::from("/x/main.rs")].into(),
			..SearchData::default()
		};
		let results = run(&data, SearchMode::Buffers, "main");
		assert_eq!(labels(&results), vec!["main.rs"]);
		assert_eq!(results[0].candidate.detail.as_deref(), Some("/x/main.rs"));
	}

	#[test]
	fn commands_carry_action_ids() {
		let mut registry = ModeRegistry::empty();
		registry
			.register_commands([("New File", "newFile"), ("Open File", "openFile")])
			.expect("register");
		let data = SearchData {
			commands: registry.command_table(),
			..SearchData::default()
		};
		let results = run(&data, SearchMode::Commands, "of");
		assert_eq!(labels(&results), vec!["Open File"]);
		assert_eq!(
			results[0].candidate.payload,
			crate::types::Payload::Command {
				action: "openFile".into()
			}
		);
	}

	#[test]
	fn stale_tokens_abort_without_results() {
		let data = data_with_files(&["src/main.rs"]);
		let matcher = Matcher::default();
		let latest = AtomicU64::new(7);
		let context = QueryContext {
			data: &data,
			matcher: &matcher,
			limits: ResultLimits::default(),
			token: QueryToken::tracked(6, &latest),
		};
		assert_eq!(run_query(SearchMode::Files, "main", context), SearchPass::Aborted);
	}

	#[test]
	fn content_labels_keep_eighty_characters_of_the_line() {
		let dir = tempfile::TempDir::new().expect("tempdir");
		let early = format!("  needle {}", "x".repeat(120));
		let late = format!("{}needle tail", "y".repeat(78));
		let path = dir.path().join("long.txt");
		std::fs::write(&path, format!("{early}\n{late}\n")).expect("write");
		let data = SearchData {
			snapshot: Arc::new(IndexSnapshot::new(dir.path().to_path_buf(), vec![path])),
			..SearchData::default()
		};

		let results = run(&data, SearchMode::Content, "NEEDLE");
		assert_eq!(results.len(), 2);

		let first = results[0].label();
		let prefix = "long.txt:1: ";
		assert!(first.starts_with(prefix));
		assert_eq!(first[prefix.len()..].chars().count(), CONTENT_LINE_CHARS);
		assert!(first.ends_with('x'));
		let start = prefix.chars().count();
		assert_eq!(results[0].positions, (start..start + 6).collect::<Vec<_>>());

		let second = results[1].label();
		assert_eq!(second, format!("long.txt:2: {}ne", "y".repeat(78)));
		assert!(results[1].positions.is_empty());
	}

	#[test]
	fn content_empty_query_yields_nothing() {
		let data = data_with_files(&["src/main.rs"]);
		assert!(run(&data, SearchMode::Content, "").is_empty());
	}
}
