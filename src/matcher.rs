//! Greedy, single pass subsequence matcher used by the name based modes.
//!
//! The candidate is walked left to right and every character that equals the
//! next pending query character (case-insensitively) is consumed. The first
//! viable alignment wins; alternative alignments are never explored, so two
//! candidates containing the same characters can rank differently depending on
//! where the earliest occurrence sits.

use serde::Deserialize;

/// Score contributions applied while walking a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
	/// Awarded for every matched character.
	pub base: u32,
	/// Multiplied by the length of the current run of adjacent matches.
	pub consecutive_step: u32,
	/// Match at candidate index 0.
	pub start_of_string: u32,
	/// Match directly after one of `/ _ - .`.
	pub word_boundary: u32,
	/// Uppercase match directly after a lowercase character.
	pub camel_case: u32,
	/// Matched character has the same case as the query character.
	pub exact_case: u32,
	/// Candidate and query have the same length.
	pub exact_length: u32,
	/// Subtracted for every candidate character beyond the query length.
	pub length_penalty: u32,
	/// Score given to every candidate when the query is empty.
	pub empty_query: u32,
	/// Lower bound for a successful match.
	pub min_score: u32,
}

impl Default for ScoreWeights {
	fn default() -> Self {
		Self {
			base: 10,
			consecutive_step: 20,
			start_of_string: 50,
			word_boundary: 30,
			camel_case: 20,
			exact_case: 5,
			exact_length: 100,
			length_penalty: 1,
			empty_query: 1,
			min_score: 1,
		}
	}
}

/// Outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
	pub score: u32,
	/// Character indices into the candidate, strictly increasing, one per
	/// query character.
	pub positions: Vec<usize>,
}

/// Positional fuzzy scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
	weights: ScoreWeights,
}

impl Matcher {
	#[must_use]
	pub fn new(weights: ScoreWeights) -> Self {
		Self { weights }
	}

	#[must_use]
	pub fn weights(&self) -> &ScoreWeights {
		&self.weights
	}

	/// Score `candidate` against `query`.
	///
	/// Returns `None` when `query` is not a case-insensitive subsequence of
	/// `candidate`. A returned score is never zero.
	#[must_use]
	pub fn score(&self, query: &str, candidate: &str) -> Option<FuzzyMatch> {
		let weights = &self.weights;
		let floor = i64::from(weights.min_score.max(1));

		if query.is_empty() {
			return Some(FuzzyMatch {
				score: weights.empty_query.max(1),
				positions: Vec::new(),
			});
		}

		let pattern: Vec<char> = query.chars().collect();
		let mut positions = Vec::with_capacity(pattern.len());
		let mut score: i64 = 0;
		let mut consecutive: i64 = 0;
		let mut last_match: Option<usize> = None;
		let mut prev: Option<char> = None;
		let mut text_len = 0usize;

		for (index, ch) in candidate.chars().enumerate() {
			text_len = index + 1;
			let Some(&wanted) = pattern.get(positions.len()) else {
				// Query exhausted; keep counting for the length penalty.
				continue;
			};

			if fold(ch) == fold(wanted) {
				if last_match.is_some_and(|last| last + 1 == index) {
					consecutive += 1;
					score += consecutive * i64::from(weights.consecutive_step);
				} else {
					consecutive = 0;
				}

				if index == 0 {
					score += i64::from(weights.start_of_string);
				}

				if let Some(prev) = prev {
					if is_word_separator(prev) {
						score += i64::from(weights.word_boundary);
					}
					if ch.is_uppercase() && prev.is_lowercase() {
						score += i64::from(weights.camel_case);
					}
				}

				if ch == wanted {
					score += i64::from(weights.exact_case);
				}

				score += i64::from(weights.base);
				last_match = Some(index);
				positions.push(index);
			}

			prev = Some(ch);
		}

		if positions.len() < pattern.len() {
			return None;
		}

		let surplus = text_len.saturating_sub(pattern.len());
		score -= surplus as i64 * i64::from(weights.length_penalty);
		if surplus == 0 {
			score += i64::from(weights.exact_length);
		}

		let score = u32::try_from(score.max(floor)).unwrap_or(u32::MAX);
		Some(FuzzyMatch { score, positions })
	}
}

/// Score `candidate` against `query` with the default weights.
#[must_use]
pub fn score(query: &str, candidate: &str) -> Option<FuzzyMatch> {
	Matcher::default().score(query, candidate)
}

fn is_word_separator(ch: char) -> bool {
	matches!(ch, '/' | '_' | '-' | '.')
}

/// Single character case fold that keeps indices aligned with `chars()`.
pub(crate) fn fold(ch: char) -> char {
	if ch.is_ascii() {
		ch.to_ascii_lowercase()
	} else {
		ch.to_lowercase().next().unwrap_or(ch)
	}
}
