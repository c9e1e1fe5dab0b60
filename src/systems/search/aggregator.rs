use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::BinaryHeap;

/// A scored candidate, identified by its enumeration index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RankedMatch {
	pub(crate) index: usize,
	pub(crate) score: u32,
	pub(crate) positions: Vec<usize>,
}

impl Ord for RankedMatch {
	fn cmp(&self, other: &Self) -> CmpOrdering {
		self.score
			.cmp(&other.score)
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl PartialOrd for RankedMatch {
	fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
		Some(self.cmp(other))
	}
}

/// Keeps the `limit` best matches for a query.
///
/// Ordering is by descending score with ties broken by ascending enumeration
/// index, which is exactly what a stable sort over the enumeration followed
/// by truncation would produce.
pub(crate) struct ScoreAggregator {
	limit: usize,
	heap: BinaryHeap<Reverse<RankedMatch>>,
}

impl ScoreAggregator {
	pub(crate) fn new(limit: usize) -> Self {
		Self {
			limit,
			heap: BinaryHeap::with_capacity(limit.min(1_024)),
		}
	}

	/// Offer a match; returns whether it entered the kept set.
	pub(crate) fn push(&mut self, index: usize, score: u32, positions: Vec<usize>) -> bool {
		if self.limit == 0 {
			return false;
		}

		let entry = RankedMatch {
			index,
			score,
			positions,
		};
		if self.heap.len() < self.limit {
			self.heap.push(Reverse(entry));
			true
		} else if let Some(mut current_min) = self.heap.peek_mut() {
			if entry > current_min.0 {
				*current_min = Reverse(entry);
				true
			} else {
				false
			}
		} else {
			false
		}
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.heap.len()
	}

	/// Consume the aggregator and return the kept matches, best first.
	pub(crate) fn finish(self) -> Vec<RankedMatch> {
		let mut ranked: Vec<RankedMatch> = self.heap.into_iter().map(|entry| entry.0).collect();
		ranked.sort_unstable_by(|a, b| b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
		ranked
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn indices(ranked: &[RankedMatch]) -> Vec<usize> {
		ranked.iter().map(|entry| entry.index).collect()
	}

	#[test]
	fn orders_by_score_then_enumeration() {
		let mut aggregator = ScoreAggregator::new(10);
		for (index, score) in [(0, 5), (1, 9), (2, 5), (3, 9), (4, 1)] {
			aggregator.push(index, score, Vec::new());
		}
		assert_eq!(indices(&aggregator.finish()), vec![1, 3, 0, 2, 4]);
	}

	#[test]
	fn truncation_drops_the_tail_and_keeps_earliest_ties() {
		let mut aggregator = ScoreAggregator::new(3);
		for (index, score) in [(0, 2), (1, 7), (2, 2), (3, 2), (4, 8)] {
			aggregator.push(index, score, Vec::new());
		}
		assert_eq!(aggregator.len(), 3);
		assert_eq!(indices(&aggregator.finish()), vec![4, 1, 0]);
	}

	#[test]
	fn zero_limit_keeps_nothing() {
		let mut aggregator = ScoreAggregator::new(0);
		assert!(!aggregator.push(0, 100, Vec::new()));
		assert!(aggregator.finish().is_empty());
	}
}
