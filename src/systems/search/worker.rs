use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use tracing::{debug, trace};

use super::commands::{SearchCommand, SearchResult};
use super::streaming::{QueryContext, QueryToken, SearchData, SearchPass, run_query};
use crate::config::ResultLimits;
use crate::matcher::Matcher;

/// Launches the background search worker thread and returns communication channels.
pub(crate) fn spawn(
	matcher: Matcher,
	limits: ResultLimits,
) -> (
	Sender<SearchCommand>,
	Receiver<SearchResult>,
	Arc<AtomicU64>,
) {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();
	let latest_query_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_query_id);

	thread::spawn(move || {
		let mut worker = Worker {
			data: SearchData::default(),
			matcher,
			limits,
			latest_query_id: thread_latest,
		};
		worker.run(command_rx, result_tx);
	});

	(command_tx, result_rx, latest_query_id)
}

struct Worker {
	data: SearchData,
	matcher: Matcher,
	limits: ResultLimits,
	latest_query_id: Arc<AtomicU64>,
}

impl Worker {
	fn run(&mut self, command_rx: Receiver<SearchCommand>, result_tx: Sender<SearchResult>) {
		while let Ok(command) = command_rx.recv() {
			if !self.handle_command(&result_tx, command) {
				break;
			}
		}
		trace!("search worker stopped");
	}

	fn handle_command(&mut self, result_tx: &Sender<SearchResult>, command: SearchCommand) -> bool {
		match command {
			SearchCommand::Query { id, query, mode } => {
				let started = Instant::now();
				let context = QueryContext {
					data: &self.data,
					matcher: &self.matcher,
					limits: self.limits,
					token: QueryToken::tracked(id, self.latest_query_id.as_ref()),
				};
				match run_query(mode, &query, context) {
					SearchPass::Completed(results) => {
						debug!(
							id,
							%mode,
							count = results.len(),
							elapsed_ms = started.elapsed().as_millis() as u64,
							"search completed"
						);
						// The receiver is gone once the orchestrator drops.
						result_tx
							.send(SearchResult {
								id,
								mode,
								query,
								results,
							})
							.is_ok()
					}
					SearchPass::Aborted => {
						trace!(id, %mode, "search superseded");
						true
					}
				}
			}
			SearchCommand::Replace(data) => {
				self.data = data;
				true
			}
			SearchCommand::Shutdown => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use std::sync::atomic::Ordering;
	use std::time::Duration;

	use super::*;
	use crate::systems::filesystem::IndexSnapshot;
	use crate::types::SearchMode;

	fn data() -> SearchData {
		let root = PathBuf::from("/work");
		SearchData {
			snapshot: Arc::new(IndexSnapshot::new(
				root.clone(),
				vec![root.join("src/lib.rs"), root.join("README.md")],
			)),
			..SearchData::default()
		}
	}

	#[test]
	fn shutdown_command_stops_worker() {
		let (tx, rx, latest) = spawn(Matcher::default(), ResultLimits::default());
		assert_eq!(latest.load(Ordering::Relaxed), 0);
		tx.send(SearchCommand::Shutdown).expect("send shutdown");
		assert!(rx.recv_timeout(Duration::from_secs(1)).is_err());
	}

	#[test]
	fn results_are_forwarded_for_the_latest_query() {
		let (command_tx, result_rx, latest) = spawn(Matcher::default(), ResultLimits::default());
		command_tx
			.send(SearchCommand::Replace(data()))
			.expect("send data");
		latest.store(1, Ordering::Release);
		command_tx
			.send(SearchCommand::Query {
				id: 1,
				query: " readme ".to_string(),
				mode: SearchMode::Files,
			})
			.expect("send query");

		let result = result_rx
			.recv_timeout(Duration::from_secs(1))
			.expect("receive search result");

		assert_eq!(result.id, 1);
		assert_eq!(result.mode, SearchMode::Files);
		assert_eq!(result.query, " readme ");
		let labels: Vec<&str> = result.results.iter().map(|result| result.label()).collect();
		assert_eq!(labels, vec!["README.md"]);

		command_tx
			.send(SearchCommand::Shutdown)
			.expect("send shutdown");
	}

	#[test]
	fn superseded_queries_send_nothing() {
		let (command_tx, result_rx, latest) = spawn(Matcher::default(), ResultLimits::default());
		command_tx
			.send(SearchCommand::Replace(data()))
			.expect("send data");
		latest.store(2, Ordering::Release);
		for id in 1..=2 {
			command_tx
				.send(SearchCommand::Query {
					id,
					query: "lib".to_string(),
					mode: SearchMode::Files,
				})
				.expect("send query");
		}

		let result = result_rx
			.recv_timeout(Duration::from_secs(1))
			.expect("receive search result");
		assert_eq!(result.id, 2);
		assert!(result_rx.recv_timeout(Duration::from_millis(50)).is_err());
	}
}
