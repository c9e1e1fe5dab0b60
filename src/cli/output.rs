use anyhow::Result;
use quickpick::{ModeRegistry, Selection};

use crate::workflow::WorkflowOutcome;

/// Print ranked results one per line, followed by the selection if any.
pub(crate) fn print_plain(outcome: &WorkflowOutcome, limit: Option<usize>) {
	let shown = limit.unwrap_or(outcome.results.len());
	for result in outcome.results.iter().take(shown) {
		match &result.candidate.detail {
			Some(detail) => println!("{:>5}  {}  ({detail})", result.score, result.label()),
			None => println!("{:>5}  {}", result.score, result.label()),
		}
	}
	if outcome.results.is_empty() {
		println!("No results in {} for '{}'", outcome.mode.title(), outcome.query);
	}

	match &outcome.selection {
		Some(Selection::File { path }) => println!("file: {}", path.display()),
		Some(Selection::Buffer { path }) => println!("buffer: {}", path.display()),
		Some(Selection::Content { path, line }) => println!("content: {}:{line}", path.display()),
		Some(Selection::Command { action }) => println!("command: {action}"),
		None => {}
	}
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &WorkflowOutcome, limit: Option<usize>) -> Result<String> {
	let shown = limit.unwrap_or(outcome.results.len()).min(outcome.results.len());
	let payload = serde_json::json!({
		"mode": outcome.mode,
		"query": outcome.query,
		"total": outcome.results.len(),
		"results": &outcome.results[..shown],
		"selection": outcome.selection,
		"events": outcome.events,
	});
	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &WorkflowOutcome, limit: Option<usize>) -> Result<()> {
	println!("{}", format_outcome_json(outcome, limit)?);
	Ok(())
}

/// Print the command catalog as `name<TAB>action` lines.
pub(crate) fn print_commands(registry: &ModeRegistry) {
	for entry in registry.commands() {
		println!("{}\t{}", entry.name, entry.action);
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use quickpick::{Candidate, FinderEvent, MatchResult, SearchMode};
	use serde_json::Value;

	use super::*;

	#[test]
	fn json_format_includes_results_and_selection() {
		let outcome = WorkflowOutcome {
			mode: SearchMode::Content,
			query: "todo".into(),
			results: vec![MatchResult::new(
				100,
				vec![13, 14, 15, 16],
				Candidate::line("notes.txt:2: TODO: fix bug", PathBuf::from("/w/notes.txt"), 2),
			)],
			selection: Some(Selection::Content {
				path: PathBuf::from("/w/notes.txt"),
				line: 2,
			}),
			events: vec![FinderEvent::ResultCountChanged { count: 1 }],
		};

		let json = format_outcome_json(&outcome, Some(10)).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["mode"], "content");
		assert_eq!(value["total"], 1);
		assert_eq!(value["results"][0]["candidate"]["label"], "notes.txt:2: TODO: fix bug");
		assert_eq!(value["results"][0]["candidate"]["payload"]["type"], "line");
		assert_eq!(value["selection"]["type"], "content");
		assert_eq!(value["selection"]["line"], 2);
		assert_eq!(value["events"][0]["event"], "result_count_changed");
	}

	#[test]
	fn json_limit_truncates_printed_results() {
		let outcome = WorkflowOutcome {
			mode: SearchMode::Commands,
			query: String::new(),
			results: vec![
				MatchResult::new(1, Vec::new(), Candidate::command("About", "about")),
				MatchResult::new(1, Vec::new(), Candidate::command("Find", "showFindDialog")),
			],
			selection: None,
			events: Vec::new(),
		};
		let value: Value =
			serde_json::from_str(&format_outcome_json(&outcome, Some(1)).expect("json")).expect("parse");
		assert_eq!(value["total"], 2);
		assert_eq!(value["results"].as_array().map(Vec::len), Some(1));
		assert!(value["selection"].is_null());
	}
}
