use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use serde::Serialize;

/// Notifications delivered to the host.
///
/// Exactly one of the `*_chosen` methods fires per completed selection.
/// Every method defaults to doing nothing.
pub trait FinderEvents {
	fn file_chosen(&mut self, _path: &Path) {}

	fn content_chosen(&mut self, _path: &Path, _line: usize) {}

	fn command_chosen(&mut self, _action: &str) {}

	fn buffer_chosen(&mut self, _path: &Path) {}

	/// A new result set replaced the previous one.
	fn result_count_changed(&mut self, _count: usize) {}
}

/// Host that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl FinderEvents for NoEvents {}

/// Owned form of a [`FinderEvents`] notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FinderEvent {
	FileChosen { path: PathBuf },
	ContentChosen { path: PathBuf, line: usize },
	CommandChosen { action: String },
	BufferChosen { path: PathBuf },
	ResultCountChanged { count: usize },
}

/// Records notifications in arrival order.
impl FinderEvents for Vec<FinderEvent> {
	fn file_chosen(&mut self, path: &Path) {
		self.push(FinderEvent::FileChosen {
			path: path.to_path_buf(),
		});
	}

	fn content_chosen(&mut self, path: &Path, line: usize) {
		self.push(FinderEvent::ContentChosen {
			path: path.to_path_buf(),
			line,
		});
	}

	fn command_chosen(&mut self, action: &str) {
		self.push(FinderEvent::CommandChosen {
			action: action.to_string(),
		});
	}

	fn buffer_chosen(&mut self, path: &Path) {
		self.push(FinderEvent::BufferChosen {
			path: path.to_path_buf(),
		});
	}

	fn result_count_changed(&mut self, count: usize) {
		self.push(FinderEvent::ResultCountChanged { count });
	}
}

/// Forwards notifications to another thread. A hung-up receiver is ignored.
impl FinderEvents for Sender<FinderEvent> {
	fn file_chosen(&mut self, path: &Path) {
		let _ = self.send(FinderEvent::FileChosen {
			path: path.to_path_buf(),
		});
	}

	fn content_chosen(&mut self, path: &Path, line: usize) {
		let _ = self.send(FinderEvent::ContentChosen {
			path: path.to_path_buf(),
			line,
		});
	}

	fn command_chosen(&mut self, action: &str) {
		let _ = self.send(FinderEvent::CommandChosen {
			action: action.to_string(),
		});
	}

	fn buffer_chosen(&mut self, path: &Path) {
		let _ = self.send(FinderEvent::BufferChosen {
			path: path.to_path_buf(),
		});
	}

	fn result_count_changed(&mut self, count: usize) {
		let _ = self.send(FinderEvent::ResultCountChanged { count });
	}
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;

	#[test]
	fn channel_sink_forwards_events() {
		let (mut tx, rx) = mpsc::channel();
		tx.content_chosen(Path::new("/notes.txt"), 2);
		tx.result_count_changed(1);
		let received: Vec<FinderEvent> = rx.try_iter().collect();
		assert_eq!(
			received,
			vec![
				FinderEvent::ContentChosen {
					path: PathBuf::from("/notes.txt"),
					line: 2
				},
				FinderEvent::ResultCountChanged { count: 1 },
			]
		);
	}

	#[test]
	fn events_serialize_with_a_tag() {
		let json = serde_json::to_string(&FinderEvent::CommandChosen {
			action: "openFile".into(),
		})
		.expect("serialize");
		assert_eq!(json, r#"{"event":"command_chosen","action":"openFile"}"#);
	}
}
