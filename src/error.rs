use thiserror::Error;

/// Errors that can occur when mutating the [`ModeRegistry`](crate::ModeRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
	/// A command was registered under a display name that already exists.
	#[error("command '{name}' is already registered")]
	DuplicateCommand { name: String },

	/// A command was registered with an empty display name or action id.
	#[error("command entries need a non-empty name and action (got name '{name}', action '{action}')")]
	EmptyCommand { name: String, action: String },
}

/// Raised when a string does not name a known search mode.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown search mode '{value}' (expected files, content, commands or buffers)")]
pub struct ModeParseError {
	pub value: String,
}
