//! Command catalog and open-buffer list consumed by the command and buffer modes.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::RegistryError;

/// A command palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
	/// Text shown to and matched against the user's query.
	pub name: String,
	/// Identifier handed back to the host when the command is chosen.
	pub action: String,
}

/// Built-in editor commands as `(display name, action id)`.
const DEFAULT_COMMANDS: &[(&str, &str)] = &[
	("New File", "newFile"),
	("Open File", "openFile"),
	("Save File", "saveFile"),
	("Save As", "saveFileAs"),
	("Close Tab", "closeTab"),
	("Find", "showFindDialog"),
	("Replace", "showReplaceDialog"),
	("Go to Line", "showGoToLineDialog"),
	("Toggle Preview", "toggleViewMode"),
	("Toggle File Tree", "toggleFileTree"),
	("Zoom In", "zoomIn"),
	("Zoom Out", "zoomOut"),
	("Reset Zoom", "resetZoom"),
	("Fold All", "foldAll"),
	("Unfold All", "unfoldAll"),
	("Toggle VIM Mode", "toggleVimMode"),
	("Regex Helper", "showRegexHelper"),
	("Command Helper", "showCommandHelper"),
	("Shell Checker", "showShellChecker"),
	("Preferences", "showPreferences"),
	("About", "about"),
	("Theme: Dark", "themeDefault"),
	("Theme: Light", "themeLight"),
	("Theme: Dracula", "themeDracula"),
	("Theme: Monokai", "themeMonokai"),
	("Theme: Nord", "themeNord"),
	("Theme: One Dark", "themeOneDark"),
	("Theme: CyberPunk", "themeCyberPunk"),
	("Theme: Matrix", "themeMatrix"),
];

/// Holds the command catalog and the caller-supplied open buffers.
///
/// Commands enumerate in display-name order, buffers in the order the host
/// supplied them.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
	commands: BTreeMap<String, String>,
	buffers: Vec<PathBuf>,
}

impl ModeRegistry {
	/// Create a registry without any commands or buffers.
	#[must_use]
	pub fn empty() -> Self {
		Self::default()
	}

	/// Create a registry preloaded with the built-in editor commands.
	#[must_use]
	pub fn with_default_commands() -> Self {
		let mut registry = Self::empty();
		for (name, action) in DEFAULT_COMMANDS {
			registry
				.commands
				.insert((*name).to_string(), (*action).to_string());
		}
		registry
	}

	/// Register a command under a unique display name.
	pub fn register_command(
		&mut self,
		name: impl Into<String>,
		action: impl Into<String>,
	) -> Result<(), RegistryError> {
		let name = name.into();
		let action = action.into();
		if name.trim().is_empty() || action.trim().is_empty() {
			return Err(RegistryError::EmptyCommand { name, action });
		}
		if self.commands.contains_key(&name) {
			return Err(RegistryError::DuplicateCommand { name });
		}
		self.commands.insert(name, action);
		Ok(())
	}

	/// Register every `(name, action)` pair, stopping at the first conflict.
	pub fn register_commands<I, N, A>(&mut self, commands: I) -> Result<(), RegistryError>
	where
		I: IntoIterator<Item = (N, A)>,
		N: Into<String>,
		A: Into<String>,
	{
		for (name, action) in commands {
			self.register_command(name, action)?;
		}
		Ok(())
	}

	/// Look up the action id registered for a display name.
	#[must_use]
	pub fn action_for(&self, name: &str) -> Option<&str> {
		self.commands.get(name).map(String::as_str)
	}

	/// Iterate over the catalog in enumeration order.
	pub fn commands(&self) -> impl Iterator<Item = CommandEntry> + '_ {
		self.commands.iter().map(|(name, action)| CommandEntry {
			name: name.clone(),
			action: action.clone(),
		})
	}

	#[must_use]
	pub fn command_count(&self) -> usize {
		self.commands.len()
	}

	/// Replace the list of open buffers.
	pub fn set_buffers<I, P>(&mut self, buffers: I)
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.buffers = buffers.into_iter().map(Into::into).collect();
	}

	#[must_use]
	pub fn buffers(&self) -> &[PathBuf] {
		&self.buffers
	}

	/// Freeze the catalog into a shareable slice for the search worker.
	pub(crate) fn command_table(&self) -> Arc<[CommandEntry]> {
		self.commands().collect()
	}

	pub(crate) fn buffer_table(&self) -> Arc<[PathBuf]> {
		self.buffers.iter().cloned().collect()
	}
}
