use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use config::{Config, ConfigError, File};
use serde::Deserialize;
use thiserror::Error;

use quickpick::systems::filesystem::normalize_extension;
use quickpick::{FinderConfig, IndexerOptions, ModeRegistry, ResultLimits, ScoreWeights, app_dirs};

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	indexer: IndexerSection,
	search: SearchSection,
	scoring: ScoreWeights,
	commands: Vec<CommandSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct IndexerSection {
	root: Option<PathBuf>,
	max_depth: Option<usize>,
	extensions: Option<Vec<String>>,
	file_names: Option<Vec<String>>,
	excludes: Option<Vec<String>>,
	git_ignore: Option<bool>,
	follow_symlinks: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	debounce_ms: Option<u64>,
	file_limit: Option<usize>,
	buffer_limit: Option<usize>,
	command_limit: Option<usize>,
	content_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommandSection {
	name: String,
	action: String,
}

/// A configuration value outside its accepted range.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum SettingsError {
	#[error("{key} must be greater than zero (got {value})")]
	NotPositive { key: &'static str, value: usize },
	#[error("{key} must not be empty")]
	EmptyList { key: &'static str },
}

pub(crate) struct ResolvedConfig {
	pub(crate) root: PathBuf,
	pub(crate) finder: FinderConfig,
	pub(crate) commands: Vec<(String, String)>,
}

impl ResolvedConfig {
	/// Built-in command catalog extended with the configured commands.
	pub(crate) fn registry(&self) -> Result<ModeRegistry> {
		let mut registry = ModeRegistry::with_default_commands();
		for (name, action) in &self.commands {
			registry
				.register_command(name.clone(), action.clone())
				.context("invalid [[commands]] entry")?;
		}
		Ok(registry)
	}

	pub(crate) fn print_summary(&self) {
		let indexer = &self.finder.indexer;
		let search = &self.finder.search;
		println!("Effective configuration:");
		println!("  Root: {}", self.root.display());
		println!("  Max depth: {}", indexer.max_depth);
		println!("  Extensions: {}", indexer.extensions.join(", "));
		println!("  File names: {}", indexer.file_names.join(", "));
		println!("  Excludes: {}", indexer.excludes.join(", "));
		println!("  Git ignore: {}", bool_to_word(indexer.git_ignore));
		println!("  Follow symlinks: {}", bool_to_word(indexer.follow_symlinks));
		println!("  Debounce: {} ms", search.debounce.as_millis());
		println!(
			"  Limits: files {}, buffers {}, commands {}, content {}",
			search.limits.files, search.limits.buffers, search.limits.commands, search.limits.content
		);
		println!("  Scoring: {:?}", self.finder.scoring);
		if !self.commands.is_empty() {
			println!("  Extra commands: {}", self.commands.len());
		}
	}
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("QUICKPICK")
			.separator("__")
			.try_parsing(true)
			.list_separator(",")
			.with_list_parse_key("indexer.extensions")
			.with_list_parse_key("indexer.file_names")
			.with_list_parse_key("indexer.excludes"),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".quickpick.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.indexer.root = Some(root);
		}
		if let Some(value) = cli.max_depth {
			self.indexer.max_depth = Some(value);
		}
		if let Some(value) = &cli.extensions {
			self.indexer.extensions = Some(value.clone());
		}
		if let Some(value) = &cli.excludes {
			self.indexer.excludes = Some(value.clone());
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let mut root = match self.indexer.root {
			Some(path) => path,
			None => env::current_dir().context("failed to determine working directory")?,
		};
		if root.is_relative() {
			root = env::current_dir()
				.context("failed to resolve current directory for root")?
				.join(root);
		}

		let mut indexer = IndexerOptions::default();
		if let Some(depth) = self.indexer.max_depth {
			indexer.max_depth = positive("indexer.max_depth", depth)?;
		}
		if let Some(extensions) = self.indexer.extensions {
			indexer.extensions = sanitize_extensions(extensions);
			if indexer.extensions.is_empty() {
				return Err(SettingsError::EmptyList {
					key: "indexer.extensions",
				}
				.into());
			}
		}
		if let Some(names) = self.indexer.file_names {
			indexer.file_names = sanitize_names(names);
		}
		if let Some(excludes) = self.indexer.excludes {
			indexer.excludes = sanitize_names(excludes);
		}
		indexer.git_ignore = self.indexer.git_ignore.unwrap_or(indexer.git_ignore);
		indexer.follow_symlinks = self
			.indexer
			.follow_symlinks
			.unwrap_or(indexer.follow_symlinks);

		let mut finder = FinderConfig {
			indexer,
			scoring: self.scoring,
			..FinderConfig::default()
		};
		if let Some(ms) = self.search.debounce_ms {
			finder.search.debounce = Duration::from_millis(ms);
		}
		finder.search.limits = resolve_limits(&self.search)?;

		let commands = self
			.commands
			.into_iter()
			.map(|entry| (entry.name, entry.action))
			.collect();

		Ok(ResolvedConfig {
			root,
			finder,
			commands,
		})
	}
}

fn resolve_limits(section: &SearchSection) -> Result<ResultLimits, SettingsError> {
	let defaults = ResultLimits::default();
	let pick = |key: &'static str, value: Option<usize>, default: usize| match value {
		Some(value) => positive(key, value),
		None => Ok(default),
	};
	Ok(ResultLimits {
		files: pick("search.file_limit", section.file_limit, defaults.files)?,
		buffers: pick("search.buffer_limit", section.buffer_limit, defaults.buffers)?,
		commands: pick("search.command_limit", section.command_limit, defaults.commands)?,
		content: pick("search.content_limit", section.content_limit, defaults.content)?,
	})
}

fn positive(key: &'static str, value: usize) -> Result<usize, SettingsError> {
	if value == 0 {
		Err(SettingsError::NotPositive { key, value })
	} else {
		Ok(value)
	}
}

fn sanitize_extensions(values: Vec<String>) -> Vec<String> {
	let mut cleaned: Vec<String> = Vec::new();
	for value in values {
		let normalized = normalize_extension(&value);
		if !normalized.is_empty() && !cleaned.contains(&normalized) {
			cleaned.push(normalized);
		}
	}
	cleaned
}

fn sanitize_names(values: Vec<String>) -> Vec<String> {
	values
		.into_iter()
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
		.collect()
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
