use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, Parser, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use quickpick::{SearchMode, app_dirs};

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("quickpick {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");

	Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

fn parse_mode(value: &str) -> Result<SearchMode, quickpick::ModeParseError> {
	value.parse()
}

#[derive(Parser, Debug)]
#[command(
	name = "quickpick",
	version,
	long_version = long_version(),
	about = "Rank files, file contents, open buffers or editor commands against a query",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `quickpick` binary.
pub(crate) struct CliArgs {
	#[arg(value_name = "QUERY", help = "Query to search for (default: empty)")]
	pub(crate) query: Option<String>,
	#[arg(
		short,
		long,
		value_name = "MODE",
		default_value = "files",
		value_parser = parse_mode,
		help = "Data set to search: files, content, commands or buffers"
	)]
	pub(crate) mode: SearchMode,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Directory indexed by the files and content modes (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'b',
		long = "buffer",
		value_name = "PATH",
		action = ArgAction::Append,
		help = "Open buffer searched by the buffers mode; repeat for more"
	)]
	pub(crate) buffers: Vec<PathBuf>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "QUICKPICK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "max-depth",
		value_name = "NUM",
		help = "Maximum directory depth to index (default: 8)"
	)]
	pub(crate) max_depth: Option<usize>,
	#[arg(
		long,
		value_delimiter = ',',
		value_name = "EXT",
		help = "Comma-separated list of indexed file extensions (default: built-in list)"
	)]
	pub(crate) extensions: Option<Vec<String>>,
	#[arg(
		long = "exclude",
		value_delimiter = ',',
		value_name = "NAME",
		help = "Comma-separated directory or file names to skip (default: built-in list)"
	)]
	pub(crate) excludes: Option<Vec<String>>,
	#[arg(
		long,
		value_name = "NUM",
		help = "Print at most NUM results (default: all ranked results)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		short = 's',
		long,
		value_name = "N",
		value_parser = clap::value_parser!(u64).range(1..),
		help = "Select the N-th result (1-based) and report the chosen payload"
	)]
	pub(crate) select: Option<u64>,
	#[arg(
		short = 'f',
		long = "format",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how results are printed"
	)]
	pub(crate) output: OutputFormat,
	#[arg(long = "print-config", help = "Print the resolved configuration before searching")]
	pub(crate) print_config: bool,
	#[arg(long = "list-commands", help = "List the command catalog and exit")]
	pub(crate) list_commands: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the binary.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_definition_is_consistent() {
		CliArgs::command().debug_assert();
	}

	#[test]
	fn parses_mode_aliases_and_repeated_buffers() {
		let cli = CliArgs::try_parse_from([
			"quickpick", "-m", "buffer", "-b", "/a/main.rs", "-b", "/b/lib.rs", "main",
		])
		.expect("parse");
		assert_eq!(cli.mode, SearchMode::Buffers);
		assert_eq!(cli.buffers.len(), 2);
		assert_eq!(cli.query.as_deref(), Some("main"));
		assert_eq!(cli.output, OutputFormat::Plain);
	}

	#[test]
	fn rejects_zero_selection_and_unknown_modes() {
		assert!(CliArgs::try_parse_from(["quickpick", "--select", "0"]).is_err());
		assert!(CliArgs::try_parse_from(["quickpick", "--mode", "regex"]).is_err());
	}

	#[test]
	fn comma_separated_lists_are_split() {
		let cli = CliArgs::try_parse_from(["quickpick", "--extensions", "rs,md", "--exclude", "out"])
			.expect("parse");
		assert_eq!(cli.extensions, Some(vec!["rs".to_string(), "md".to_string()]));
		assert_eq!(cli.excludes, Some(vec!["out".to_string()]));
	}
}
