mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_commands, print_json, print_plain};
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	quickpick::logging::init("quickpick=warn");
	let cli = parse_cli();

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	if cli.list_commands {
		print_commands(&resolved.registry()?);
		return Ok(());
	}

	let select = cli.select.map(usize::try_from).transpose()?;
	let workflow = SearchWorkflow::from_config(
		resolved,
		cli.mode,
		cli.query.clone().unwrap_or_default(),
		cli.buffers.clone(),
		select,
	)?;
	let outcome = workflow.run()?;

	match cli.output {
		OutputFormat::Plain => print_plain(&outcome, cli.limit),
		OutputFormat::Json => print_json(&outcome, cli.limit)?,
	}

	Ok(())
}
