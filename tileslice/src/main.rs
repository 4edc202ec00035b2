mod config;
mod progress;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// configuration file
	#[arg(long, short, global = true, value_name = "FILE", default_value = config::DEFAULT_CONFIG_PATH)]
	config: PathBuf,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Extract a region of tiles from a source into a z/x/y directory tree
	Extract(tools::extract::Subcommand),

	/// List the configured tile sources
	Sources(tools::sources::Subcommand),

	/// List the predefined regions
	Regions(tools::regions::Subcommand),

	/// Validate the configuration file
	CheckConfig(tools::check_config::Subcommand),

	/// Show the metadata and tile counts of a source archive
	Inspect(tools::inspect::Subcommand),

	/// Count the tiles of an extracted region
	Stats(tools::stats::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Extract(arguments) => tools::extract::run(arguments, &cli.config),
		Commands::Sources(arguments) => tools::sources::run(arguments, &cli.config),
		Commands::Regions(arguments) => tools::regions::run(arguments, &cli.config),
		Commands::CheckConfig(arguments) => tools::check_config::run(arguments, &cli.config),
		Commands::Inspect(arguments) => tools::inspect::run(arguments, &cli.config),
		Commands::Stats(arguments) => tools::stats::run(arguments, &cli.config),
	}
}
