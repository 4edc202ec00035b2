use crate::config::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tileslice_container::OutputStatistics;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// name of the extracted region
	#[arg(long, short = 'n', value_name = "NAME")]
	region_name: String,

	/// output root, defaults to `defaults.output_dir` of the configuration
	#[arg(long, short, value_name = "DIR")]
	output: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand, config_path: &Path) -> Result<()> {
	let root = match &arguments.output {
		Some(output) => output.clone(),
		None => Config::from_path(config_path)?.output_dir(),
	};
	let statistics = OutputStatistics::scan(&root, &arguments.region_name)?;
	println!("{statistics}");
	Ok(())
}
