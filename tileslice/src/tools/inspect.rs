use crate::config::Config;
use anyhow::Result;
use std::path::Path;
use tileslice_container::MBTilesArchive;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// id of the source to inspect
	#[arg(required = true)]
	source: String,
}

pub fn run(arguments: &Subcommand, config_path: &Path) -> Result<()> {
	let catalog = Config::from_path(config_path)?.source_catalog()?;
	let source = catalog.lookup(&arguments.source)?;
	let archive = MBTilesArchive::open(source.path(), 1)?;

	println!("{}: {}", source.id, archive.path().display());

	let metadata = archive.metadata()?;
	if metadata.is_empty() {
		println!("metadata: none");
	} else {
		println!("metadata:");
		for (name, value) in &metadata {
			println!("  {name}: {value}");
		}
	}

	println!("tiles:");
	let counts = archive.tile_counts()?;
	for (level, count) in &counts {
		println!("  zoom {level:>2}: {count}");
	}
	println!("  total:   {}", counts.iter().map(|(_, c)| c).sum::<u64>());

	archive.close();
	Ok(())
}
