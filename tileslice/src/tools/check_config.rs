use crate::config::Config;
use anyhow::{Result, bail};
use std::path::Path;

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {}

pub fn run(_arguments: &Subcommand, config_path: &Path) -> Result<()> {
	let config = Config::from_path(config_path)?;
	let report = config.validate();

	println!("configuration report for {}", config_path.display());
	print!("{report}");

	let sources = config.sources();
	if !sources.is_empty() {
		println!("sources ({}):", sources.len());
		for (id, source) in sources {
			let zoom = |z: Option<u8>| z.map_or_else(|| "-".to_string(), |z| z.to_string());
			println!(
				"  {id}: {} (zoom {}..={})",
				source.name.as_deref().unwrap_or("?"),
				zoom(source.min_zoom),
				zoom(source.max_zoom)
			);
		}
	}

	let regions = config.regions();
	if !regions.is_empty() {
		println!("regions ({}):", regions.len());
		for (id, region) in regions {
			println!("  {id}: {}", region.name.as_deref().unwrap_or("?"));
		}
	}

	if !report.is_valid() {
		bail!("configuration has {} error(s)", report.errors.len());
	}
	Ok(())
}
