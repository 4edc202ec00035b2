use crate::config::Config;
use anyhow::Result;
use std::path::Path;
use tileslice_container::Region;

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {}

pub fn run(_arguments: &Subcommand, config_path: &Path) -> Result<()> {
	let catalog = Config::from_path(config_path)?.region_catalog()?;
	if catalog.is_empty() {
		println!("no regions configured");
		return Ok(());
	}
	println!("regions ({}):", catalog.len());
	for region in catalog.list_all() {
		println!("{}", describe(region));
	}
	Ok(())
}

fn describe(region: &Region) -> String {
	let mut line = format!("  {}: {} [{}]", region.id, region.name, region.bbox.as_string_list());
	if let Some(center) = region.center {
		line += &format!(", center {},{}", center.lon, center.lat);
	}
	match (region.default_zoom, region.max_zoom) {
		(Some(default_zoom), Some(max_zoom)) => line += &format!(", zoom {default_zoom} (max {max_zoom})"),
		(Some(default_zoom), None) => line += &format!(", zoom {default_zoom}"),
		(None, Some(max_zoom)) => line += &format!(", max zoom {max_zoom}"),
		(None, None) => {}
	}
	line
}
