use crate::config::Config;
use anyhow::Result;
use std::{fmt::Write, fs, path::Path};
use tileslice_container::Source;

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {}

pub fn run(_arguments: &Subcommand, config_path: &Path) -> Result<()> {
	let catalog = Config::from_path(config_path)?.source_catalog()?;
	if catalog.is_empty() {
		println!("no sources configured");
		return Ok(());
	}
	println!("sources ({}):", catalog.len());
	for source in catalog.list_all() {
		print!("{}", describe(source));
	}
	Ok(())
}

fn describe(source: &Source) -> String {
	let size = match fs::metadata(source.path()) {
		Ok(meta) => format!("{:.1} MB", meta.len() as f64 / 1_048_576.0),
		Err(_) => "file not found".to_string(),
	};

	let mut text = String::new();
	let _ = writeln!(text, "  {}: {}", source.id, source.name);
	let _ = writeln!(text, "    path:   {}", source.path().display());
	let _ = writeln!(text, "    format: {} ({})", source.format, source.format.kind());
	let _ = writeln!(text, "    size:   {size}");
	let _ = writeln!(text, "    bounds: {}", source.bounds.as_string_list());
	let _ = writeln!(text, "    zoom:   {}", source.zoom);
	if let Some(description) = &source.description {
		let _ = writeln!(text, "    {description}");
	}
	text
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::{TempDir, prelude::*};
	use pretty_assertions::assert_eq;
	use tileslice_core::{GeoBBox, TileFormat, ZoomRange};

	#[test]
	fn describes_a_source() {
		let dir = TempDir::new().unwrap();
		let file = dir.child("turkey.mbtiles");
		file.write_binary(&vec![0u8; 1_572_864]).unwrap();

		let source = Source::new("turkey", "Turkey", file.path().to_path_buf(), TileFormat::Jpg)
			.with_bounds(GeoBBox::new(25.31, 35.46, 45.0, 42.55).unwrap())
			.with_zoom(ZoomRange::new(5, 13).unwrap())
			.with_description("Turkey at zoom 5 to 13");
		assert_eq!(
			describe(&source),
			format!(
				"  turkey: Turkey\n    path:   {}\n    format: jpg (raster)\n    size:   1.5 MB\n    bounds: 25.31,35.46,45,42.55\n    zoom:   5..=13\n    Turkey at zoom 5 to 13\n",
				file.path().display()
			)
		);
	}

	#[test]
	fn missing_file() {
		let source = Source::new("x", "X", "/does/not/exist.mbtiles".into(), TileFormat::Pbf);
		let text = describe(&source);
		assert!(text.contains("size:   file not found"));
		assert!(text.contains("format: pbf (vector)"));
	}
}
