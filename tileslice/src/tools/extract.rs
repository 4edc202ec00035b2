use crate::{config::Config, progress::ProgressBar};
use anyhow::{Result, bail};
use std::{
	io::IsTerminal,
	path::{Path, PathBuf},
	sync::Arc,
};
use tileslice_container::{Area, ExportEvent, ExportOptions, ExtractionQuery, RunState, TileExporter};
use tileslice_core::GeoBBox;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// id of the source to extract from
	#[arg(long, short, value_name = "ID")]
	source: String,

	/// id of a predefined region
	#[arg(long, short, value_name = "ID", required_unless_present = "bbox", conflicts_with = "bbox")]
	region: Option<String>,

	/// extract a bounding box instead of a predefined region
	#[arg(
		long,
		short,
		value_name = "lon_min,lat_min,lon_max,lat_max",
		allow_hyphen_values = true,
		value_parser = parse_bbox
	)]
	bbox: Option<GeoBBox>,

	/// minimum zoom level, defaults to the source's minimum
	#[arg(long, value_name = "int", display_order = 1)]
	min_zoom: Option<u8>,

	/// maximum zoom level, defaults to the source's maximum
	#[arg(long, value_name = "int", display_order = 1)]
	max_zoom: Option<u8>,

	/// name of the output directory below the output root,
	/// defaults to the region id or "custom"
	#[arg(long, short = 'n', value_name = "NAME", display_order = 2, verbatim_doc_comment)]
	region_name: Option<String>,

	/// output root, defaults to `defaults.output_dir` of the configuration
	#[arg(long, short, value_name = "DIR", display_order = 2)]
	output: Option<PathBuf>,

	/// number of tiles processed in parallel, 0 uses all cores
	#[arg(long, short, value_name = "int", default_value_t = 1, display_order = 3)]
	jobs: usize,

	/// write a tiles.json index into every zoom directory
	#[arg(long, display_order = 3)]
	index: bool,

	/// only print the planned tile ranges
	#[arg(long, display_order = 3)]
	dry_run: bool,
}

fn parse_bbox(value: &str) -> Result<GeoBBox, String> {
	let values = value
		.split(&[' ', ',', ';'])
		.filter(|s| !s.is_empty())
		.map(|s| s.parse::<f64>().map_err(|_| format!("'{s}' is not a number")))
		.collect::<Result<Vec<f64>, String>>()?;
	GeoBBox::try_from(values).map_err(|e| e.to_string())
}

#[tokio::main]
pub async fn run(arguments: &Subcommand, config_path: &Path) -> Result<()> {
	let config = Config::from_path(config_path)?;
	let sources = config.source_catalog()?;
	let regions = config.region_catalog()?;

	let area = match (&arguments.region, arguments.bbox) {
		(_, Some(bbox)) => Area::BBox(bbox),
		(Some(region), None) => Area::Region(region.clone()),
		(None, None) => bail!("either --region or --bbox is required"),
	};
	let mut query =
		ExtractionQuery::new(&arguments.source, area).with_zoom(arguments.min_zoom, arguments.max_zoom);
	if let Some(name) = &arguments.region_name {
		query = query.with_region_name(name);
	}

	let options = ExportOptions {
		output_root: arguments.output.clone().unwrap_or_else(|| config.output_dir()),
		concurrency: match arguments.jobs {
			0 => num_cpus::get(),
			jobs => jobs,
		},
		write_index: arguments.index,
	};
	log::debug!("export options: {options:?}");
	let exporter = TileExporter::new(Arc::new(sources), Arc::new(regions), options);

	if arguments.dry_run {
		let plan = exporter.plan(&query)?;
		println!("{plan}");
		return Ok(());
	}

	let progress = Arc::new(ProgressBar::new("extracting", std::io::stderr().is_terminal()));
	let listener = progress.clone();
	exporter.events().subscribe(move |event| match event {
		ExportEvent::Progress { attempted, total } => listener.set_position(*attempted, *total),
		ExportEvent::State(RunState::Writing | RunState::Aborted) => listener.finish(),
		_ => {}
	});

	let stop = exporter.stop_signal();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			eprintln!("interrupted, finishing tiles in progress");
			stop.raise();
		}
	});

	let result = exporter.run(&query).await?;
	progress.finish();
	println!("{result}");

	if !result.is_success() {
		bail!(
			"extraction of '{}' did not succeed: {} of {} tiles written",
			result.region_name,
			result.written,
			result.planned
		);
	}
	Ok(())
}
