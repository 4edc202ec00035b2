//! Drives an extraction from query to written tile tree.
//!
//! Tiles are processed on tokio's blocking pool, at most
//! [`ExportOptions::concurrency`] at a time. Every worker fetches a tile
//! from its own pooled archive connection and writes it straight to disk.
//! Counters and events are updated on the driving task only, as results come
//! back.

use crate::{
	EventBus, ExportEvent, ExtractError, ExtractionPlan, ExtractionQuery, ExtractionRequest, ExtractionResult,
	MBTilesArchive, RegionCatalog, RunState, SourceCatalog, StopSignal, TileFetch, TileOutput,
};
use futures::{StreamExt, future, stream};
use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tileslice_core::TileCoord;

/// Output root used when none is configured.
pub const DEFAULT_OUTPUT_ROOT: &str = "tiles";

/// Settings of a [`TileExporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
	/// Directory that receives `<region>/<z>/<x>/<y>.<ext>`.
	pub output_root: PathBuf,
	/// Number of tiles processed at the same time. `1` behaves like a plain
	/// sequential loop.
	pub concurrency: usize,
	/// Write a `tiles.json` index into every zoom directory.
	pub write_index: bool,
}

impl Default for ExportOptions {
	fn default() -> Self {
		ExportOptions {
			output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
			concurrency: 1,
			write_index: false,
		}
	}
}

/// What happened to one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TileOutcome {
	Written,
	NotFound,
	ReadFailed(String),
	WriteFailed(String),
}

/// Extracts regions of tiles from the sources of a catalog.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tileslice_container::*;
///
/// # async fn example(sources: SourceCatalog, regions: RegionCatalog) -> Result<(), ExtractError> {
/// let exporter = TileExporter::new(Arc::new(sources), Arc::new(regions), ExportOptions::default());
/// exporter.events().subscribe(|event| {
///     if let ExportEvent::Progress { attempted, total } = event {
///         eprintln!("{attempted}/{total}");
///     }
/// });
/// let result = exporter
///     .run(&ExtractionQuery::new("turkey", Area::Region("ankara".into())))
///     .await?;
/// assert!(result.is_success());
/// # Ok(())
/// # }
/// ```
pub struct TileExporter {
	sources: Arc<SourceCatalog>,
	regions: Arc<RegionCatalog>,
	options: ExportOptions,
	events: EventBus,
	stop: StopSignal,
}

impl TileExporter {
	pub fn new(sources: Arc<SourceCatalog>, regions: Arc<RegionCatalog>, options: ExportOptions) -> TileExporter {
		TileExporter {
			sources,
			regions,
			options,
			events: EventBus::new(),
			stop: StopSignal::new(),
		}
	}

	/// Bus that receives the [`ExportEvent`]s of every run.
	pub fn events(&self) -> &EventBus {
		&self.events
	}

	/// Signal that stops the current run once raised.
	///
	/// The signal is shared by all runs of this exporter and is not lowered
	/// when a run ends. Call [`StopSignal::reset`] before reusing a stopped
	/// exporter.
	pub fn stop_signal(&self) -> StopSignal {
		self.stop.clone()
	}

	pub fn options(&self) -> &ExportOptions {
		&self.options
	}

	/// Validates `query` and computes its tile ranges without opening the
	/// archive.
	pub fn plan(&self, query: &ExtractionQuery) -> Result<ExtractionPlan, ExtractError> {
		let request = query.resolve(&self.sources, &self.regions)?;
		ExtractionPlan::new(request)
	}

	/// Runs a complete extraction.
	///
	/// # Errors
	/// Every error is raised before the first tile is attempted. Tile level
	/// failures are counted in the returned [`ExtractionResult`].
	pub async fn run(&self, query: &ExtractionQuery) -> Result<ExtractionResult, ExtractError> {
		self.set_state(RunState::Validating);
		let request = query.resolve(&self.sources, &self.regions).inspect_err(|e| self.abort_setup(e))?;
		self.run_request(request).await
	}

	/// Runs an already validated request.
	pub async fn run_request(&self, request: ExtractionRequest) -> Result<ExtractionResult, ExtractError> {
		let warnings = request.warnings();
		for warning in &warnings {
			self.events.warn(warning.clone());
		}

		self.set_state(RunState::Enumerating);
		let plan = ExtractionPlan::new(request).inspect_err(|e| self.abort_setup(e))?;
		let total = plan.total();
		log::debug!("planned {total} tiles for {}", plan.request);

		let source = plan.request.source.clone();
		let concurrency = self.options.concurrency.max(1);
		let archive = MBTilesArchive::open(source.path(), concurrency as u32).inspect_err(|e| self.abort_setup(e))?;
		let output = TileOutput::new(&self.options.output_root, &plan.request.region_name, source.extension())
			.and_then(|output| output.create().map(|()| output))
			.inspect_err(|e| self.abort_setup(e))?;

		let archive = Arc::new(archive);
		let output = Arc::new(output);
		let mut result = ExtractionResult::new(
			&source.id,
			&plan.request.region_name,
			output.region_dir().to_path_buf(),
			total,
		);
		result.warnings = warnings;
		let mut written: BTreeMap<u8, Vec<(u32, u32)>> = BTreeMap::new();

		self.set_state(RunState::Fetching);
		let stop = self.stop.clone();
		let mut outcomes = stream::iter(plan.coords())
			.take_while(move |_| future::ready(!stop.is_raised()))
			.map(|coord| {
				let archive = archive.clone();
				let output = output.clone();
				async move {
					let outcome = tokio::task::spawn_blocking(move || process_tile(&archive, &output, &coord))
						.await
						.unwrap_or_else(|e| TileOutcome::ReadFailed(format!("worker failed: {e}")));
					(coord, outcome)
				}
			})
			.buffer_unordered(concurrency);

		let mut attempted = 0u64;
		while let Some((coord, outcome)) = outcomes.next().await {
			attempted += 1;
			*result.attempted_per_zoom.entry(coord.level).or_default() += 1;
			match outcome {
				TileOutcome::Written => {
					result.written += 1;
					if self.options.write_index {
						written.entry(coord.level).or_default().push((coord.x, coord.y));
					}
				}
				TileOutcome::NotFound => result.not_found += 1,
				TileOutcome::ReadFailed(reason) => {
					result.read_failed += 1;
					log::warn!("failed to read tile {coord}: {reason}");
					self.events.emit(ExportEvent::ReadFailed { coord, reason });
				}
				TileOutcome::WriteFailed(reason) => {
					result.write_failed += 1;
					log::warn!("failed to write tile {coord}: {reason}");
					self.events.emit(ExportEvent::WriteFailed { coord, reason });
				}
			}
			self.events.progress(attempted, total);
		}
		drop(outcomes);

		if let Some(archive) = Arc::into_inner(archive) {
			archive.close();
		}

		if attempted < total {
			log::info!("stopped after {attempted} of {total} tiles");
			result.state = RunState::Aborted;
			self.set_state(RunState::Aborted);
			return Ok(result);
		}

		self.set_state(RunState::Writing);
		if self.options.write_index {
			for (level, tiles) in &written {
				if let Err(e) = output.write_index(*level, tiles) {
					let message = format!("failed to write tile index for zoom {level}: {e}");
					log::warn!("{message}");
					self.events.warn(message.clone());
					result.warnings.push(message);
				}
			}
		}

		result.state = RunState::Completed;
		self.set_state(RunState::Completed);
		log::info!(
			"extracted {} of {} tiles into {:?} ({} not found, {} read errors, {} write errors)",
			result.written,
			total,
			result.region_dir,
			result.not_found,
			result.read_failed,
			result.write_failed
		);
		Ok(result)
	}

	fn set_state(&self, state: RunState) {
		log::debug!("state: {state}");
		self.events.state(state);
	}

	fn abort_setup(&self, error: &ExtractError) {
		log::debug!("setup failed: {error}");
		self.set_state(RunState::Aborted);
	}
}

/// Fetches one tile and writes it if it exists.
fn process_tile(archive: &MBTilesArchive, output: &TileOutput, coord: &TileCoord) -> TileOutcome {
	match archive.fetch_tile(coord) {
		TileFetch::Found(bytes) => match output.write_tile(coord, &bytes) {
			Ok(path) => {
				log::trace!("wrote {}", path.display());
				TileOutcome::Written
			}
			Err(e) => TileOutcome::WriteFailed(e.to_string()),
		},
		TileFetch::NotFound => {
			log::trace!("tile {coord} not found");
			TileOutcome::NotFound
		}
		TileFetch::ReadError(reason) => TileOutcome::ReadFailed(reason),
	}
}

impl std::fmt::Debug for TileExporter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TileExporter")
			.field("sources", &self.sources.ids())
			.field("options", &self.options)
			.finish()
	}
}
