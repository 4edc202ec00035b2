use crate::{ExtractError, INDEX_FILE_NAME};
use std::{
	collections::BTreeMap,
	fmt, fs,
	path::{Path, PathBuf},
};

/// Counts of one zoom level of an extracted region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoomStatistics {
	pub tiles: u64,
	pub x_range: Option<(u32, u32)>,
	pub y_range: Option<(u32, u32)>,
	/// Number of tiles per file extension.
	pub formats: BTreeMap<String, u64>,
}

impl ZoomStatistics {
	fn add(&mut self, x: u32, y: u32, extension: &str) {
		self.tiles += 1;
		self.x_range = Some(expand(self.x_range, x));
		self.y_range = Some(expand(self.y_range, y));
		*self.formats.entry(extension.to_string()).or_default() += 1;
	}
}

fn expand(range: Option<(u32, u32)>, value: u32) -> (u32, u32) {
	match range {
		Some((min, max)) => (min.min(value), max.max(value)),
		None => (value, value),
	}
}

/// What an extracted region on disk contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputStatistics {
	pub region: String,
	pub region_dir: PathBuf,
	pub zoom_levels: BTreeMap<u8, ZoomStatistics>,
}

impl OutputStatistics {
	/// Walks `<root>/<region>` and counts the tiles of every zoom level.
	///
	/// Entries that do not follow the `<z>/<x>/<y>.<ext>` layout are skipped.
	pub fn scan(root: &Path, region: &str) -> Result<OutputStatistics, ExtractError> {
		let region_dir = root.join(region);
		let io_error = |path: &Path, source: std::io::Error| ExtractError::OutputUnavailable {
			path: path.to_path_buf(),
			source,
		};

		let mut statistics = OutputStatistics {
			region: region.to_string(),
			region_dir: region_dir.clone(),
			zoom_levels: BTreeMap::new(),
		};

		for zoom_entry in fs::read_dir(&region_dir).map_err(|e| io_error(&region_dir, e))? {
			let zoom_entry = zoom_entry.map_err(|e| io_error(&region_dir, e))?;
			let Some(level) = numeric_dir(&zoom_entry.path()).and_then(|l| u8::try_from(l).ok()) else {
				log::debug!("skip {:?}", zoom_entry.path());
				continue;
			};
			let zoom_stats = statistics.zoom_levels.entry(level).or_default();

			let zoom_dir = zoom_entry.path();
			for column_entry in fs::read_dir(&zoom_dir).map_err(|e| io_error(&zoom_dir, e))? {
				let column_entry = column_entry.map_err(|e| io_error(&zoom_dir, e))?;
				let Some(x) = numeric_dir(&column_entry.path()) else {
					if column_entry.file_name() != INDEX_FILE_NAME {
						log::warn!("unexpected entry {:?}", column_entry.path());
					}
					continue;
				};

				let column_dir = column_entry.path();
				for tile_entry in fs::read_dir(&column_dir).map_err(|e| io_error(&column_dir, e))? {
					let tile_path = tile_entry.map_err(|e| io_error(&column_dir, e))?.path();
					let (Some(stem), Some(extension)) = (tile_path.file_stem(), tile_path.extension()) else {
						continue;
					};
					let (Some(y), Some(extension)) = (stem.to_str().and_then(|s| s.parse().ok()), extension.to_str())
					else {
						continue;
					};
					if tile_path.is_file() {
						zoom_stats.add(x, y, extension);
					}
				}
			}
		}

		Ok(statistics)
	}

	pub fn total_tiles(&self) -> u64 {
		self.zoom_levels.values().map(|z| z.tiles).sum()
	}

	/// Number of tiles per file extension over all zoom levels.
	pub fn formats(&self) -> BTreeMap<String, u64> {
		let mut formats = BTreeMap::new();
		for (format, count) in self.zoom_levels.values().flat_map(|z| z.formats.iter()) {
			*formats.entry(format.clone()).or_default() += count;
		}
		formats
	}
}

fn numeric_dir(path: &Path) -> Option<u32> {
	if !path.is_dir() {
		return None;
	}
	path.file_name()?.to_str()?.parse().ok()
}

impl fmt::Display for OutputStatistics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"region '{}' ({}): {} tiles on {} zoom levels",
			self.region,
			self.region_dir.display(),
			self.total_tiles(),
			self.zoom_levels.len()
		)?;
		for (level, zoom) in &self.zoom_levels {
			write!(f, "\n  zoom {level:>2}: {} tiles", zoom.tiles)?;
			if let (Some((x0, x1)), Some((y0, y1))) = (zoom.x_range, zoom.y_range) {
				write!(f, ", x {x0}..={x1}, y {y0}..={y1}")?;
			}
		}
		for (format, count) in self.formats() {
			write!(f, "\n  .{format}: {count}")?;
		}
		Ok(())
	}
}
