//! Layout of the extracted tile tree: `<root>/<region>/<z>/<x>/<y>.<ext>`.

use crate::ExtractError;
use serde::Serialize;
use std::{
	fs, io,
	path::{Component, Path, PathBuf},
};
use tileslice_core::TileCoord;

/// File name of the optional per-zoom index.
pub const INDEX_FILE_NAME: &str = "tiles.json";

/// Where and how tiles of one region are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileOutput {
	region_dir: PathBuf,
	extension: String,
}

#[derive(Serialize)]
struct IndexEntry {
	x: u32,
	y: u32,
}

#[derive(Serialize)]
struct ZoomIndex {
	zoom: u8,
	tiles: Vec<IndexEntry>,
	total_tiles: usize,
}

impl TileOutput {
	/// # Errors
	/// Fails if `region_name` is not a plain directory name.
	pub fn new(root: &Path, region_name: &str, extension: &str) -> Result<TileOutput, ExtractError> {
		let mut components = Path::new(region_name).components();
		let is_plain = matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));
		if !is_plain {
			return Err(ExtractError::OutputUnavailable {
				path: root.join(region_name),
				source: io::Error::new(
					io::ErrorKind::InvalidInput,
					format!("region name '{region_name}' must be a plain directory name"),
				),
			});
		}
		Ok(TileOutput {
			region_dir: root.join(region_name),
			extension: extension.to_string(),
		})
	}

	/// Creates the region directory. Existing content is left untouched.
	pub fn create(&self) -> Result<(), ExtractError> {
		fs::create_dir_all(&self.region_dir).map_err(|source| ExtractError::OutputUnavailable {
			path: self.region_dir.clone(),
			source,
		})
	}

	pub fn region_dir(&self) -> &Path {
		&self.region_dir
	}

	pub fn tile_path(&self, coord: &TileCoord) -> PathBuf {
		self.region_dir
			.join(coord.level.to_string())
			.join(coord.x.to_string())
			.join(format!("{}.{}", coord.y, self.extension))
	}

	/// Writes one tile, creating its column directory if needed.
	pub fn write_tile(&self, coord: &TileCoord, data: &[u8]) -> io::Result<PathBuf> {
		let path = self.tile_path(coord);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(&path, data)?;
		Ok(path)
	}

	/// Writes `<region>/<level>/tiles.json` listing `tiles` as `{"x", "y"}`
	/// entries, sorted by column and row.
	pub fn write_index(&self, level: u8, tiles: &[(u32, u32)]) -> io::Result<PathBuf> {
		let mut tiles = tiles.to_vec();
		tiles.sort_unstable();
		let index = ZoomIndex {
			zoom: level,
			total_tiles: tiles.len(),
			tiles: tiles.into_iter().map(|(x, y)| IndexEntry { x, y }).collect(),
		};

		let dir = self.region_dir.join(level.to_string());
		fs::create_dir_all(&dir)?;
		let path = dir.join(INDEX_FILE_NAME);
		let json = serde_json::to_string_pretty(&index).map_err(io::Error::other)?;
		fs::write(&path, json)?;
		Ok(path)
	}
}
