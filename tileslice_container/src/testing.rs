//! Fixture archives for tests, in this crate and in downstream crates
//! (through the `test` feature).
//!
//! Tiles are given in XYZ coordinates and stored with TMS rows, exactly as a
//! real MBTiles writer does.

use r2d2_sqlite::rusqlite::{Connection, Result, params};
use std::path::Path;
use tileslice_core::{GeoBBox, TileBBox, TileCoord, ZoomRange};

/// Bounding box of Ankara, covered by [`turkey_fixture`].
pub const ANKARA: [f64; 4] = [32.5, 39.7, 33.2, 40.1];

/// Declared coverage of [`turkey_fixture`].
pub const TURKEY: [f64; 4] = [25.31, 35.46, 45.0, 42.55];

fn tms_row(coord: &TileCoord) -> Result<u32> {
	coord
		.tms_row()
		.map_err(|e| r2d2_sqlite::rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// A small MBTiles database written tile by tile.
pub struct MBTilesFixture {
	conn: Connection,
}

impl MBTilesFixture {
	/// Creates an empty archive at `path`, replacing any existing file.
	pub fn new(path: &Path) -> Result<MBTilesFixture> {
		if path.exists() {
			std::fs::remove_file(path).expect("remove existing fixture");
		}
		let conn = Connection::open(path)?;
		conn.execute_batch(
			"CREATE TABLE metadata (name TEXT, value TEXT, UNIQUE (name));
			CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_data BLOB, UNIQUE (zoom_level, tile_column, tile_row));
			CREATE UNIQUE INDEX tile_index on tiles (zoom_level, tile_column, tile_row);",
		)?;
		Ok(MBTilesFixture { conn })
	}

	pub fn metadata(&self, name: &str, value: &str) -> Result<&Self> {
		self.conn.execute(
			"INSERT OR REPLACE INTO metadata (name, value) VALUES (?1, ?2)",
			params![name, value],
		)?;
		Ok(self)
	}

	/// Stores one tile at the XYZ coordinate `coord`.
	pub fn tile(&self, coord: &TileCoord, data: &[u8]) -> Result<&Self> {
		self.conn.execute(
			"INSERT OR REPLACE INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)",
			params![coord.level, coord.x, tms_row(coord)?, data],
		)?;
		Ok(self)
	}

	/// Stores a tile for every coordinate covering `bbox` on each level of
	/// `zoom`, except those for which `skip` returns `true`. The payload of
	/// each tile is its `z/x/y` string. Returns the number of stored tiles.
	pub fn fill(&mut self, bbox: &GeoBBox, zoom: ZoomRange, skip: impl Fn(&TileCoord) -> bool) -> Result<u64> {
		let transaction = self.conn.transaction()?;
		let mut count = 0;
		for level in zoom.iter() {
			let range = TileBBox::from_geo(level, bbox).expect("fixture bbox projects onto the grid");
			for coord in range.iter_coords().filter(|c| !skip(c)) {
				transaction.execute(
					"INSERT OR REPLACE INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)",
					params![coord.level, coord.x, tms_row(&coord)?, coord.to_string().as_bytes()],
				)?;
				count += 1;
			}
		}
		transaction.commit()?;
		Ok(count)
	}
}

/// Writes a Turkey archive holding the tiles that cover [`ANKARA`] at zoom
/// levels 5 to 8, five tiles in total. Tile `8/151/97` is left out, so four
/// tiles are stored. Returns the number of stored tiles.
pub fn turkey_fixture(path: &Path) -> Result<u64> {
	let mut fixture = MBTilesFixture::new(path)?;
	fixture
		.metadata("name", "Turkey")?
		.metadata("format", "jpg")?
		.metadata("bounds", "25.31,35.46,45,42.55")?
		.metadata("minzoom", "5")?
		.metadata("maxzoom", "13")?;
	let ankara = GeoBBox::try_from(ANKARA).expect("valid fixture bbox");
	fixture.fill(&ankara, ZoomRange { min: 5, max: 8 }, |c| {
		c.level == 8 && c.x == 151 && c.y == 97
	})
}
