//! Read tile blobs and metadata from an MBTiles (SQLite) archive.
//!
//! Tiles are stored in the `tiles` table, addressed by `zoom_level`,
//! `tile_column` and `tile_row`, where `tile_row` follows the TMS convention
//! (row 0 in the south). [`MBTilesArchive::fetch_tile`] takes XYZ coordinates
//! and flips the row with [`TileCoord::tms_row`].
//!
//! The archive is opened read-only. A pool of connections lets several
//! workers fetch tiles at the same time, each on its own connection.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tileslice_container::{MBTilesArchive, TileFetch};
//! use tileslice_core::TileCoord;
//!
//! let archive = MBTilesArchive::open(Path::new("turkey.mbtiles"), 1).unwrap();
//! match archive.fetch_tile(&TileCoord::new(6, 37, 24).unwrap()) {
//!     TileFetch::Found(bytes) => println!("{} bytes", bytes.len()),
//!     TileFetch::NotFound => println!("no tile"),
//!     TileFetch::ReadError(reason) => println!("failed: {reason}"),
//! }
//! ```

use crate::{ArchiveUnavailableReason, ExtractError};
use r2d2::Pool;
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{Error as SqliteError, ErrorCode, OpenFlags, OptionalExtension, params},
};
use std::{
	fs::File,
	path::{Path, PathBuf},
	time::Duration,
};
use tileslice_core::TileCoord;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of fetching one tile.
///
/// Absence and read failures are ordinary values, so a single bad tile never
/// ends a run.
#[derive(Clone, PartialEq, Eq)]
pub enum TileFetch {
	Found(Vec<u8>),
	NotFound,
	ReadError(String),
}

impl std::fmt::Debug for TileFetch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			TileFetch::Found(bytes) => write!(f, "Found({} bytes)", bytes.len()),
			TileFetch::NotFound => f.write_str("NotFound"),
			TileFetch::ReadError(reason) => write!(f, "ReadError({reason})"),
		}
	}
}

/// An open, read-only MBTiles archive.
pub struct MBTilesArchive {
	path: PathBuf,
	pool: Pool<SqliteConnectionManager>,
}

impl MBTilesArchive {
	/// Opens the archive at `path` with up to `connections` pooled connections.
	///
	/// # Errors
	/// Returns [`ExtractError::ArchiveUnavailable`] with
	/// - [`ArchiveUnavailableReason::Missing`] if `path` does not exist,
	/// - [`ArchiveUnavailableReason::Unreadable`] if it cannot be opened,
	/// - [`ArchiveUnavailableReason::NotAnArchive`] if it is not an SQLite
	///   database with a `tiles` table.
	pub fn open(path: &Path, connections: u32) -> Result<MBTilesArchive, ExtractError> {
		log::debug!("open {path:?}");

		if !path.exists() {
			return Err(ExtractError::archive(path, ArchiveUnavailableReason::Missing));
		}
		File::open(path)
			.map_err(|e| ExtractError::archive(path, ArchiveUnavailableReason::Unreadable(e.to_string())))?;

		let manager = SqliteConnectionManager::file(path)
			.with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX);
		let pool = Pool::builder()
			.max_size(connections.max(1))
			.min_idle(Some(1))
			.connection_timeout(CONNECTION_TIMEOUT)
			.build(manager)
			.map_err(|e| ExtractError::archive(path, ArchiveUnavailableReason::Unreadable(e.to_string())))?;

		let archive = MBTilesArchive {
			path: path.to_path_buf(),
			pool,
		};
		archive.check_schema()?;
		Ok(archive)
	}

	/// Verifies that the file is a database with a `tiles` table or view.
	fn check_schema(&self) -> Result<(), ExtractError> {
		let not_an_archive = |reason: String| ExtractError::archive(&self.path, ArchiveUnavailableReason::NotAnArchive(reason));

		let conn = self
			.pool
			.get()
			.map_err(|e| ExtractError::archive(&self.path, ArchiveUnavailableReason::Unreadable(e.to_string())))?;

		let count = conn
			.query_row(
				"SELECT COUNT(*) FROM sqlite_master WHERE name = 'tiles' AND type IN ('table', 'view')",
				[],
				|row| row.get::<_, i64>(0),
			)
			.map_err(|e| match e {
				SqliteError::SqliteFailure(ref failure, _) if failure.code == ErrorCode::NotADatabase => {
					not_an_archive(e.to_string())
				}
				e => ExtractError::archive(&self.path, ArchiveUnavailableReason::Unreadable(e.to_string())),
			})?;

		if count == 0 {
			return Err(not_an_archive("missing 'tiles' table".to_string()));
		}
		Ok(())
	}

	/// Fetches the raw bytes of one tile.
	pub fn fetch_tile(&self, coord: &TileCoord) -> TileFetch {
		log::trace!("fetch tile {coord:?}");

		let tms_row = match coord.tms_row() {
			Ok(row) => row,
			Err(e) => return TileFetch::ReadError(e.to_string()),
		};
		let conn = match self.pool.get() {
			Ok(conn) => conn,
			Err(e) => return TileFetch::ReadError(e.to_string()),
		};

		let result = conn
			.prepare_cached("SELECT tile_data FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3")
			.and_then(|mut stmt| {
				stmt.query_row(params![coord.level, coord.x, tms_row], |row| {
					row.get::<_, Vec<u8>>(0)
				})
				.optional()
			});

		match result {
			Ok(Some(bytes)) => TileFetch::Found(bytes),
			Ok(None) => TileFetch::NotFound,
			Err(e) => TileFetch::ReadError(e.to_string()),
		}
	}

	/// Reads the `metadata` table as `(name, value)` pairs, sorted by name.
	/// Archives without a `metadata` table yield an empty list.
	pub fn metadata(&self) -> Result<Vec<(String, String)>, ExtractError> {
		let unreadable = |e: &dyn std::fmt::Display| {
			ExtractError::archive(&self.path, ArchiveUnavailableReason::Unreadable(e.to_string()))
		};

		let conn = self.pool.get().map_err(|e| unreadable(&e))?;
		let has_table = conn
			.query_row(
				"SELECT COUNT(*) FROM sqlite_master WHERE name = 'metadata' AND type IN ('table', 'view')",
				[],
				|row| row.get::<_, i64>(0),
			)
			.map_err(|e| unreadable(&e))?;
		if has_table == 0 {
			return Ok(vec![]);
		}

		let mut stmt = conn
			.prepare("SELECT name, value FROM metadata ORDER BY name")
			.map_err(|e| unreadable(&e))?;
		let entries = stmt
			.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
			.map_err(|e| unreadable(&e))?
			.collect::<Result<Vec<_>, _>>()
			.map_err(|e| unreadable(&e))?;
		Ok(entries)
	}

	/// Number of stored tiles per zoom level, ascending.
	pub fn tile_counts(&self) -> Result<Vec<(u8, u64)>, ExtractError> {
		let unreadable = |e: &dyn std::fmt::Display| {
			ExtractError::archive(&self.path, ArchiveUnavailableReason::Unreadable(e.to_string()))
		};

		let conn = self.pool.get().map_err(|e| unreadable(&e))?;
		let mut stmt = conn
			.prepare("SELECT zoom_level, COUNT(*) FROM tiles GROUP BY zoom_level ORDER BY zoom_level")
			.map_err(|e| unreadable(&e))?;
		let counts = stmt
			.query_map([], |row| Ok((row.get::<_, u8>(0)?, row.get::<_, i64>(1)? as u64)))
			.map_err(|e| unreadable(&e))?
			.collect::<Result<Vec<_>, _>>()
			.map_err(|e| unreadable(&e))?;
		Ok(counts)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Releases all pooled connections. Dropping the archive does the same.
	pub fn close(self) {
		log::debug!("close {:?}", self.path);
	}
}

impl std::fmt::Debug for MBTilesArchive {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MBTilesArchive")
			.field("path", &self.path)
			.field("connections", &self.pool.max_size())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MBTilesFixture;
	use assert_fs::{TempDir, prelude::*};
	use pretty_assertions::assert_eq;

	fn fixture(dir: &TempDir) -> PathBuf {
		let path = dir.path().join("fixture.mbtiles");
		MBTilesFixture::new(&path)
			.unwrap()
			.metadata("name", "Fixture")
			.unwrap()
			.metadata("format", "png")
			.unwrap()
			.tile(&TileCoord::new(6, 37, 24).unwrap(), b"tile-6-37-24")
			.unwrap()
			.tile(&TileCoord::new(7, 74, 48).unwrap(), b"tile-7-74-48")
			.unwrap()
			.tile(&TileCoord::new(7, 75, 48).unwrap(), b"tile-7-75-48")
			.unwrap();
		path
	}

	#[test]
	fn fetch_found_and_not_found() {
		let dir = TempDir::new().unwrap();
		let archive = MBTilesArchive::open(&fixture(&dir), 2).unwrap();

		assert_eq!(
			archive.fetch_tile(&TileCoord::new(6, 37, 24).unwrap()),
			TileFetch::Found(b"tile-6-37-24".to_vec())
		);
		assert_eq!(archive.fetch_tile(&TileCoord::new(6, 37, 25).unwrap()), TileFetch::NotFound);
		// the row is flipped: XYZ row 39 is TMS row 24, which was never written
		assert_eq!(archive.fetch_tile(&TileCoord::new(6, 37, 39).unwrap()), TileFetch::NotFound);
		archive.close();
	}

	#[test]
	fn row_outside_the_level_is_a_read_error() {
		let dir = TempDir::new().unwrap();
		let archive = MBTilesArchive::open(&fixture(&dir), 1).unwrap();
		let fetch = archive.fetch_tile(&TileCoord { level: 3, x: 0, y: 9 });
		assert_eq!(
			fetch,
			TileFetch::ReadError("tile 0/9 is out of bounds for zoom level 3".to_string())
		);
	}

	#[test]
	fn metadata_and_counts() {
		let dir = TempDir::new().unwrap();
		let archive = MBTilesArchive::open(&fixture(&dir), 1).unwrap();
		assert_eq!(
			archive.metadata().unwrap(),
			vec![
				("format".to_string(), "png".to_string()),
				("name".to_string(), "Fixture".to_string())
			]
		);
		assert_eq!(archive.tile_counts().unwrap(), vec![(6, 1), (7, 2)]);
	}

	#[test]
	fn missing_file() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("nothing.mbtiles");
		match MBTilesArchive::open(&path, 1).unwrap_err() {
			ExtractError::ArchiveUnavailable { path: p, reason } => {
				assert_eq!(p, path);
				assert_eq!(reason, ArchiveUnavailableReason::Missing);
			}
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[test]
	fn not_a_database() {
		let dir = TempDir::new().unwrap();
		let file = dir.child("garbage.mbtiles");
		file.write_str(&"this is certainly not an sqlite database ".repeat(100)).unwrap();
		let err = MBTilesArchive::open(file.path(), 1).unwrap_err();
		assert!(
			matches!(
				err,
				ExtractError::ArchiveUnavailable {
					reason: ArchiveUnavailableReason::NotAnArchive(_),
					..
				}
			),
			"{err:?}"
		);
	}

	#[test]
	fn database_without_tiles() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("empty.sqlite");
		let conn = r2d2_sqlite::rusqlite::Connection::open(&path).unwrap();
		conn.execute_batch("CREATE TABLE something (a INTEGER);").unwrap();
		drop(conn);

		let err = MBTilesArchive::open(&path, 1).unwrap_err();
		match err {
			ExtractError::ArchiveUnavailable {
				reason: ArchiveUnavailableReason::NotAnArchive(reason),
				..
			} => assert_eq!(reason, "missing 'tiles' table"),
			other => panic!("unexpected error {other:?}"),
		}
	}
}
