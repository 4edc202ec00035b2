//! Three-dimensional tile coordinates in a Web Mercator pyramid
//!
//! [`TileCoord`] addresses one tile in the XYZ scheme: row 0 is the
//! northernmost row. It converts between geographic positions and tile
//! indices and between the XYZ and TMS row conventions.
//!
//! # Examples
//!
//! ```
//! use tileslice_core::TileCoord;
//!
//! let coord = TileCoord::from_geo(32.85, 39.93, 6).unwrap();
//! assert_eq!((coord.level, coord.x, coord.y), (6, 37, 24));
//! assert_eq!(coord.tms_row(), Ok(39));
//! ```

use crate::{GeoBBox, GeoError, GeoPoint};
use std::{
	f64::consts::PI,
	fmt::{self, Debug, Display},
};

/// Highest supported zoom level.
pub const MAX_LEVEL: u8 = 31;

/// A tile coordinate with zoom level, column (`x`) and XYZ row (`y`).
#[derive(Eq, PartialEq, Clone, Hash, Copy, PartialOrd, Ord)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The column of the tile.
	pub x: u32,
	/// The row of the tile, counted from the north.
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord` at the given zoom `level` and tile indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or if `x` or `y` are not below `2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord, GeoError> {
		let size = level_size(level)?;
		if u64::from(x) >= size || u64::from(y) >= size {
			return Err(GeoError::TileOutOfBounds { level, x, y });
		}
		Ok(TileCoord { level, x, y })
	}

	/// Projects a geographic position onto the tile grid of `level`.
	///
	/// `x = floor((lon + 180) / 360 * 2^z)` and
	/// `y = floor((1 - ln(tan(φ) + sec(φ)) / π) / 2 * 2^z)`.
	/// Positions on the east or south edge of the world fall into the last
	/// column or row.
	///
	/// # Errors
	/// Returns [`GeoError::CoordinateOutOfRange`] for positions outside the
	/// Web Mercator area and [`GeoError::InvalidLevel`] for `level` > 31.
	///
	/// # Examples
	/// ```
	/// use tileslice_core::TileCoord;
	///
	/// let coord = TileCoord::from_geo(180.0, -85.0511, 3).unwrap();
	/// assert_eq!((coord.x, coord.y), (7, 7));
	/// ```
	pub fn from_geo(lon: f64, lat: f64, level: u8) -> Result<TileCoord, GeoError> {
		GeoPoint::check(lon, lat)?;
		let size = level_size(level)? as f64;

		let lat_rad = lat.to_radians();
		let x = (lon + 180.0) / 360.0 * size;
		let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * size;

		Ok(TileCoord {
			level,
			x: x.floor().clamp(0.0, size - 1.0) as u32,
			y: y.floor().clamp(0.0, size - 1.0) as u32,
		})
	}

	pub fn from_point(point: &GeoPoint, level: u8) -> Result<TileCoord, GeoError> {
		TileCoord::from_geo(point.lon, point.lat, level)
	}

	/// Geographic position of the north-west corner of tile `(x, y)`.
	///
	/// `x` and `y` may equal `2^level` to address the far edges of the grid.
	///
	/// # Examples
	/// ```
	/// use tileslice_core::TileCoord;
	///
	/// let [lon, lat] = TileCoord::coord_to_geo(10, 1, 1020);
	/// assert_eq!(format!("{lon:.5}"), "-179.64844");
	/// assert_eq!(format!("{lat:.5}"), "-84.92832");
	/// ```
	pub fn coord_to_geo(level: u8, x: u32, y: u32) -> [f64; 2] {
		let zoom: f64 = 2.0f64.powi(i32::from(level));
		[
			(f64::from(x) / zoom - 0.5) * 360.0,
			((PI * (1.0 - 2.0 * f64::from(y) / zoom)).exp().atan() / PI - 0.25) * 360.0,
		]
	}

	/// North-west corner of this tile.
	pub fn to_geo(&self) -> GeoPoint {
		let [lon, lat] = TileCoord::coord_to_geo(self.level, self.x, self.y);
		GeoPoint { lon, lat }
	}

	/// Full geographic boundary of this tile.
	pub fn to_geo_bbox(&self) -> GeoBBox {
		let [x_min, y_max] = TileCoord::coord_to_geo(self.level, self.x, self.y);
		let [x_max, y_min] = TileCoord::coord_to_geo(self.level, self.x.saturating_add(1), self.y.saturating_add(1));
		GeoBBox::from_corners(x_min, y_min, x_max, y_max)
	}

	/// Row of this tile in the TMS convention (row 0 in the south), as stored
	/// in MBTiles archives: `2^level - 1 - y`.
	///
	/// # Errors
	/// Fails for a hand-built coordinate whose row lies outside its level.
	pub fn tms_row(&self) -> Result<u32, GeoError> {
		flip_row(self.level, self.y).ok_or(GeoError::TileOutOfBounds {
			level: self.level,
			x: self.x,
			y: self.y,
		})
	}

	/// Creates a coordinate from a TMS row.
	pub fn from_tms(level: u8, x: u32, tms_row: u32) -> Result<TileCoord, GeoError> {
		let row = flip_row(level, tms_row).ok_or(GeoError::TileOutOfBounds { level, x, y: tms_row })?;
		TileCoord::new(level, x, row)
	}
}

/// Number of tiles along one axis at `level`.
fn level_size(level: u8) -> Result<u64, GeoError> {
	if level > MAX_LEVEL {
		return Err(GeoError::InvalidLevel(level));
	}
	Ok(1u64 << level)
}

/// Converts a row between XYZ and TMS. The conversion is its own inverse.
/// `None` if `row` does not exist on `level`.
fn flip_row(level: u8, row: u32) -> Option<u32> {
	let max_index = level_size(level).ok()? - 1;
	u32::try_from(max_index.checked_sub(u64::from(row))?).ok()
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}, [{}, {}])", &self.level, &self.x, &self.y))
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rstest::rstest;

	#[test]
	fn new_checks_bounds() {
		assert!(TileCoord::new(0, 0, 0).is_ok());
		assert!(TileCoord::new(3, 7, 7).is_ok());
		assert_eq!(
			TileCoord::new(3, 8, 0).unwrap_err(),
			GeoError::TileOutOfBounds { level: 3, x: 8, y: 0 }
		);
		assert_eq!(
			TileCoord::new(3, 0, 8).unwrap_err(),
			GeoError::TileOutOfBounds { level: 3, x: 0, y: 8 }
		);
		assert_eq!(TileCoord::new(32, 0, 0).unwrap_err(), GeoError::InvalidLevel(32));
		assert!(TileCoord::new(31, u32::MAX >> 1, 0).is_ok());
	}

	#[rstest]
	#[case(0.0, 0.0, 0, (0, 0))]
	#[case(0.0, 0.0, 1, (1, 1))]
	#[case(-180.0, MAX_MERCATOR_LAT_TEST, 4, (0, 0))]
	#[case(180.0, -MAX_MERCATOR_LAT_TEST, 4, (15, 15))]
	#[case(32.5, 40.1, 6, (37, 24))]
	#[case(33.2, 39.7, 6, (37, 24))]
	#[case(13.404954, 52.520008, 10, (550, 335))]
	#[case(-74.0060, 40.7128, 12, (1205, 1539))]
	fn from_geo_cases(#[case] lon: f64, #[case] lat: f64, #[case] level: u8, #[case] expected: (u32, u32)) {
		let coord = TileCoord::from_geo(lon, lat, level).unwrap();
		assert_eq!((coord.x, coord.y), expected);
		assert_eq!(coord.level, level);
	}

	const MAX_MERCATOR_LAT_TEST: f64 = crate::MAX_MERCATOR_LAT;

	#[rstest]
	#[case(181.0, 0.0)]
	#[case(0.0, 85.1)]
	#[case(0.0, -89.0)]
	fn from_geo_rejects_out_of_range(#[case] lon: f64, #[case] lat: f64) {
		assert_eq!(
			TileCoord::from_geo(lon, lat, 5).unwrap_err(),
			GeoError::CoordinateOutOfRange { lon, lat }
		);
	}

	#[test]
	fn from_geo_rejects_level() {
		assert_eq!(TileCoord::from_geo(0.0, 0.0, 32).unwrap_err(), GeoError::InvalidLevel(32));
	}

	#[test]
	fn to_geo_returns_north_west_corner() {
		let p = TileCoord::new(1, 1, 1).unwrap().to_geo();
		assert_abs_diff_eq!(p.lon, 0.0, epsilon = 1e-12);
		assert_abs_diff_eq!(p.lat, 0.0, epsilon = 1e-12);

		let p = TileCoord::new(0, 0, 0).unwrap().to_geo();
		assert_abs_diff_eq!(p.lon, -180.0, epsilon = 1e-12);
		assert_abs_diff_eq!(p.lat, MAX_MERCATOR_LAT_TEST, epsilon = 1e-9);
	}

	#[test]
	fn to_geo_bbox_covers_tile() {
		let bbox = TileCoord::new(2, 1, 2).unwrap().to_geo_bbox();
		assert_abs_diff_eq!(bbox.x_min, -90.0, epsilon = 1e-12);
		assert_abs_diff_eq!(bbox.x_max, 0.0, epsilon = 1e-12);
		assert_abs_diff_eq!(bbox.y_max, 0.0, epsilon = 1e-12);
		assert_abs_diff_eq!(bbox.y_min, -66.51326044311186, epsilon = 1e-9);
	}

	#[rstest]
	#[case(32.85, 39.93)]
	#[case(-179.9999, 85.05)]
	#[case(179.9999, -85.05)]
	#[case(-0.0001, 0.0001)]
	#[case(139.6917, 35.6895)]
	fn round_trip_contains_original_point(#[case] lon: f64, #[case] lat: f64) {
		for level in 0..=20 {
			let coord = TileCoord::from_geo(lon, lat, level).unwrap();
			let bbox = coord.to_geo_bbox();
			assert!(
				bbox.x_min <= lon && lon <= bbox.x_max,
				"lon {lon} not in {bbox:?} at level {level}"
			);
			assert!(
				bbox.y_min <= lat && lat <= bbox.y_max,
				"lat {lat} not in {bbox:?} at level {level}"
			);
			// and the tile's own corner projects back onto the same tile
			let corner = coord.to_geo();
			let center_lon = (corner.lon + bbox.x_max) / 2.0;
			let center_lat = (corner.lat + bbox.y_min) / 2.0;
			assert_eq!(TileCoord::from_geo(center_lon, center_lat, level).unwrap(), coord);
		}
	}

	#[rstest]
	#[case(0, 0, 0)]
	#[case(1, 0, 1)]
	#[case(1, 1, 0)]
	#[case(6, 24, 39)]
	#[case(14, 5376, 11007)]
	fn tms_row_flips_per_level(#[case] level: u8, #[case] xyz_row: u32, #[case] tms_row: u32) {
		let coord = TileCoord::new(level, 0, xyz_row).unwrap();
		assert_eq!(coord.tms_row(), Ok(tms_row));
		assert_eq!(TileCoord::from_tms(level, 0, tms_row).unwrap(), coord);
	}

	#[test]
	fn tms_row_at_max_level() {
		let coord = TileCoord::new(31, 0, 0).unwrap();
		assert_eq!(coord.tms_row(), Ok((1u32 << 31) - 1));
		assert!(TileCoord::from_tms(3, 0, 8).is_err());
	}

	#[test]
	fn tms_row_of_hand_built_coords() {
		let outside = TileCoord { level: 3, x: 0, y: 9 };
		assert_eq!(outside.tms_row(), Err(GeoError::TileOutOfBounds { level: 3, x: 0, y: 9 }));
		assert!(TileCoord { level: 40, x: 0, y: 0 }.tms_row().is_err());
	}

	#[test]
	fn formatting() {
		let coord = TileCoord::new(6, 37, 24).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(6, [37, 24])");
		assert_eq!(coord.to_string(), "6/37/24");
	}
}
