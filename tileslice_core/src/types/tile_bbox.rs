//! Rectangular ranges of tiles on a single zoom level.
//!
//! A [`TileBBox`] is the tile-index footprint of a [`GeoBBox`] at one zoom
//! level. Both ends are inclusive, so a range always covers at least one
//! tile.

use crate::{GeoBBox, GeoError, TileCoord};
use itertools::Itertools;
use std::fmt;

/// Inclusive range of tile columns and rows on one zoom level.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileBBox {
	pub level: u8,
	pub x_min: u32,
	pub y_min: u32,
	pub x_max: u32,
	pub y_max: u32,
}

impl TileBBox {
	/// Creates a range from its inclusive bounds.
	///
	/// # Errors
	/// Fails if a bound lies outside the grid of `level` or a minimum exceeds
	/// its maximum.
	pub fn from_min_and_max(level: u8, x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Result<TileBBox, GeoError> {
		let min = TileCoord::new(level, x_min, y_min)?;
		let max = TileCoord::new(level, x_max, y_max)?;
		if min.x > max.x || min.y > max.y {
			return Err(GeoError::TileOutOfBounds {
				level,
				x: x_min,
				y: y_min,
			});
		}
		Ok(TileBBox {
			level,
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	/// Every tile of `level`.
	pub fn new_full(level: u8) -> Result<TileBBox, GeoError> {
		let max = TileCoord::new(level, 0, 0).map(|_| ((1u64 << level) - 1) as u32)?;
		TileBBox::from_min_and_max(level, 0, 0, max, max)
	}

	/// Computes the tiles covering `bbox` at `level`.
	///
	/// The north-west corner gives the minimum column and row, the south-east
	/// corner the maximum ones.
	///
	/// # Examples
	/// ```
	/// use tileslice_core::{GeoBBox, TileBBox};
	///
	/// let bbox = GeoBBox::new(-180.0, -85.0, 180.0, 85.0).unwrap();
	/// let range = TileBBox::from_geo(2, &bbox).unwrap();
	/// assert_eq!(range.count_tiles(), 16);
	/// ```
	pub fn from_geo(level: u8, bbox: &GeoBBox) -> Result<TileBBox, GeoError> {
		let min = TileCoord::from_point(&bbox.north_west(), level)?;
		let max = TileCoord::from_point(&bbox.south_east(), level)?;
		Ok(TileBBox {
			level,
			x_min: min.x.min(max.x),
			y_min: min.y.min(max.y),
			x_max: min.x.max(max.x),
			y_max: min.y.max(max.y),
		})
	}

	pub fn width(&self) -> u32 {
		self.x_max - self.x_min + 1
	}

	pub fn height(&self) -> u32 {
		self.y_max - self.y_min + 1
	}

	/// Number of tiles in the range.
	pub fn count_tiles(&self) -> u64 {
		u64::from(self.width()) * u64::from(self.height())
	}

	pub fn contains(&self, coord: &TileCoord) -> bool {
		coord.level == self.level
			&& coord.x >= self.x_min
			&& coord.x <= self.x_max
			&& coord.y >= self.y_min
			&& coord.y <= self.y_max
	}

	/// Iterates all coordinates in row-major order (north to south, west to east).
	pub fn iter_coords(&self) -> impl Iterator<Item = TileCoord> + use<> {
		let level = self.level;
		let y_range = self.y_min..=self.y_max;
		let x_range = self.x_min..=self.x_max;
		y_range
			.cartesian_product(x_range)
			.map(move |(y, x)| TileCoord { level, x, y })
	}

	/// Geographic area covered by the whole range.
	pub fn to_geo_bbox(&self) -> GeoBBox {
		let [x_min, y_max] = TileCoord::coord_to_geo(self.level, self.x_min, self.y_min);
		let [x_max, y_min] = TileCoord::coord_to_geo(self.level, self.x_max + 1, self.y_max + 1);
		GeoBBox::from_corners(x_min, y_min, x_max, y_max)
	}
}

impl fmt::Debug for TileBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: [{},{},{},{}] ({}x{})",
			self.level,
			self.x_min,
			self.y_min,
			self.x_max,
			self.y_max,
			self.width(),
			self.height()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[test]
	fn ankara_at_zoom_6_is_one_tile() {
		let bbox = GeoBBox::new(32.5, 39.7, 33.2, 40.1).unwrap();
		let range = TileBBox::from_geo(6, &bbox).unwrap();
		assert_eq!(range, TileBBox::from_min_and_max(6, 37, 24, 37, 24).unwrap());
		assert_eq!(range.count_tiles(), 1);
		assert_eq!(format!("{range:?}"), "6: [37,24,37,24] (1x1)");
	}

	#[test]
	fn rows_come_from_opposite_latitudes() {
		// the north edge gives the smaller row
		let bbox = GeoBBox::new(-10.0, -40.0, 10.0, 40.0).unwrap();
		let range = TileBBox::from_geo(3, &bbox).unwrap();
		assert_eq!(format!("{range:?}"), "3: [3,3,4,4] (2x2)");
		assert!(range.y_min < range.y_max);
	}

	#[test]
	fn world_edges_are_clamped() {
		let range = TileBBox::from_geo(4, &GeoBBox::world()).unwrap();
		assert_eq!(range, TileBBox::new_full(4).unwrap());
		assert_eq!(range.count_tiles(), 256);
	}

	#[rstest]
	#[case([25.31, 35.46, 45.0, 42.55])]
	#[case([-180.0, -85.0511, 180.0, 85.0511])]
	#[case([179.9, 85.0, 180.0, 85.05])]
	#[case([-0.001, -0.001, 0.001, 0.001])]
	#[case([13.0, 52.3, 13.8, 52.7])]
	fn ranges_stay_inside_the_grid(#[case] bbox: [f64; 4]) {
		let bbox = GeoBBox::try_from(bbox).unwrap();
		for level in 0..=22u8 {
			let range = TileBBox::from_geo(level, &bbox).unwrap();
			let size = 1u64 << level;
			assert!(range.x_min <= range.x_max);
			assert!(range.y_min <= range.y_max);
			assert!(u64::from(range.x_max) < size);
			assert!(u64::from(range.y_max) < size);
			// every corner of the box lies inside the covered area
			let covered = range.to_geo_bbox();
			assert!(
				covered.x_min <= bbox.x_min + 1e-9 && covered.x_max >= bbox.x_max - 1e-9,
				"{covered:?} vs {bbox:?}"
			);
			assert!(covered.y_min <= bbox.y_min + 1e-9 && covered.y_max >= bbox.y_max - 1e-9);
		}
	}

	#[test]
	fn iterates_row_major() {
		let range = TileBBox::from_min_and_max(3, 1, 4, 2, 5).unwrap();
		let coords: Vec<String> = range.iter_coords().map(|c| c.to_string()).collect();
		assert_eq!(coords, vec!["3/1/4", "3/2/4", "3/1/5", "3/2/5"]);
		assert_eq!(range.iter_coords().count() as u64, range.count_tiles());
		assert!(range.iter_coords().all(|c| range.contains(&c)));
	}

	#[test]
	fn contains_checks_level() {
		let range = TileBBox::from_min_and_max(3, 1, 4, 2, 5).unwrap();
		assert!(range.contains(&TileCoord::new(3, 2, 5).unwrap()));
		assert!(!range.contains(&TileCoord::new(3, 3, 5).unwrap()));
		assert!(!range.contains(&TileCoord::new(4, 2, 5).unwrap()));
	}

	#[test]
	fn rejects_inverted_or_oversized_bounds() {
		assert!(TileBBox::from_min_and_max(3, 5, 0, 4, 0).is_err());
		assert!(TileBBox::from_min_and_max(3, 0, 0, 8, 0).is_err());
		assert!(TileBBox::new_full(32).is_err());
	}
}
