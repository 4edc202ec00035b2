use crate::{GeoError, GeoPoint};
use std::fmt::Debug;

/// A geographical bounding box (`GeoBBox`) represents a rectangular area on a map
/// defined by its minimum and maximum longitude (x) and latitude (y) coordinates.
///
/// - `x_min` (west): Minimum longitude.
/// - `y_min` (south): Minimum latitude.
/// - `x_max` (east): Maximum longitude.
/// - `y_max` (north): Maximum latitude.
///
/// Every corner must be a valid [`GeoPoint`] and the box must have a positive
/// extent on both axes. Once built, a `GeoBBox` is never modified in place;
/// operations such as [`intersection`](Self::intersection) return new values.
///
/// # Examples
/// ```
/// use tileslice_core::GeoBBox;
///
/// let turkey = GeoBBox::new(25.31, 35.46, 45.0, 42.55).unwrap();
/// let ankara = GeoBBox::new(32.5, 39.7, 33.2, 40.1).unwrap();
/// assert!(turkey.contains(&ankara));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl GeoBBox {
	/// Creates a new `GeoBBox` from `west, south, east, north`.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GeoBBox, GeoError> {
		GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
		.checked()
	}

	/// Like [`new`](Self::new), but latitudes beyond the Web Mercator span
	/// are first cut to it. Archive metadata often declares `-90`/`90`.
	pub fn new_limited_to_mercator(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GeoBBox, GeoError> {
		let limit = |lat: f64| lat.clamp(-crate::MAX_MERCATOR_LAT, crate::MAX_MERCATOR_LAT);
		GeoBBox::new(x_min, limit(y_min), x_max, limit(y_max))
	}

	/// The whole area covered by Web Mercator tiles.
	pub fn world() -> GeoBBox {
		GeoBBox {
			x_min: -crate::MAX_MERCATOR_LNG,
			y_min: -crate::MAX_MERCATOR_LAT,
			x_max: crate::MAX_MERCATOR_LNG,
			y_max: crate::MAX_MERCATOR_LAT,
		}
	}

	/// Builds a box from corners that were computed, not supplied, and are
	/// known to be ordered (e.g. tile boundaries).
	pub(crate) fn from_corners(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> GeoBBox {
		GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
	}

	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Returns the bounding box as a string in the form `x_min,y_min,x_max,y_max`.
	///
	/// # Examples
	/// ```
	/// use tileslice_core::GeoBBox;
	///
	/// let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
	/// assert_eq!(bbox.as_string_list(), "-10,-5,10,5");
	/// ```
	pub fn as_string_list(&self) -> String {
		format!("{},{},{},{}", self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// North-west corner, the point with the smallest tile column and row.
	pub fn north_west(&self) -> GeoPoint {
		GeoPoint {
			lon: self.x_min,
			lat: self.y_max,
		}
	}

	/// South-east corner, the point with the largest tile column and row.
	pub fn south_east(&self) -> GeoPoint {
		GeoPoint {
			lon: self.x_max,
			lat: self.y_min,
		}
	}

	/// Returns `true` if both boxes share an area.
	///
	/// Each axis is treated as a half-open interval, so boxes that only touch
	/// along an edge do not intersect.
	pub fn intersects(&self, other: &GeoBBox) -> bool {
		self.x_min < other.x_max && other.x_min < self.x_max && self.y_min < other.y_max && other.y_min < self.y_max
	}

	/// Returns `true` if `other` lies completely inside `self`.
	pub fn contains(&self, other: &GeoBBox) -> bool {
		self.x_min <= other.x_min && self.y_min <= other.y_min && self.x_max >= other.x_max && self.y_max >= other.y_max
	}

	/// Returns the shared area of both boxes, or `None` if they do not
	/// [intersect](Self::intersects).
	///
	/// # Examples
	/// ```
	/// use tileslice_core::GeoBBox;
	///
	/// let bbox1 = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
	/// let bbox2 = GeoBBox::new(-8.0, -4.0, 12.0, 4.0).unwrap();
	/// let bbox3 = bbox1.intersection(&bbox2).unwrap();
	/// assert_eq!(bbox3.as_tuple(), (-8.0, -4.0, 10.0, 4.0));
	/// ```
	pub fn intersection(&self, other: &GeoBBox) -> Option<GeoBBox> {
		if !self.intersects(other) {
			return None;
		}
		Some(GeoBBox {
			x_min: self.x_min.max(other.x_min),
			y_min: self.y_min.max(other.y_min),
			x_max: self.x_max.min(other.x_max),
			y_max: self.y_max.min(other.y_max),
		})
	}

	fn checked(self) -> Result<Self, GeoError> {
		let invalid = |reason: String| GeoError::InvalidBBox {
			min_lon: self.x_min,
			min_lat: self.y_min,
			max_lon: self.x_max,
			max_lat: self.y_max,
			reason,
		};
		GeoPoint::check(self.x_min, self.y_min).map_err(|e| invalid(e.to_string()))?;
		GeoPoint::check(self.x_max, self.y_max).map_err(|e| invalid(e.to_string()))?;
		if self.x_min >= self.x_max {
			return Err(invalid(format!(
				"min longitude ({}) must be < max longitude ({})",
				self.x_min, self.x_max
			)));
		}
		if self.y_min >= self.y_max {
			return Err(invalid(format!(
				"min latitude ({}) must be < max latitude ({})",
				self.y_min, self.y_max
			)));
		}
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

impl TryFrom<Vec<f64>> for GeoBBox {
	type Error = GeoError;

	/// Attempts to build a `GeoBBox` from exactly four values
	/// `[west, south, east, north]`.
	fn try_from(input: Vec<f64>) -> Result<Self, GeoError> {
		if input.len() != 4 {
			return Err(GeoError::WrongLength {
				expected: 4,
				actual: input.len(),
			});
		}
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

impl TryFrom<[f64; 4]> for GeoBBox {
	type Error = GeoError;

	fn try_from(input: [f64; 4]) -> Result<Self, GeoError> {
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_creation() {
		let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
		assert_eq!(bbox.x_min, -10.0);
		assert_eq!(bbox.y_min, -5.0);
		assert_eq!(bbox.x_max, 10.0);
		assert_eq!(bbox.y_max, 5.0);
	}

	#[rstest]
	#[case([-190.0, -5.0, 10.0, 5.0], "west < -180")]
	#[case([-10.0, -5.0, 190.0, 5.0], "east > 180")]
	#[case([-10.0, -86.0, 10.0, 5.0], "south beyond mercator")]
	#[case([-10.0, -5.0, 10.0, 86.0], "north beyond mercator")]
	#[case([10.0, -5.0, -10.0, 5.0], "west > east")]
	#[case([-10.0, 6.0, 10.0, 5.0], "south > north")]
	#[case([10.0, -5.0, 10.0, 5.0], "zero width")]
	#[case([-10.0, 5.0, 10.0, 5.0], "zero height")]
	fn test_check_invalid(#[case] input: [f64; 4], #[case] message: &str) {
		let result = GeoBBox::try_from(input);
		assert!(
			matches!(result, Err(GeoError::InvalidBBox { .. })),
			"expected error for {message}"
		);
	}

	#[test]
	fn test_try_from_vec() {
		let bbox = GeoBBox::try_from(vec![-10.0, -5.0, 10.0, 5.0]).unwrap();
		assert_eq!(bbox.as_tuple(), (-10.0, -5.0, 10.0, 5.0));

		assert_eq!(
			GeoBBox::try_from(vec![-10.0, -5.0, 10.0]).unwrap_err(),
			GeoError::WrongLength { expected: 4, actual: 3 }
		);
	}

	#[test]
	fn test_world_is_valid() {
		let world = GeoBBox::world();
		assert_eq!(GeoBBox::try_from(world.as_array()).unwrap(), world);
	}

	#[test]
	fn test_limited_to_mercator() {
		assert_eq!(
			GeoBBox::new_limited_to_mercator(-180.0, -90.0, 180.0, 90.0).unwrap(),
			GeoBBox::world()
		);
		assert_eq!(
			GeoBBox::new_limited_to_mercator(0.0, 80.0, 10.0, 89.0).unwrap().as_tuple(),
			(0.0, 80.0, 10.0, crate::MAX_MERCATOR_LAT)
		);
		// longitudes are not cut
		assert!(GeoBBox::new_limited_to_mercator(-190.0, 0.0, 10.0, 5.0).is_err());
		// nothing is left north of the span
		assert!(GeoBBox::new_limited_to_mercator(0.0, 86.0, 10.0, 89.0).is_err());
	}

	#[test]
	fn test_as_string() {
		let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
		assert_eq!(bbox.as_string_list(), "-10,-5,10,5");
		assert_eq!(format!("{bbox:?}"), "GeoBBox(-10, -5, 10, 5)");
	}

	#[test]
	fn test_corners() {
		let bbox = GeoBBox::new(32.5, 39.7, 33.2, 40.1).unwrap();
		assert_eq!(bbox.north_west().as_array(), [32.5, 40.1]);
		assert_eq!(bbox.south_east().as_array(), [33.2, 39.7]);
	}

	#[test]
	fn test_intersection() {
		let bbox1 = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
		let bbox2 = GeoBBox::new(-8.0, -4.0, 12.0, 4.0).unwrap();
		assert!(bbox1.intersects(&bbox2));
		assert!(bbox2.intersects(&bbox1));
		assert_eq!(bbox1.intersection(&bbox2).unwrap().as_tuple(), (-8.0, -4.0, 10.0, 4.0));
		// original remains unchanged
		assert_eq!(bbox1.as_tuple(), (-10.0, -5.0, 10.0, 5.0));
	}

	#[test]
	fn test_intersection_no_overlap() {
		let asia = GeoBBox::new(100.0, 30.0, 110.0, 40.0).unwrap();
		let turkey = GeoBBox::new(25.31, 35.46, 45.0, 42.55).unwrap();
		assert!(!asia.intersects(&turkey));
		assert_eq!(asia.intersection(&turkey), None);
	}

	#[test]
	fn test_touching_edges_do_not_intersect() {
		let west = GeoBBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
		let east = GeoBBox::new(10.0, 0.0, 20.0, 10.0).unwrap();
		assert!(!west.intersects(&east));
		assert_eq!(west.intersection(&east), None);
	}

	#[test]
	fn test_contains() {
		let turkey = GeoBBox::new(25.31, 35.46, 45.0, 42.55).unwrap();
		let ankara = GeoBBox::new(32.5, 39.7, 33.2, 40.1).unwrap();
		let straddling = GeoBBox::new(40.0, 40.0, 50.0, 45.0).unwrap();
		assert!(turkey.contains(&ankara));
		assert!(turkey.contains(&turkey));
		assert!(!turkey.contains(&straddling));
		assert!(!ankara.contains(&turkey));
	}
}
