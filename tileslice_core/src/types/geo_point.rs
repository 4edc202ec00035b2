use crate::GeoError;
use std::fmt::{self, Debug};

/// Latitude limit of the Web Mercator projection in degrees.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;
/// Longitude limit in degrees.
pub const MAX_MERCATOR_LNG: f64 = 180.0;

/// A geographic position in WGS84 degrees.
///
/// Longitude lies within `[-180, 180]` and latitude within the Web Mercator
/// span `[-85.0511, 85.0511]`. Anything else is rejected, never clamped.
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
	pub lon: f64,
	pub lat: f64,
}

impl GeoPoint {
	/// Creates a validated point.
	///
	/// # Examples
	/// ```
	/// use tileslice_core::GeoPoint;
	///
	/// assert!(GeoPoint::new(32.85, 39.93).is_ok());
	/// assert!(GeoPoint::new(32.85, 89.0).is_err());
	/// ```
	pub fn new(lon: f64, lat: f64) -> Result<GeoPoint, GeoError> {
		GeoPoint::check(lon, lat)?;
		Ok(GeoPoint { lon, lat })
	}

	/// Checks that `(lon, lat)` is inside the projectable area. NaN is rejected.
	pub fn check(lon: f64, lat: f64) -> Result<(), GeoError> {
		let lon_ok = (-MAX_MERCATOR_LNG..=MAX_MERCATOR_LNG).contains(&lon);
		let lat_ok = (-MAX_MERCATOR_LAT..=MAX_MERCATOR_LAT).contains(&lat);
		if lon_ok && lat_ok {
			Ok(())
		} else {
			Err(GeoError::CoordinateOutOfRange { lon, lat })
		}
	}

	pub fn as_array(&self) -> [f64; 2] {
		[self.lon, self.lat]
	}
}

impl Debug for GeoPoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "GeoPoint({}, {})", self.lon, self.lat)
	}
}

impl TryFrom<Vec<f64>> for GeoPoint {
	type Error = GeoError;

	fn try_from(input: Vec<f64>) -> Result<Self, GeoError> {
		if input.len() != 2 {
			return Err(GeoError::WrongLength {
				expected: 2,
				actual: input.len(),
			});
		}
		GeoPoint::new(input[0], input[1])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0.0, 0.0)]
	#[case(-180.0, -85.0511)]
	#[case(180.0, 85.0511)]
	#[case(180.0, MAX_MERCATOR_LAT)]
	fn accepts_projectable_points(#[case] lon: f64, #[case] lat: f64) {
		assert!(GeoPoint::new(lon, lat).is_ok());
	}

	#[rstest]
	#[case(180.1, 0.0)]
	#[case(-180.1, 0.0)]
	#[case(0.0, 85.06)]
	#[case(0.0, -90.0)]
	#[case(f64::NAN, 0.0)]
	fn rejects_points_outside_mercator(#[case] lon: f64, #[case] lat: f64) {
		let err = GeoPoint::new(lon, lat).unwrap_err();
		assert!(matches!(err, GeoError::CoordinateOutOfRange { .. }));
	}

	#[test]
	fn try_from_vec() {
		assert_eq!(
			GeoPoint::try_from(vec![32.85, 39.93]).unwrap(),
			GeoPoint { lon: 32.85, lat: 39.93 }
		);
		assert_eq!(
			GeoPoint::try_from(vec![1.0]).unwrap_err(),
			GeoError::WrongLength { expected: 2, actual: 1 }
		);
	}

	#[test]
	fn debug_format() {
		assert_eq!(format!("{:?}", GeoPoint::new(-10.5, 5.0).unwrap()), "GeoPoint(-10.5, 5)");
	}
}
