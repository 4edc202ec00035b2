use thiserror::Error;

/// Errors raised while constructing or converting geographic and tile values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
	#[error(
		"coordinate ({lon}, {lat}) is out of range: longitude must be within [-180, 180] and latitude within [-{max_lat}, {max_lat}]",
		max_lat = crate::MAX_MERCATOR_LAT
	)]
	CoordinateOutOfRange { lon: f64, lat: f64 },

	#[error("bounding box [{min_lon}, {min_lat}, {max_lon}, {max_lat}] is invalid: {reason}")]
	InvalidBBox {
		min_lon: f64,
		min_lat: f64,
		max_lon: f64,
		max_lat: f64,
		reason: String,
	},

	#[error("expected {expected} values, got {actual}")]
	WrongLength { expected: usize, actual: usize },

	#[error("zoom level {0} is out of range, must be <= {max}", max = crate::MAX_LEVEL)]
	InvalidLevel(u8),

	#[error("zoom range {min}..={max} is invalid: min must be <= max")]
	InvalidZoomRange { min: u8, max: u8 },

	#[error("tile {x}/{y} is out of bounds for zoom level {level}")]
	TileOutOfBounds { level: u8, x: u32, y: u32 },

	#[error("unknown tile format '{0}'")]
	UnknownTileFormat(String),
}
