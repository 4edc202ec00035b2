//! Tile payload formats and the file extensions written for them.
//!
//! ```
//! use tileslice_core::{TileFormat, TileKind};
//!
//! let format = TileFormat::try_from_str("JPEG").unwrap();
//! assert_eq!(format, TileFormat::Jpg);
//! assert_eq!(format.extension(), "jpg");
//! assert_eq!(TileFormat::Pbf.kind(), TileKind::Vector);
//! ```

use crate::GeoError;
use std::fmt::{Display, Formatter};

/// Whether a format holds vector or raster data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileKind {
	Raster,
	Vector,
}

impl Display for TileKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			TileKind::Raster => "raster",
			TileKind::Vector => "vector",
		})
	}
}

/// Format of the tiles stored in a source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileFormat {
	/// Mapbox vector tiles in protocol buffer encoding.
	Pbf,
	Png,
	Jpg,
	Webp,
}

impl TileFormat {
	/// Lowercase name of the format, as used in configuration files.
	pub fn as_str(&self) -> &'static str {
		match self {
			TileFormat::Pbf => "pbf",
			TileFormat::Png => "png",
			TileFormat::Jpg => "jpg",
			TileFormat::Webp => "webp",
		}
	}

	/// Parses a format name, ignoring case and surrounding whitespace.
	/// `mvt` is accepted for `pbf` and `jpeg` for `jpg`.
	pub fn try_from_str(value: &str) -> Result<Self, GeoError> {
		Ok(match value.trim().to_lowercase().as_str() {
			"pbf" | "mvt" => TileFormat::Pbf,
			"png" => TileFormat::Png,
			"jpg" | "jpeg" => TileFormat::Jpg,
			"webp" => TileFormat::Webp,
			_ => return Err(GeoError::UnknownTileFormat(value.to_string())),
		})
	}

	pub fn kind(&self) -> TileKind {
		match self {
			TileFormat::Pbf => TileKind::Vector,
			TileFormat::Png | TileFormat::Jpg | TileFormat::Webp => TileKind::Raster,
		}
	}

	pub fn is_vector(&self) -> bool {
		self.kind() == TileKind::Vector
	}

	/// Default file extension (without a leading dot) for written tiles.
	pub fn extension(&self) -> &'static str {
		self.as_str()
	}
}

impl Display for TileFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("pbf", TileFormat::Pbf)]
	#[case("MVT", TileFormat::Pbf)]
	#[case(" png ", TileFormat::Png)]
	#[case("jpeg", TileFormat::Jpg)]
	#[case("JPG", TileFormat::Jpg)]
	#[case("webp", TileFormat::Webp)]
	fn parses_names(#[case] input: &str, #[case] expected: TileFormat) {
		assert_eq!(TileFormat::try_from_str(input).unwrap(), expected);
	}

	#[test]
	fn rejects_unknown_names() {
		assert_eq!(
			TileFormat::try_from_str("tiff").unwrap_err(),
			GeoError::UnknownTileFormat("tiff".to_string())
		);
	}

	#[rstest]
	#[case(TileFormat::Pbf, "pbf", TileKind::Vector)]
	#[case(TileFormat::Png, "png", TileKind::Raster)]
	#[case(TileFormat::Jpg, "jpg", TileKind::Raster)]
	#[case(TileFormat::Webp, "webp", TileKind::Raster)]
	fn extensions_and_kinds(#[case] format: TileFormat, #[case] extension: &str, #[case] kind: TileKind) {
		assert_eq!(format.extension(), extension);
		assert_eq!(format.kind(), kind);
		assert_eq!(format.is_vector(), kind == TileKind::Vector);
		assert_eq!(format.to_string(), extension);
	}
}
