use super::{ConfigReport, source::check_zoom_pair};
use serde::Deserialize;
use std::path::PathBuf;
use tileslice_container::DEFAULT_OUTPUT_ROOT;
use tileslice_core::TileFormat;

/// The `defaults` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
	/// Root directory of extracted regions. Defaults to `tiles`.
	pub output_dir: Option<PathBuf>,

	/// Validated only. Extractions default to the zoom range of their source.
	pub min_zoom: Option<u8>,
	pub max_zoom: Option<u8>,

	/// Preferred raster format: `jpg`, `png` or `webp`.
	pub tile_format: Option<String>,

	/// Preferred vector format: `pbf` or `mvt`.
	pub vector_format: Option<String>,
}

impl DefaultsConfig {
	pub fn output_dir(&self) -> PathBuf {
		self.output_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT))
	}

	pub(super) fn validate(&self, report: &mut ConfigReport) {
		check_zoom_pair(self.min_zoom, self.max_zoom, "invalid default zoom levels", report);

		if let Some(format) = &self.tile_format
			&& !TileFormat::try_from_str(format).is_ok_and(|f| !f.is_vector())
		{
			report.error(format!("invalid tile_format '{format}' (valid: jpg, png, webp)"));
		}
		if let Some(format) = &self.vector_format
			&& !TileFormat::try_from_str(format).is_ok_and(|f| f.is_vector())
		{
			report.error(format!("invalid vector_format '{format}' (valid: pbf, mvt)"));
		}
	}
}
