use super::{ConfigReport, MAX_CONFIG_ZOOM};
use anyhow::{Context, Result, anyhow, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tileslice_container::{DEFAULT_SOURCE_MAX_ZOOM, Source};
use tileslice_core::{GeoBBox, GeoError, TileFormat, ZoomRange};

/// Only archive type tileslice can read.
pub const SOURCE_TYPE_MBTILES: &str = "mbtiles";

/// One entry of the `sources` section.
///
/// Fields are optional at parse time so that [`Config::validate`](super::Config::validate)
/// can report every missing field instead of stopping at the first one.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
	/// Display name, e.g. "Turkey".
	pub name: Option<String>,

	/// Path of the MBTiles file. Relative paths are resolved against the
	/// directory of the configuration file.
	pub path: Option<PathBuf>,

	/// Archive type, must be `mbtiles`.
	#[serde(rename = "type")]
	pub kind: Option<String>,

	/// Tile format: `pbf`, `png`, `jpg` or `webp`. Defaults to `jpg`.
	pub format: Option<String>,

	/// Extension of written tiles, overriding the one of the format.
	pub extension: Option<String>,

	/// `[west, south, east, north]` covered by the archive.
	pub bounds: Option<Vec<f64>>,

	pub min_zoom: Option<u8>,
	pub max_zoom: Option<u8>,
	pub description: Option<String>,
}

impl SourceConfig {
	pub fn resolve_paths(&mut self, base: &Path) {
		if let Some(path) = &self.path
			&& path.is_relative()
		{
			self.path = Some(base.join(path));
		}
	}

	pub(super) fn validate(&self, id: &str, report: &mut ConfigReport) {
		if self.path.is_none() {
			report.error(format!("source '{id}' is missing field 'path'"));
		}
		if self.name.is_none() {
			report.error(format!("source '{id}' is missing field 'name'"));
		}
		match &self.kind {
			None => report.error(format!("source '{id}' is missing field 'type'")),
			Some(kind) if kind != SOURCE_TYPE_MBTILES => report.error(format!(
				"source '{id}' has invalid type '{kind}' (valid: {SOURCE_TYPE_MBTILES})"
			)),
			Some(_) => {}
		}
		if let Some(format) = &self.format
			&& TileFormat::try_from_str(format).is_err()
		{
			report.error(format!("source '{id}' has invalid format '{format}'"));
		}
		if let Some(bounds) = &self.bounds {
			check_bbox(parse_bounds(bounds), &format!("source '{id}'"), "bounds", report);
		}
		check_zoom_pair(
			self.min_zoom,
			self.max_zoom,
			&format!("source '{id}' has invalid zoom levels"),
			report,
		);
		if let Some(path) = &self.path
			&& !path.exists()
		{
			report.warning(format!("source file of '{id}' not found: {}", path.display()));
		}
	}

	/// Converts the entry into an engine [`Source`].
	pub fn to_source(&self, id: &str) -> Result<Source> {
		let name = self.name.as_deref().ok_or_else(|| anyhow!("source '{id}' has no name"))?;
		let path = self.path.clone().ok_or_else(|| anyhow!("source '{id}' has no path"))?;
		if let Some(kind) = &self.kind {
			ensure!(kind == SOURCE_TYPE_MBTILES, "source '{id}' has unsupported type '{kind}'");
		}
		let format = match &self.format {
			Some(format) => TileFormat::try_from_str(format).with_context(|| format!("source '{id}'"))?,
			None => TileFormat::Jpg,
		};

		let mut source = Source::new(id, name, path, format);
		if let Some(bounds) = &self.bounds {
			source = source.with_bounds(parse_bounds(bounds).with_context(|| format!("bounds of source '{id}'"))?);
		}
		if self.min_zoom.is_some() || self.max_zoom.is_some() {
			let zoom = ZoomRange::new(
				self.min_zoom.unwrap_or(0),
				self.max_zoom.unwrap_or(DEFAULT_SOURCE_MAX_ZOOM),
			)
			.with_context(|| format!("zoom levels of source '{id}'"))?;
			source = source.with_zoom(zoom);
		}
		if let Some(extension) = &self.extension {
			source = source.with_extension(extension);
		}
		if let Some(description) = &self.description {
			source = source.with_description(description);
		}
		Ok(source)
	}
}

/// Coverage of a source from `[west, south, east, north]`. Latitudes beyond
/// the Web Mercator span are cut to it.
pub(super) fn parse_bounds(values: &[f64]) -> Result<GeoBBox, GeoError> {
	match *values {
		[west, south, east, north] => GeoBBox::new_limited_to_mercator(west, south, east, north),
		_ => Err(GeoError::WrongLength {
			expected: 4,
			actual: values.len(),
		}),
	}
}

/// Reports a box that the catalogs would refuse to build.
pub(super) fn check_bbox(bbox: Result<GeoBBox, GeoError>, owner: &str, field: &str, report: &mut ConfigReport) {
	if let Err(error) = bbox {
		report.error(format!("{owner} has invalid {field}: {error}"));
	}
}

/// Reports zoom levels above the supported maximum or in the wrong order.
pub(super) fn check_zoom_pair(min: Option<u8>, max: Option<u8>, message: &str, report: &mut ConfigReport) {
	let too_high = [min, max].into_iter().flatten().any(|z| z > MAX_CONFIG_ZOOM);
	let inverted = matches!((min, max), (Some(min), Some(max)) if min > max);
	if too_high || inverted {
		report.error(format!("{message}: must satisfy 0 <= min <= max <= {MAX_CONFIG_ZOOM}"));
	}
}
