//! Turns what a user asked for into a request the exporter can run.
//!
//! Validation is pure: nothing here touches the archive or the output tree.
//! Zoom levels are checked first, then the geographic overlap.

use crate::{ExtractError, RegionCatalog, Source, SourceCatalog};
use std::{fmt, sync::Arc};
use tileslice_core::{GeoBBox, ZoomRange};

/// Region name used for ad-hoc bounding boxes.
pub const DEFAULT_REGION_NAME: &str = "custom";

/// The area to extract: either an explicit box or a predefined region.
#[derive(Clone, Debug, PartialEq)]
pub enum Area {
	BBox(GeoBBox),
	Region(String),
}

/// Everything the command surface hands to the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionQuery {
	pub source: String,
	pub area: Area,
	pub min_zoom: Option<u8>,
	pub max_zoom: Option<u8>,
	/// Directory name below the output root. Defaults to the region id, or
	/// [`DEFAULT_REGION_NAME`] for an explicit box.
	pub region_name: Option<String>,
}

impl ExtractionQuery {
	pub fn new(source: &str, area: Area) -> ExtractionQuery {
		ExtractionQuery {
			source: source.to_string(),
			area,
			min_zoom: None,
			max_zoom: None,
			region_name: None,
		}
	}

	pub fn with_zoom(mut self, min_zoom: Option<u8>, max_zoom: Option<u8>) -> ExtractionQuery {
		self.min_zoom = min_zoom;
		self.max_zoom = max_zoom;
		self
	}

	pub fn with_region_name(mut self, region_name: &str) -> ExtractionQuery {
		self.region_name = Some(region_name.to_string());
		self
	}

	/// Looks up source and region, then validates the resulting box and zoom
	/// range against the source.
	///
	/// # Errors
	/// [`ExtractError::UnknownSource`], [`ExtractError::UnknownRegion`], or any
	/// error of [`validate_request`].
	pub fn resolve(&self, sources: &SourceCatalog, regions: &RegionCatalog) -> Result<ExtractionRequest, ExtractError> {
		let source = sources.lookup(&self.source)?;
		let (bbox, default_name) = match &self.area {
			Area::BBox(bbox) => (*bbox, DEFAULT_REGION_NAME.to_string()),
			Area::Region(id) => {
				let region = regions.lookup(id)?;
				(region.bbox, region.id.clone())
			}
		};
		let region_name = self.region_name.clone().unwrap_or(default_name);
		validate_request(&bbox, self.min_zoom, self.max_zoom, source, region_name)
	}
}

/// How the requested box relates to the source's coverage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlap {
	/// The request lies completely inside the coverage.
	Full,
	/// Only part of the request is covered; it was clipped to `clipped`.
	Partial { requested: GeoBBox, clipped: GeoBBox },
}

/// A validated request. Its box lies within the source's coverage and its
/// zoom range within the source's zoom range.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionRequest {
	pub bbox: GeoBBox,
	pub zoom: ZoomRange,
	pub source: Arc<Source>,
	pub region_name: String,
	pub overlap: Overlap,
}

impl ExtractionRequest {
	/// Human readable warnings that should accompany the result.
	pub fn warnings(&self) -> Vec<String> {
		match &self.overlap {
			Overlap::Full => vec![],
			Overlap::Partial { requested, clipped } => vec![format!(
				"requested area {requested:?} is only partly covered by source '{}', clipped to {clipped:?}",
				self.source.id
			)],
		}
	}
}

impl fmt::Display for ExtractionRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} from '{}' at zoom {} into '{}'",
			self.bbox.as_string_list(),
			self.source.id,
			self.zoom,
			self.region_name
		)
	}
}

/// Checks a box and optional zoom bounds against `source`.
///
/// Omitted zoom bounds default to the source's own extremes. A zoom range
/// that is only partly inside the source's range is rejected as a whole.
///
/// # Errors
/// - [`ExtractError::ZoomOutOfRange`] if the resolved range is inverted or
///   leaves the source's range.
/// - [`ExtractError::BoundaryDisjoint`] if the box does not share any area
///   with the source's coverage.
pub fn validate_request(
	bbox: &GeoBBox,
	min_zoom: Option<u8>,
	max_zoom: Option<u8>,
	source: Arc<Source>,
	region_name: String,
) -> Result<ExtractionRequest, ExtractError> {
	let allowed = source.zoom;
	let requested_min = min_zoom.unwrap_or(allowed.min);
	let requested_max = max_zoom.unwrap_or(allowed.max);

	let zoom = ZoomRange::new(requested_min, requested_max)
		.ok()
		.filter(|zoom| allowed.contains_range(zoom))
		.ok_or(ExtractError::ZoomOutOfRange {
			requested_min,
			requested_max,
			allowed,
		})?;

	let coverage = source.bounds;
	let (bbox, overlap) = if coverage.contains(bbox) {
		(*bbox, Overlap::Full)
	} else if let Some(clipped) = coverage.intersection(bbox) {
		log::warn!(
			"requested area {bbox:?} exceeds the coverage of source '{}', clipping to {clipped:?}",
			source.id
		);
		(
			clipped,
			Overlap::Partial {
				requested: *bbox,
				clipped,
			},
		)
	} else {
		return Err(ExtractError::BoundaryDisjoint {
			source_id: source.id.clone(),
			requested: *bbox,
			coverage,
		});
	};

	log::debug!("validated {} at zoom {zoom} for '{}'", bbox.as_string_list(), source.id);

	Ok(ExtractionRequest {
		bbox,
		zoom,
		source,
		region_name,
		overlap,
	})
}
