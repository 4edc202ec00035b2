use super::{
	ConfigReport,
	source::{check_bbox, check_zoom_pair},
};
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tileslice_container::Region;
use tileslice_core::{GeoBBox, GeoPoint};

/// One entry of the `predefined_regions` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RegionConfig {
	pub name: Option<String>,

	/// `[west, south, east, north]`
	pub bbox: Option<Vec<f64>>,

	/// `[lon, lat]`
	pub center: Option<Vec<f64>>,

	/// Suggested zoom level. Informational only.
	pub default_zoom: Option<u8>,

	/// Suggested maximum zoom level. Informational only.
	pub max_zoom: Option<u8>,
}

impl RegionConfig {
	pub(super) fn validate(&self, id: &str, report: &mut ConfigReport) {
		if self.name.is_none() {
			report.error(format!("region '{id}' is missing field 'name'"));
		}
		match &self.bbox {
			None => report.error(format!("region '{id}' is missing field 'bbox'")),
			Some(bbox) => check_bbox(GeoBBox::try_from(bbox.clone()), &format!("region '{id}'"), "bbox", report),
		}
		match &self.center {
			None => report.warning(format!("region '{id}' has no center")),
			Some(center) => {
				if let Err(error) = GeoPoint::try_from(center.clone()) {
					report.error(format!("region '{id}' has invalid center: {error}"));
				}
			}
		}
		check_zoom_pair(
			self.default_zoom,
			self.max_zoom,
			&format!("region '{id}' has invalid zoom levels"),
			report,
		);
	}

	/// Converts the entry into an engine [`Region`].
	pub fn to_region(&self, id: &str) -> Result<Region> {
		let name = self.name.as_deref().ok_or_else(|| anyhow!("region '{id}' has no name"))?;
		let bbox = self.bbox.clone().ok_or_else(|| anyhow!("region '{id}' has no bbox"))?;
		let bbox = GeoBBox::try_from(bbox).with_context(|| format!("bbox of region '{id}'"))?;

		let mut region = Region::new(id, name, bbox).with_zoom_hints(self.default_zoom, self.max_zoom);
		if let Some(center) = &self.center {
			region = region.with_center(
				GeoPoint::try_from(center.clone()).with_context(|| format!("center of region '{id}'"))?,
			);
		}
		Ok(region)
	}
}
