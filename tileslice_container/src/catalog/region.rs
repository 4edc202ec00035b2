use crate::ExtractError;
use std::{collections::BTreeMap, sync::Arc};
use tileslice_core::{GeoBBox, GeoPoint};

/// A named bounding box, e.g. a city or a country.
///
/// Regions are shorthands only: they resolve to their box before validation.
/// `default_zoom` and `max_zoom` are informational and never constrain a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
	pub id: String,
	pub name: String,
	pub bbox: GeoBBox,
	pub center: Option<GeoPoint>,
	pub default_zoom: Option<u8>,
	pub max_zoom: Option<u8>,
}

impl Region {
	pub fn new(id: &str, name: &str, bbox: GeoBBox) -> Region {
		Region {
			id: id.to_string(),
			name: name.to_string(),
			bbox,
			center: None,
			default_zoom: None,
			max_zoom: None,
		}
	}

	pub fn with_center(mut self, center: GeoPoint) -> Region {
		self.center = Some(center);
		self
	}

	pub fn with_zoom_hints(mut self, default_zoom: Option<u8>, max_zoom: Option<u8>) -> Region {
		self.default_zoom = default_zoom;
		self.max_zoom = max_zoom;
		self
	}
}

/// Predefined regions, ordered by identifier.
#[derive(Clone, Debug, Default)]
pub struct RegionCatalog {
	regions: BTreeMap<String, Arc<Region>>,
}

impl RegionCatalog {
	/// # Errors
	/// Returns [`ExtractError::UnknownRegion`] listing every known identifier.
	pub fn lookup(&self, id: &str) -> Result<Arc<Region>, ExtractError> {
		self.regions.get(id).cloned().ok_or_else(|| ExtractError::UnknownRegion {
			id: id.to_string(),
			known: self.regions.keys().cloned().collect(),
		})
	}

	pub fn list_all(&self) -> impl Iterator<Item = &Arc<Region>> {
		self.regions.values()
	}

	pub fn len(&self) -> usize {
		self.regions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}
}

impl FromIterator<Region> for RegionCatalog {
	fn from_iter<T: IntoIterator<Item = Region>>(iter: T) -> Self {
		RegionCatalog {
			regions: iter.into_iter().map(|r| (r.id.clone(), Arc::new(r))).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_and_listing() {
		let catalog = RegionCatalog::from_iter([
			Region::new("istanbul", "İstanbul", GeoBBox::new(28.5, 40.8, 29.5, 41.3).unwrap()),
			Region::new("ankara", "Ankara", GeoBBox::new(32.5, 39.7, 33.2, 40.1).unwrap())
				.with_center(GeoPoint::new(32.85, 39.93).unwrap())
				.with_zoom_hints(Some(10), Some(15)),
		]);

		let ankara = catalog.lookup("ankara").unwrap();
		assert_eq!(ankara.default_zoom, Some(10));
		assert_eq!(ankara.center.unwrap().as_array(), [32.85, 39.93]);

		let ids: Vec<&str> = catalog.list_all().map(|r| r.id.as_str()).collect();
		assert_eq!(ids, vec!["ankara", "istanbul"]);

		match catalog.lookup("izmir").unwrap_err() {
			ExtractError::UnknownRegion { id, known } => {
				assert_eq!(id, "izmir");
				assert_eq!(known, vec!["ankara", "istanbul"]);
			}
			other => panic!("unexpected error {other:?}"),
		}
	}
}
