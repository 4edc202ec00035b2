use crate::ExtractError;
use std::{
	collections::BTreeMap,
	fmt,
	path::{Path, PathBuf},
	sync::Arc,
};
use tileslice_core::{GeoBBox, TileFormat, ZoomRange};

/// Highest zoom level a source declares when its configuration names none.
pub const DEFAULT_SOURCE_MAX_ZOOM: u8 = 22;

/// One MBTiles archive that tiles can be extracted from.
///
/// Sources are built once from configuration and shared read-only as
/// `Arc<Source>` for the whole run.
#[derive(Clone, PartialEq)]
pub struct Source {
	pub id: String,
	pub name: String,
	pub path: PathBuf,
	/// Declared geographic coverage.
	pub bounds: GeoBBox,
	pub zoom: ZoomRange,
	pub format: TileFormat,
	/// Replaces the format's default file extension when writing tiles.
	pub extension: Option<String>,
	pub description: Option<String>,
}

impl Source {
	/// Creates a source covering the whole world at zoom levels `0..=22`.
	pub fn new(id: &str, name: &str, path: PathBuf, format: TileFormat) -> Source {
		Source {
			id: id.to_string(),
			name: name.to_string(),
			path,
			bounds: GeoBBox::world(),
			zoom: ZoomRange {
				min: 0,
				max: DEFAULT_SOURCE_MAX_ZOOM,
			},
			format,
			extension: None,
			description: None,
		}
	}

	pub fn with_bounds(mut self, bounds: GeoBBox) -> Source {
		self.bounds = bounds;
		self
	}

	pub fn with_zoom(mut self, zoom: ZoomRange) -> Source {
		self.zoom = zoom;
		self
	}

	pub fn with_extension(mut self, extension: &str) -> Source {
		self.extension = Some(extension.trim_start_matches('.').to_string());
		self
	}

	pub fn with_description(mut self, description: &str) -> Source {
		self.description = Some(description.to_string());
		self
	}

	/// File extension of written tiles, without a leading dot.
	pub fn extension(&self) -> &str {
		self.extension.as_deref().unwrap_or(self.format.extension())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl fmt::Debug for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Source")
			.field("id", &self.id)
			.field("path", &self.path)
			.field("bounds", &self.bounds)
			.field("zoom", &self.zoom)
			.field("format", &self.format)
			.finish()
	}
}

/// All sources known to a run, ordered by identifier.
#[derive(Clone, Debug, Default)]
pub struct SourceCatalog {
	sources: BTreeMap<String, Arc<Source>>,
}

impl SourceCatalog {
	/// Finds a source by identifier.
	///
	/// # Errors
	/// Returns [`ExtractError::UnknownSource`] listing every known identifier.
	pub fn lookup(&self, id: &str) -> Result<Arc<Source>, ExtractError> {
		self.sources.get(id).cloned().ok_or_else(|| ExtractError::UnknownSource {
			id: id.to_string(),
			known: self.ids(),
		})
	}

	pub fn list_all(&self) -> impl Iterator<Item = &Arc<Source>> {
		self.sources.values()
	}

	pub fn ids(&self) -> Vec<String> {
		self.sources.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}
}

impl FromIterator<Source> for SourceCatalog {
	/// Later sources replace earlier ones with the same identifier.
	fn from_iter<T: IntoIterator<Item = Source>>(iter: T) -> Self {
		SourceCatalog {
			sources: iter.into_iter().map(|s| (s.id.clone(), Arc::new(s))).collect(),
		}
	}
}
