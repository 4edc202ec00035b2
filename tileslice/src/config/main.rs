use super::{ConfigReport, DefaultsConfig, RegionConfig, SourceConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
	collections::BTreeMap,
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
};
use tileslice_container::{RegionCatalog, SourceCatalog};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// MBTiles archives by identifier.
	pub sources: Option<BTreeMap<String, SourceConfig>>,

	/// Named bounding boxes by identifier.
	pub predefined_regions: Option<BTreeMap<String, RegionConfig>>,

	pub defaults: Option<DefaultsConfig>,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses the file at `path` and resolves source paths relative to it.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("failed to open config file {}", path.display()))?;
		let mut config =
			Config::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse {}", path.display()))?;
		log::debug!("loaded config from {}", path.display());

		let base = path.parent().unwrap_or(Path::new(""));
		config.resolve_paths(base);
		Ok(config)
	}

	pub fn resolve_paths(&mut self, base: &Path) {
		for source in self.sources.iter_mut().flat_map(|s| s.values_mut()) {
			source.resolve_paths(base);
		}
	}

	/// Checks the whole configuration without opening any archive.
	pub fn validate(&self) -> ConfigReport {
		let mut report = ConfigReport::default();

		for (section, present) in [
			("sources", self.sources.is_some()),
			("predefined_regions", self.predefined_regions.is_some()),
			("defaults", self.defaults.is_some()),
		] {
			if !present {
				report.error(format!("missing section '{section}'"));
			}
		}

		let sources = self.sources();
		if sources.is_empty() {
			report.warning("no sources defined");
		}
		for (id, source) in sources {
			source.validate(id, &mut report);
		}

		let regions = self.regions();
		if regions.is_empty() {
			report.warning("no regions defined");
		}
		for (id, region) in regions {
			region.validate(id, &mut report);
		}

		if let Some(defaults) = &self.defaults {
			defaults.validate(&mut report);
		}

		report
	}

	pub fn sources(&self) -> &BTreeMap<String, SourceConfig> {
		static EMPTY: BTreeMap<String, SourceConfig> = BTreeMap::new();
		self.sources.as_ref().unwrap_or(&EMPTY)
	}

	pub fn regions(&self) -> &BTreeMap<String, RegionConfig> {
		static EMPTY: BTreeMap<String, RegionConfig> = BTreeMap::new();
		self.predefined_regions.as_ref().unwrap_or(&EMPTY)
	}

	/// Root directory of extracted regions.
	pub fn output_dir(&self) -> PathBuf {
		self.defaults.clone().unwrap_or_default().output_dir()
	}

	/// Builds the catalog of all configured sources.
	pub fn source_catalog(&self) -> Result<SourceCatalog> {
		self.sources()
			.iter()
			.map(|(id, source)| source.to_source(id))
			.collect::<Result<SourceCatalog>>()
	}

	/// Builds the catalog of all predefined regions.
	pub fn region_catalog(&self) -> Result<RegionCatalog> {
		self.regions()
			.iter()
			.map(|(id, region)| region.to_region(id))
			.collect::<Result<RegionCatalog>>()
	}
}
