//! tileslice configuration.
//!
//! A single YAML file (`config.yaml` by default) describes:
//! - [`SourceConfig`]: MBTiles archives that tiles can be extracted from,
//! - [`RegionConfig`]: named bounding boxes,
//! - [`DefaultsConfig`]: output directory and default formats.
//!
//! [`Config::validate`] checks the file without touching the archives and
//! returns a [`ConfigReport`]. [`Config::source_catalog`] and
//! [`Config::region_catalog`] turn it into the catalogs the exporter works on.

mod defaults;
mod main;
mod region;
mod report;
mod source;

pub use defaults::DefaultsConfig;
pub use main::{Config, DEFAULT_CONFIG_PATH};
pub use region::RegionConfig;
pub use report::ConfigReport;
pub use source::SourceConfig;

/// Zoom levels a configuration may declare.
pub const MAX_CONFIG_ZOOM: u8 = 22;
