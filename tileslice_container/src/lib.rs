//! tileslice container: read MBTiles archives and extract tile regions from them.
//!
//! The crate is organised around the extraction pipeline:
//! - [`SourceCatalog`] and [`RegionCatalog`] describe what can be extracted,
//! - [`ExtractionQuery::resolve`] validates a request against a source,
//! - [`MBTilesArchive`] fetches raw tile blobs,
//! - [`TileExporter`] drives the run and writes `<root>/<region>/<z>/<x>/<y>.<ext>`.
//!
//! # Quick start
//! ```rust,no_run
//! use std::{path::PathBuf, sync::Arc};
//! use tileslice_container::*;
//! use tileslice_core::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let source = Source::new("turkey", "Turkey", PathBuf::from("turkey.mbtiles"), TileFormat::Jpg)
//!         .with_bounds(GeoBBox::new(25.31, 35.46, 45.0, 42.55)?)
//!         .with_zoom(ZoomRange::new(5, 13)?);
//!     let sources = SourceCatalog::from_iter([source]);
//!
//!     let exporter = TileExporter::new(Arc::new(sources), Arc::new(RegionCatalog::default()), ExportOptions::default());
//!     let query = ExtractionQuery::new("turkey", Area::BBox(GeoBBox::new(32.5, 39.7, 33.2, 40.1)?)).with_zoom(Some(6), Some(8));
//!     let result = exporter.run(&query).await?;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```
//!
//! # Features
//! - `test`: fixture writers for integration tests in downstream crates.

mod catalog;
pub use catalog::*;

mod error;
pub use error::*;

mod events;
pub use events::*;

pub mod export;
pub use export::*;

mod mbtiles;
pub use mbtiles::*;

mod validate;
pub use validate::*;

#[cfg(any(test, feature = "test"))]
pub mod testing;
