//! Core types of tileslice: geographic points and boxes, Web Mercator tile
//! coordinates, tile ranges per zoom level, zoom ranges and tile formats.
//!
//! Everything in this crate is pure: no I/O, no global state.
//!
//! ```
//! use tileslice_core::{GeoBBox, TileBBox};
//!
//! let ankara = GeoBBox::new(32.5, 39.7, 33.2, 40.1).unwrap();
//! let range = TileBBox::from_geo(6, &ankara).unwrap();
//! assert_eq!(format!("{range:?}"), "6: [37,24,37,24] (1x1)");
//! ```

mod error;
pub use error::*;

pub mod types;
pub use types::*;
