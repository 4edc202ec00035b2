//! Immutable catalogs of extractable sources and predefined regions.

mod region;
mod source;

pub use region::*;
pub use source::*;
