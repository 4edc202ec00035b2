//! Contains coordinates, bounding boxes, zoom ranges and tile formats.

mod geo_bbox;
pub use geo_bbox::*;

mod geo_point;
pub use geo_point::*;

mod tile_bbox;
pub use tile_bbox::*;

mod tile_coord;
pub use tile_coord::*;

mod tile_format;
pub use tile_format::*;

mod zoom_range;
pub use zoom_range::*;
