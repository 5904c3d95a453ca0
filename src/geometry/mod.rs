//! Drawing geometry data model and classification
//!
//! # Submodules
//! - `types` - vertices, bounding boxes, codes, and the geometry itself
//! - `classify` - kind tests and the area predicate
//! - `spatial` - R-tree entries and the bounding-box overlap test

mod classify;
mod spatial;
mod types;

pub use classify::{is_area, is_open_path, is_point_like};
pub use spatial::{bbox_overlaps_2d, IndexedGeometry};
pub use types::{AttributeValue, BoundingBox, Code, Geometry, GeometryKind, Vertex};
