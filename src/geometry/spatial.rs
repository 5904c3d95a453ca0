//! Spatial indexing for drawing geometries
//!
//! R-tree wrapper used by the candidate filter: rules never run exact
//! predicates against the whole drawing, only against geometries whose 2D
//! bounds overlap the subject's.

use rstar::{RTreeObject, AABB};

use super::types::{BoundingBox, Geometry};

/// 2D bounding-box overlap between two geometries; symmetric
pub fn bbox_overlaps_2d(a: &Geometry, b: &Geometry) -> bool {
    a.bounds.overlaps_2d(&b.bounds)
}

/// Entry in the drawing's R-tree: a geometry id plus its planar bounds
#[derive(Clone, Debug)]
pub struct IndexedGeometry {
    pub id: u64,
    pub envelope: AABB<[f64; 2]>,
}

impl IndexedGeometry {
    pub fn new(id: u64, bounds: &BoundingBox) -> Self {
        Self {
            id,
            envelope: AABB::from_corners(
                [bounds.min[0], bounds.min[1]],
                [bounds.max[0], bounds.max[1]],
            ),
        }
    }
}

impl RTreeObject for IndexedGeometry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
