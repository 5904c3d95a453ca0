//! Geometry classification predicates
//!
//! Kind tests used by type-gated rules, and the "is an area" predicate that
//! unifies polygons with closed lines.

use super::types::{Geometry, GeometryKind};

/// True for a polygon, or for a line whose vertex sequence closes in 2D
pub fn is_area(g: &Geometry) -> bool {
    match g.kind {
        GeometryKind::Polygon => true,
        GeometryKind::Line => g.closed_2d,
        GeometryKind::Point | GeometryKind::Text | GeometryKind::Complex => false,
    }
}

/// True when the geometry reduces to a single planar coordinate
pub fn is_point_like(g: &Geometry) -> bool {
    matches!(g.kind, GeometryKind::Point | GeometryKind::Text)
}

/// True for open polylines: lines that do not close, and complex sequences
pub fn is_open_path(g: &Geometry) -> bool {
    match g.kind {
        GeometryKind::Line => !g.closed_2d,
        GeometryKind::Complex => true,
        GeometryKind::Point | GeometryKind::Text | GeometryKind::Polygon => false,
    }
}
