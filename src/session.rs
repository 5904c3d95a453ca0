//! Drawing session collaborators
//!
//! The engine never talks to the host's live drawing; it reads an immutable
//! `DrawingSnapshot` built once per validation pass. Distance/area
//! calculation and terrain elevation stay behind traits so hosts with
//! geographic coordinate systems or an MDT can plug their own.

use std::collections::HashMap;

use rstar::{RTree, AABB};

use crate::geometry::{BoundingBox, Geometry, GeometryKind, IndexedGeometry, Vertex};

/// Planar or geographic distance-and-area oracle supplied by the host
pub trait DistanceCalculator: Sync {
    fn distance(&self, a: &Vertex, b: &Vertex) -> f64;

    /// Unsigned area of one closed ring
    fn ring_area(&self, ring: &[Vertex]) -> f64;
}

/// Euclidean implementation for projected coordinate systems
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarCalculator;

impl DistanceCalculator for PlanarCalculator {
    fn distance(&self, a: &Vertex, b: &Vertex) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    fn ring_area(&self, ring: &[Vertex]) -> f64 {
        // Shoelace over the ring, wrapping back to the first vertex
        let n = ring.len();
        if n < 3 {
            return 0.0;
        }
        let mut doubled = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            doubled += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
        }
        doubled.abs() / 2.0
    }
}

/// Terrain elevation oracle (MDT); projection internals are the host's
pub trait ElevationModel: Sync {
    /// Terrain Z under a planar coordinate, when the model covers it
    fn project(&self, x: f64, y: f64) -> Option<f64>;
}

/// Enclosed area of a geometry: polygon outer ring minus holes, or the ring
/// a line's vertex sequence traces
pub fn geometry_area(g: &Geometry, calculator: &dyn DistanceCalculator) -> f64 {
    match g.kind {
        GeometryKind::Polygon => {
            let mut area = calculator.ring_area(&g.vertices);
            for hole in &g.holes {
                area -= calculator.ring_area(hole);
            }
            area.max(0.0)
        }
        _ => calculator.ring_area(&g.vertices),
    }
}

/// Immutable view of a drawing for one validation pass
///
/// Holds the non-deleted geometries and an R-tree over their planar bounds.
/// Safe to share across worker threads; nothing here is ever mutated.
pub struct DrawingSnapshot {
    geometries: Vec<Geometry>,
    by_id: HashMap<u64, usize>,
    index: RTree<IndexedGeometry>,
    equidistance: f64,
}

impl DrawingSnapshot {
    /// Build a snapshot; deleted geometries are dropped here, once, instead
    /// of being re-filtered by every rule
    pub fn new(geometries: Vec<Geometry>, equidistance: f64) -> Self {
        let geometries: Vec<Geometry> =
            geometries.into_iter().filter(|g| !g.deleted).collect();
        let by_id = geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id, i))
            .collect();
        let index = RTree::bulk_load(
            geometries
                .iter()
                .map(|g| IndexedGeometry::new(g.id, &g.bounds))
                .collect(),
        );
        Self {
            geometries,
            by_id,
            index,
            equidistance,
        }
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
        self.geometries.iter()
    }

    pub fn get(&self, id: u64) -> Option<&Geometry> {
        self.by_id.get(&id).map(|&i| &self.geometries[i])
    }

    /// Contour equidistance of the session, for contour-classification rules
    pub fn equidistance(&self) -> f64 {
        self.equidistance
    }

    /// Geometries whose planar bounds overlap the given box, via the R-tree
    pub fn candidates_near(&self, bounds: &BoundingBox) -> Vec<&Geometry> {
        let envelope = AABB::from_corners(
            [bounds.min[0], bounds.min[1]],
            [bounds.max[0], bounds.max[1]],
        );
        self.index
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|entry| self.get(entry.id))
            .collect()
    }
}
