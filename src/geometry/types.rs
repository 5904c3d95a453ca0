//! Core geometry types for digitized drawing data
//!
//! This module contains the fundamental vocabulary used throughout the
//! engine: vertices, bounding boxes, feature codes, and the drawing
//! geometry itself.

use anyhow::{ensure, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// A single 3D vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar projection of this vertex
    pub fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Componentwise min/max over every vertex of a geometry, hole rings included
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    fn from_vertex(v: &Vertex) -> Self {
        Self {
            min: [v.x, v.y, v.z],
            max: [v.x, v.y, v.z],
        }
    }

    fn expand(&mut self, v: &Vertex) {
        self.min[0] = self.min[0].min(v.x);
        self.min[1] = self.min[1].min(v.y);
        self.min[2] = self.min[2].min(v.z);
        self.max[0] = self.max[0].max(v.x);
        self.max[1] = self.max[1].max(v.y);
        self.max[2] = self.max[2].max(v.z);
    }

    /// 2D AABB overlap test; symmetric in its arguments
    pub fn overlaps_2d(&self, other: &BoundingBox) -> bool {
        self.min[0] <= other.max[0]
            && self.max[0] >= other.min[0]
            && self.min[1] <= other.max[1]
            && self.max[1] >= other.min[1]
    }
}

/// Value of one code attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttributeValue {
    Null,
    Number(f64),
    Text(String),
}

/// A named feature code attached to a geometry
///
/// Attributes keep their insertion order, matching the order the host
/// presents them in its attribute forms.
#[derive(Debug, Clone, Serialize)]
pub struct Code {
    pub name: String,
    pub attributes: IndexMap<String, AttributeValue>,
}

impl Code {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Attribute lookup; `None` covers both a missing name and an explicit Null
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        match self.attributes.get(name) {
            Some(AttributeValue::Null) | None => None,
            Some(value) => Some(value),
        }
    }
}

/// Geometry variant kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
    Text,
    Complex,
}

/// One geometry of a drawing
///
/// Owned and mutated by the host session; the engine only ever reads it.
/// Invariants enforced at construction: at least one vertex, and a closed
/// outer ring for polygons.
#[derive(Debug, Clone, Serialize)]
pub struct Geometry {
    pub id: u64,
    pub kind: GeometryKind,
    pub vertices: Vec<Vertex>,
    /// Meaningful for `Line` only: the vertex sequence closes on itself in 2D
    pub closed_2d: bool,
    /// Meaningful for `Polygon` only: interior hole rings
    pub holes: Vec<Vec<Vertex>>,
    pub deleted: bool,
    pub codes: Vec<Code>,
    pub bounds: BoundingBox,
}

impl Geometry {
    /// Point geometry at a single coordinate
    pub fn point(id: u64, vertex: Vertex) -> Self {
        Self::build(id, GeometryKind::Point, vec![vertex], false, Vec::new())
            .expect("single-vertex point is always valid")
    }

    /// Text geometry anchored at a single coordinate
    pub fn text(id: u64, anchor: Vertex) -> Self {
        Self::build(id, GeometryKind::Text, vec![anchor], false, Vec::new())
            .expect("single-vertex text is always valid")
    }

    /// Open or closed polyline
    pub fn line(id: u64, vertices: Vec<Vertex>, closed_2d: bool) -> Result<Self> {
        Self::build(id, GeometryKind::Line, vertices, closed_2d, Vec::new())
    }

    /// Polygon with a closed outer ring and zero or more hole rings
    pub fn polygon(id: u64, outer_ring: Vec<Vertex>, holes: Vec<Vec<Vertex>>) -> Result<Self> {
        ensure!(
            outer_ring.len() >= 3,
            "polygon {} outer ring needs at least 3 vertices, got {}",
            id,
            outer_ring.len()
        );
        let first = outer_ring[0];
        let last = outer_ring[outer_ring.len() - 1];
        ensure!(
            (first.x - last.x).abs() <= crate::COORD_EPSILON
                && (first.y - last.y).abs() <= crate::COORD_EPSILON,
            "polygon {} outer ring is not closed",
            id
        );
        Self::build(id, GeometryKind::Polygon, outer_ring, false, holes)
    }

    /// Complex geometry: an ordered vertex sequence treated as a polyline
    pub fn complex(id: u64, vertices: Vec<Vertex>) -> Result<Self> {
        Self::build(id, GeometryKind::Complex, vertices, false, Vec::new())
    }

    fn build(
        id: u64,
        kind: GeometryKind,
        vertices: Vec<Vertex>,
        closed_2d: bool,
        holes: Vec<Vec<Vertex>>,
    ) -> Result<Self> {
        ensure!(
            !vertices.is_empty(),
            "geometry {} has no vertices; a geometry carries at least one",
            id
        );

        let mut bounds = BoundingBox::from_vertex(&vertices[0]);
        for v in &vertices[1..] {
            bounds.expand(v);
        }
        for ring in &holes {
            for v in ring {
                bounds.expand(v);
            }
        }

        Ok(Self {
            id,
            kind,
            vertices,
            closed_2d,
            holes,
            deleted: false,
            codes: Vec::new(),
            bounds,
        })
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.codes.push(code);
        self
    }

    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    pub fn first_vertex(&self) -> &Vertex {
        &self.vertices[0]
    }

    pub fn last_vertex(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 1]
    }
}
