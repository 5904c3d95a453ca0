//! Geometric relation and tolerance-evaluation engine for drawing quality
//! control
//!
//! A host CAD/GIS application invokes rule functions while a drawing is
//! digitized or batch-validated. This crate is the engine beneath those
//! rules: spatial predicates between drawing geometries, an
//! intersection/crossing index with bounding-box pre-filtering, Z-tolerance
//! evaluation, code/tag matching, and the rule calling convention. The host
//! keeps ownership of the drawing; the engine reads immutable snapshots and
//! returns ephemeral results.
//!
//! # Modules
//! - `geometry` - vertices, codes, geometries, classification, spatial index
//! - `codes` - wildcard code matching and `#tag` resolution
//! - `predicates` - pairwise spatial relations per kind pair
//! - `intersect` - shared-coordinate index over a candidate set
//! - `zcheck` - elevation tolerance and Z-sequence evaluation
//! - `rules` - violations, combinators, rule catalogue, runners
//! - `session` - drawing snapshot and host-supplied oracles

pub mod codes;
pub mod geometry;
pub mod intersect;
pub mod predicates;
pub mod rules;
pub mod session;
pub mod zcheck;

/// Shared tolerance for coordinate equality
///
/// Every predicate compares coordinates through this one constant; no
/// relation carries a private epsilon.
pub const COORD_EPSILON: f64 = 1e-6;

/// How a validation pass collects violations
///
/// Interactive mode serves the digitizing flow: the host wants the first
/// problem, immediately. Batch mode accumulates everything. This is purely
/// a collection policy; it never changes what counts as a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    Interactive,
    Batch,
}

impl EvalMode {
    pub fn stop_at_first(self) -> bool {
        matches!(self, EvalMode::Interactive)
    }
}

pub use codes::{has_code, has_code_or_tag, wildcard_match, CodeTable, CodeTableEntry};
pub use geometry::{
    bbox_overlaps_2d, is_area, AttributeValue, BoundingBox, Code, Geometry, GeometryKind, Vertex,
};
pub use intersect::{compute_intersections, IntersectionIndex, IntersectionSite};
pub use predicates::{disjoint, locate_point_in_region, same_coordinates, touches, RegionLocation};
pub use rules::{RuleContext, RuleResult, Violation};
pub use session::{
    geometry_area, DistanceCalculator, DrawingSnapshot, ElevationModel, PlanarCalculator,
};
pub use zcheck::{check_z_at_crossings, check_z_sequence, ZComparison, ZSequence};
