//! Z-coordinate tolerance evaluation
//!
//! Two families of checks: elevation differences where a subject line meets
//! other geometries planarly, and monotonic/constant Z sequences along a
//! single geometry's vertex order. Both honor the interactive early-exit.

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::intersect::{compute_intersections, IntersectionIndex};
use crate::{EvalMode, COORD_EPSILON};

/// Comparison applied to `|z_a - z_b|` against a tolerance value
///
/// Each rule names its comparator literally; no comparator is ever derived
/// from a rule's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZComparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl ZComparison {
    /// True when `lhs <cmp> rhs` holds; equality comparisons use the shared
    /// coordinate tolerance
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            ZComparison::Less => lhs < rhs,
            ZComparison::LessOrEqual => lhs <= rhs,
            ZComparison::Greater => lhs > rhs,
            ZComparison::GreaterOrEqual => lhs >= rhs,
            ZComparison::Equal => (lhs - rhs).abs() <= COORD_EPSILON,
            ZComparison::NotEqual => (lhs - rhs).abs() > COORD_EPSILON,
        }
    }
}

/// One elevation-difference hit at a shared coordinate
#[derive(Debug, Clone, Serialize)]
pub struct ZExceedance {
    pub coordinate: [f64; 2],
    pub subject_vertex: usize,
    pub subject_z: f64,
    pub other_id: u64,
    pub other_vertex: usize,
    pub other_z: f64,
}

/// Evaluate `|z_subject - z_other|` at every coordinate the subject shares
/// with a candidate; a comparison that holds is a violation
///
/// Z values come from the vertex each geometry reaches the coordinate at,
/// never from interpolation. In interactive mode at most one exceedance is
/// returned.
pub fn check_z_at_crossings(
    subject: &Geometry,
    candidates: &[&Geometry],
    cmp: ZComparison,
    tolerance: f64,
    mode: EvalMode,
) -> Vec<ZExceedance> {
    let index = compute_intersections(subject, candidates);
    check_z_over_index(subject, candidates, &index, cmp, tolerance, mode)
}

/// Same as `check_z_at_crossings` over a precomputed intersection index
pub fn check_z_over_index(
    subject: &Geometry,
    candidates: &[&Geometry],
    index: &IntersectionIndex,
    cmp: ZComparison,
    tolerance: f64,
    mode: EvalMode,
) -> Vec<ZExceedance> {
    let mut exceedances = Vec::new();

    for site in index.sites() {
        let Some(&subject_vertex) = site.vertex_indices.get(&subject.id) else {
            continue;
        };
        let subject_z = subject.vertices[subject_vertex].z;

        for (&other_id, &other_vertex) in &site.vertex_indices {
            if other_id == subject.id {
                continue;
            }
            let Some(other) = candidates.iter().find(|g| g.id == other_id) else {
                continue;
            };
            let other_z = other.vertices[other_vertex].z;

            if cmp.holds((subject_z - other_z).abs(), tolerance) {
                exceedances.push(ZExceedance {
                    coordinate: site.coordinate,
                    subject_vertex,
                    subject_z,
                    other_id,
                    other_vertex,
                    other_z,
                });
                if mode.stop_at_first() {
                    return exceedances;
                }
            }
        }
    }

    exceedances
}

/// Property a geometry's Z sequence is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZSequence {
    StrictlyIncreasing,
    StrictlyDecreasing,
    NonDecreasing,
    NonIncreasing,
    AllEqual,
}

/// Vertex indices violating the sequence property, in vertex order
///
/// Monotonic properties compare each vertex against its predecessor;
/// `AllEqual` compares every vertex against the FIRST vertex's Z, so the
/// reported index is the vertex that actually deviates. Interactive mode
/// returns at most the first offender.
pub fn check_z_sequence(g: &Geometry, sequence: ZSequence, mode: EvalMode) -> Vec<usize> {
    let mut offenders = Vec::new();
    let zs: Vec<f64> = g.vertices.iter().map(|v| v.z).collect();

    for i in 1..zs.len() {
        let violated = match sequence {
            ZSequence::StrictlyIncreasing => zs[i] <= zs[i - 1],
            ZSequence::StrictlyDecreasing => zs[i] >= zs[i - 1],
            ZSequence::NonDecreasing => zs[i] < zs[i - 1],
            ZSequence::NonIncreasing => zs[i] > zs[i - 1],
            ZSequence::AllEqual => (zs[i] - zs[0]).abs() > COORD_EPSILON,
        };
        if violated {
            offenders.push(i);
            if mode.stop_at_first() {
                break;
            }
        }
    }

    offenders
}
