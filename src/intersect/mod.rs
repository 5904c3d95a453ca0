//! Intersection/crossing index
//!
//! Computes every planar coordinate shared by a subject geometry and a set
//! of candidate geometries, recording per geometry the vertex index at which
//! it reaches the coordinate. Candidates are pre-filtered by bounding box
//! before any exact segment test runs.

use indexmap::IndexMap;

use crate::geometry::{bbox_overlaps_2d, Geometry};
use crate::predicates::{path_segments, reach_vertex, segment_intersection, SegIntersection};
use crate::COORD_EPSILON;

/// Quantized coordinate key, deduplicating float coordinates on the shared
/// epsilon grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordKey(i64, i64);

impl CoordKey {
    fn from_point(p: [f64; 2]) -> Self {
        Self(
            (p[0] / COORD_EPSILON).round() as i64,
            (p[1] / COORD_EPSILON).round() as i64,
        )
    }
}

/// One shared coordinate and the vertex index each participant reaches it at
#[derive(Debug, Clone)]
pub struct IntersectionSite {
    pub coordinate: [f64; 2],
    /// Geometry id to vertex index, in discovery order
    pub vertex_indices: IndexMap<u64, usize>,
}

/// All intersection sites of one subject against its candidate set
#[derive(Debug, Default)]
pub struct IntersectionIndex {
    sites: Vec<IntersectionSite>,
    by_coord: std::collections::HashMap<CoordKey, usize>,
}

impl IntersectionIndex {
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Sites in discovery order
    pub fn sites(&self) -> &[IntersectionSite] {
        &self.sites
    }

    fn record(&mut self, point: [f64; 2], geometry_id: u64, vertex_index: usize) {
        let key = CoordKey::from_point(point);
        let slot = *self.by_coord.entry(key).or_insert_with(|| {
            self.sites.push(IntersectionSite {
                coordinate: point,
                vertex_indices: IndexMap::new(),
            });
            self.sites.len() - 1
        });
        // First association wins; a geometry reaches a coordinate once
        self.sites[slot]
            .vertex_indices
            .entry(geometry_id)
            .or_insert(vertex_index);
    }
}

/// Compute every coordinate the subject shares with any candidate
///
/// Candidates whose bounding box does not overlap the subject's are skipped
/// without any segment test. Collinear overlaps contribute both ends of the
/// shared extent.
pub fn compute_intersections(subject: &Geometry, candidates: &[&Geometry]) -> IntersectionIndex {
    let mut index = IntersectionIndex::default();
    let subject_segments = path_segments(subject);
    let subject_count = subject.vertices.len();

    for candidate in candidates {
        if candidate.id == subject.id || !bbox_overlaps_2d(subject, candidate) {
            continue;
        }
        let candidate_count = candidate.vertices.len();
        let candidate_segments = path_segments(candidate);

        for (i, s_start, s_end) in &subject_segments {
            for &(j, c_start, c_end) in &candidate_segments {
                let record_point = |p: [f64; 2], index: &mut IntersectionIndex| {
                    index.record(
                        p,
                        subject.id,
                        reach_vertex(*i, subject_count, *s_start, p),
                    );
                    index.record(
                        p,
                        candidate.id,
                        reach_vertex(j, candidate_count, c_start, p),
                    );
                };
                match segment_intersection(*s_start, *s_end, c_start, c_end) {
                    SegIntersection::None => {}
                    SegIntersection::Touch(p) | SegIntersection::Cross(p) => {
                        record_point(p, &mut index);
                    }
                    SegIntersection::Overlap(p, q) => {
                        record_point(p, &mut index);
                        record_point(q, &mut index);
                    }
                }
            }
        }
    }

    index
}
