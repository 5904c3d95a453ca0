//! Line-Area and Area-Area relations
//!
//! The area operand is a polygon or a closed line; its boundary is the set
//! of ring segments (outer ring plus holes). Interior tests classify ring
//! containment with the shared ray cast.

use super::{
    locate_point_in_region, path_segments, region_rings, ring_segments, same_xy,
    segment_intersection, RegionLocation, SegIntersection,
};
use crate::geometry::Geometry;

/// Every boundary segment of an area geometry, over all of its rings
fn boundary_segments(area: &Geometry) -> Vec<([f64; 2], [f64; 2])> {
    region_rings(area)
        .iter()
        .flat_map(|ring| ring_segments(ring))
        .collect()
}

/// Relations between an open polyline and an area
pub mod line_area {
    use super::*;

    fn boundary_relation(line: &Geometry, area: &Geometry) -> (bool, bool) {
        let boundary = boundary_segments(area);
        let mut crossing = false;
        let mut contact = false;
        for (_, a, b) in path_segments(line) {
            for (s, e) in &boundary {
                match segment_intersection(a, b, *s, *e) {
                    SegIntersection::None => {}
                    SegIntersection::Cross(_) => {
                        crossing = true;
                        contact = true;
                    }
                    SegIntersection::Touch(_) | SegIntersection::Overlap(_, _) => {
                        contact = true;
                    }
                }
            }
        }
        (crossing, contact)
    }

    fn any_vertex_inside(line: &Geometry, area: &Geometry) -> bool {
        line.vertices
            .iter()
            .any(|v| locate_point_in_region(area, v.xy()) == RegionLocation::Inside)
    }

    /// The line crosses the area boundary
    pub fn across(line: &Geometry, area: &Geometry) -> bool {
        boundary_relation(line, area).0
    }

    /// The line touches the boundary without crossing in and without any
    /// vertex in the interior
    pub fn adjacent(line: &Geometry, area: &Geometry) -> bool {
        let (crossing, contact) = boundary_relation(line, area);
        contact && !crossing && !any_vertex_inside(line, area)
    }

    /// Every vertex inside or on the boundary, and no boundary crossing
    pub fn within(line: &Geometry, area: &Geometry) -> bool {
        let (crossing, _) = boundary_relation(line, area);
        !crossing
            && line
                .vertices
                .iter()
                .all(|v| locate_point_in_region(area, v.xy()) != RegionLocation::Outside)
    }

    /// The line shares at least one coordinate with the boundary
    pub fn join(line: &Geometry, area: &Geometry) -> bool {
        boundary_relation(line, area).1
    }

    /// A terminal vertex lies strictly inside the area
    pub fn terminates_within(line: &Geometry, area: &Geometry) -> bool {
        locate_point_in_region(area, line.first_vertex().xy()) == RegionLocation::Inside
            || locate_point_in_region(area, line.last_vertex().xy()) == RegionLocation::Inside
    }

    /// A terminal vertex lies exactly on the boundary
    pub fn endpoint_join(line: &Geometry, area: &Geometry) -> bool {
        locate_point_in_region(area, line.first_vertex().xy()) == RegionLocation::Boundary
            || locate_point_in_region(area, line.last_vertex().xy()) == RegionLocation::Boundary
    }

    /// No boundary contact and no vertex inside; the negation of the touch
    /// union
    pub fn disjoint(line: &Geometry, area: &Geometry) -> bool {
        !boundary_relation(line, area).1 && !any_vertex_inside(line, area)
    }
}

/// Relations between two areas
pub mod area_area {
    use super::*;

    fn boundary_relation(a: &Geometry, b: &Geometry) -> (Vec<[f64; 2]>, bool) {
        let b_boundary = boundary_segments(b);
        let mut crossings = Vec::new();
        let mut contact = false;
        for (s1, e1) in boundary_segments(a) {
            for (s2, e2) in &b_boundary {
                match segment_intersection(s1, e1, *s2, *e2) {
                    SegIntersection::None => {}
                    SegIntersection::Cross(p) => {
                        crossings.push(p);
                        contact = true;
                    }
                    SegIntersection::Touch(_) | SegIntersection::Overlap(_, _) => {
                        contact = true;
                    }
                }
            }
        }
        (crossings, contact)
    }

    fn any_vertex_inside(of: &Geometry, other: &Geometry) -> bool {
        of.vertices
            .iter()
            .any(|v| locate_point_in_region(other, v.xy()) == RegionLocation::Inside)
    }

    /// Boundaries touch, interiors stay apart
    pub fn adjacent(a: &Geometry, b: &Geometry) -> bool {
        let (crossings, contact) = boundary_relation(a, b);
        contact
            && crossings.is_empty()
            && !any_vertex_inside(a, b)
            && !any_vertex_inside(b, a)
    }

    /// `a` lies inside `b`; boundary contact is allowed
    pub fn within(a: &Geometry, b: &Geometry) -> bool {
        let (crossings, _) = boundary_relation(a, b);
        crossings.is_empty()
            && a.vertices
                .iter()
                .all(|v| locate_point_in_region(b, v.xy()) != RegionLocation::Outside)
    }

    /// `a` lies strictly inside `b` with no shared boundary coordinate
    pub fn completely_within(a: &Geometry, b: &Geometry) -> bool {
        let (_, contact) = boundary_relation(a, b);
        !contact
            && a.vertices
                .iter()
                .all(|v| locate_point_in_region(b, v.xy()) == RegionLocation::Inside)
    }

    /// Same outer ring up to rotation and direction, under the shared
    /// tolerance
    pub fn equal(a: &Geometry, b: &Geometry) -> bool {
        ring_equal(&region_rings(a)[0], &region_rings(b)[0])
    }

    /// Boundaries share at least one coordinate
    pub fn join(a: &Geometry, b: &Geometry) -> bool {
        boundary_relation(a, b).1
    }

    /// Partial interior sharing: the boundaries properly cross. Returns the
    /// flag plus the crossing coordinates; callers that only want the flag
    /// read the first element.
    pub fn overlap(a: &Geometry, b: &Geometry) -> (bool, Vec<[f64; 2]>) {
        let (crossings, _) = boundary_relation(a, b);
        (!crossings.is_empty(), crossings)
    }

    /// No boundary contact and neither area reaches into the other
    pub fn disjoint(a: &Geometry, b: &Geometry) -> bool {
        !boundary_relation(a, b).1 && !any_vertex_inside(a, b) && !any_vertex_inside(b, a)
    }

    /// Cyclic ring comparison, forward and reversed
    fn ring_equal(a: &[[f64; 2]], b: &[[f64; 2]]) -> bool {
        let a = open_ring(a);
        let b = open_ring(b);
        if a.len() != b.len() || a.is_empty() {
            return a.len() == b.len();
        }
        let n = a.len();
        (0..n).any(|shift| {
            (0..n).all(|i| same_xy(a[i], b[(i + shift) % n]))
                || (0..n).all(|i| same_xy(a[i], b[(shift + n - i) % n]))
        })
    }

    /// Drop the duplicated closing vertex, if present
    fn open_ring(ring: &[[f64; 2]]) -> &[[f64; 2]] {
        if ring.len() >= 2 && same_xy(ring[0], ring[ring.len() - 1]) {
            &ring[..ring.len() - 1]
        } else {
            ring
        }
    }
}
