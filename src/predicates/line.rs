//! Line-Line relations
//!
//! All relations compare the two polylines segment pair by segment pair.
//! Crossing enumeration supports the interactive early-exit used while the
//! host is digitizing.

use super::{
    path_segments, point_on_segment, reach_vertex, same_xy, segment_intersection,
    SegIntersection,
};
use crate::geometry::Geometry;

/// Relations between two polylines
pub mod line_line {
    use super::*;

    /// Vertex indices of `a` at which it properly crosses `b`
    ///
    /// A crossing on segment `(i, i+1)` is reported at the vertex where `a`
    /// reaches the crossing coordinate. With `stop_at_first` the scan
    /// returns after the first crossing found.
    pub fn get_cross_vertices(a: &Geometry, b: &Geometry, stop_at_first: bool) -> Vec<usize> {
        let b_segments = path_segments(b);
        let vertex_count = a.vertices.len();
        let mut indices = Vec::new();

        for (i, a_start, a_end) in path_segments(a) {
            for (_, b_start, b_end) in &b_segments {
                if let SegIntersection::Cross(p) =
                    segment_intersection(a_start, a_end, *b_start, *b_end)
                {
                    indices.push(reach_vertex(i, vertex_count, a_start, p));
                    if stop_at_first {
                        return indices;
                    }
                }
            }
        }

        indices.dedup();
        indices
    }

    /// Proper transversal crossing of segment interiors
    pub fn across(a: &Geometry, b: &Geometry) -> bool {
        !get_cross_vertices(a, b, true).is_empty()
    }

    /// Same vertex sequence, forward or reversed, under the shared tolerance
    pub fn equal(a: &Geometry, b: &Geometry) -> bool {
        if a.vertices.len() != b.vertices.len() {
            return false;
        }
        let n = a.vertices.len();
        let forward = (0..n).all(|i| same_xy(a.vertices[i].xy(), b.vertices[i].xy()));
        let reverse = (0..n).all(|i| same_xy(a.vertices[i].xy(), b.vertices[n - 1 - i].xy()));
        forward || reverse
    }

    /// Collinear shared extent of positive length on some segment pair
    pub fn overlap(a: &Geometry, b: &Geometry) -> bool {
        let b_segments = path_segments(b);
        path_segments(a).iter().any(|(_, a_start, a_end)| {
            b_segments.iter().any(|(_, b_start, b_end)| {
                matches!(
                    segment_intersection(*a_start, *a_end, *b_start, *b_end),
                    SegIntersection::Overlap(_, _)
                )
            })
        })
    }

    /// The lines share a point where neither properly crosses the other
    pub fn join(a: &Geometry, b: &Geometry) -> bool {
        let b_segments = path_segments(b);
        path_segments(a).iter().any(|(_, a_start, a_end)| {
            b_segments.iter().any(|(_, b_start, b_end)| {
                matches!(
                    segment_intersection(*a_start, *a_end, *b_start, *b_end),
                    SegIntersection::Touch(_)
                )
            })
        })
    }

    /// A terminal vertex of one line coincides with a terminal vertex of the
    /// other
    pub fn endpoint_join_endpoint(a: &Geometry, b: &Geometry) -> bool {
        let a_ends = [a.first_vertex().xy(), a.last_vertex().xy()];
        let b_ends = [b.first_vertex().xy(), b.last_vertex().xy()];
        a_ends
            .iter()
            .any(|ae| b_ends.iter().any(|be| same_xy(*ae, *be)))
    }

    /// A terminal vertex of one line lies on the other line's interior
    pub fn endpoint_join_excluding_endpoints(a: &Geometry, b: &Geometry) -> bool {
        terminal_on_interior(a, b) || terminal_on_interior(b, a)
    }

    fn terminal_on_interior(of: &Geometry, on: &Geometry) -> bool {
        let on_ends = [on.first_vertex().xy(), on.last_vertex().xy()];
        [of.first_vertex().xy(), of.last_vertex().xy()]
            .into_iter()
            .any(|terminal| {
                if on_ends.iter().any(|e| same_xy(terminal, *e)) {
                    return false;
                }
                path_segments(on)
                    .iter()
                    .any(|(_, s, e)| point_on_segment(terminal, *s, *e))
            })
    }

    /// Any shared coordinate at all, regardless of the relation's shape
    pub(crate) fn touches(a: &Geometry, b: &Geometry) -> bool {
        let b_segments = path_segments(b);
        path_segments(a).iter().any(|(_, a_start, a_end)| {
            b_segments.iter().any(|(_, b_start, b_end)| {
                segment_intersection(*a_start, *a_end, *b_start, *b_end) != SegIntersection::None
            })
        })
    }

    /// No shared coordinate in any way; the negation of the touch union
    pub fn disjoint(a: &Geometry, b: &Geometry) -> bool {
        !touches(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::line_line;
    use crate::geometry::{Geometry, Vertex};

    fn line(id: u64, coords: &[(f64, f64)]) -> Geometry {
        Geometry::line(
            id,
            coords.iter().map(|(x, y)| Vertex::new(*x, *y, 0.0)).collect(),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_across_and_cross_vertices() {
        let a = line(1, &[(0.0, 0.0), (10.0, 10.0)]);
        let b = line(2, &[(0.0, 10.0), (10.0, 0.0)]);
        assert!(line_line::across(&a, &b));
        // Crossing at (5,5) on segment (0,1) is reached at vertex 1
        assert_eq!(line_line::get_cross_vertices(&a, &b, false), vec![1]);
    }

    #[test]
    fn test_cross_vertices_stop_at_first() {
        // Zig-zag crossing the horizontal twice
        let a = line(1, &[(0.0, -1.0), (2.0, 1.0), (4.0, -1.0)]);
        let b = line(2, &[(-1.0, 0.0), (5.0, 0.0)]);
        assert_eq!(line_line::get_cross_vertices(&a, &b, false).len(), 2);
        assert_eq!(line_line::get_cross_vertices(&a, &b, true).len(), 1);
    }

    #[test]
    fn test_touching_lines_join_but_do_not_cross() {
        let a = line(1, &[(0.0, 0.0), (5.0, 5.0)]);
        let b = line(2, &[(5.0, 5.0), (10.0, 0.0)]);
        assert!(line_line::join(&a, &b));
        assert!(!line_line::across(&a, &b));
        assert!(line_line::endpoint_join_endpoint(&a, &b));
        assert!(!line_line::endpoint_join_excluding_endpoints(&a, &b));
    }

    #[test]
    fn test_endpoint_on_interior() {
        let a = line(1, &[(5.0, 0.0), (5.0, 5.0)]);
        let b = line(2, &[(0.0, 5.0), (10.0, 5.0)]);
        // a's upper terminal lands mid-span on b
        assert!(line_line::endpoint_join_excluding_endpoints(&a, &b));
        assert!(!line_line::endpoint_join_endpoint(&a, &b));
    }

    #[test]
    fn test_equal_up_to_direction() {
        let a = line(1, &[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
        let b = line(2, &[(5.0, 5.0), (5.0, 0.0), (0.0, 0.0)]);
        let c = line(3, &[(0.0, 0.0), (5.0, 0.0), (6.0, 5.0)]);
        assert!(line_line::equal(&a, &b));
        assert!(!line_line::equal(&a, &c));
    }

    #[test]
    fn test_overlap_collinear() {
        let a = line(1, &[(0.0, 0.0), (10.0, 0.0)]);
        let b = line(2, &[(4.0, 0.0), (20.0, 0.0)]);
        let c = line(3, &[(0.0, 1.0), (10.0, 1.0)]);
        assert!(line_line::overlap(&a, &b));
        assert!(!line_line::overlap(&a, &c));
    }

    #[test]
    fn test_disjoint_is_negation_of_touch_union() {
        let a = line(1, &[(0.0, 0.0), (10.0, 10.0)]);
        for other in [
            line(2, &[(0.0, 10.0), (10.0, 0.0)]),  // across
            line(3, &[(10.0, 10.0), (20.0, 0.0)]), // join
            line(4, &[(2.0, 2.0), (8.0, 8.0)]),    // overlap
            line(5, &[(50.0, 50.0), (60.0, 60.0)]), // nothing
        ] {
            let touched = line_line::across(&a, &other)
                || line_line::equal(&a, &other)
                || line_line::join(&a, &other)
                || line_line::overlap(&a, &other);
            assert_eq!(line_line::disjoint(&a, &other), !touched);
        }
    }
}
