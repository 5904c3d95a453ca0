//! Point-Point, Point-Line and Point-Area relations
//!
//! The point operand is the geometry's single coordinate (points and texts
//! both qualify); the other operand supplies a path or an area boundary.

use super::{
    locate_point_in_region, path_segments, point_on_segment, same_xy, RegionLocation,
};
use crate::geometry::Geometry;

/// Relations between two single-coordinate geometries
pub mod point_point {
    use super::*;

    /// Both geometries sit on the same planar coordinate
    pub fn coincident(a: &Geometry, b: &Geometry) -> bool {
        same_xy(a.first_vertex().xy(), b.first_vertex().xy())
    }

    pub fn disjoint(a: &Geometry, b: &Geometry) -> bool {
        !coincident(a, b)
    }
}

/// Relations between a single-coordinate geometry and a polyline
pub mod point_line {
    use super::*;

    fn on_path(p: [f64; 2], line: &Geometry) -> bool {
        path_segments(line)
            .iter()
            .any(|(_, a, b)| point_on_segment(p, *a, *b))
    }

    fn at_terminal(p: [f64; 2], line: &Geometry) -> bool {
        same_xy(p, line.first_vertex().xy()) || same_xy(p, line.last_vertex().xy())
    }

    /// The point lies on the line's interior, terminal vertices excluded
    pub fn coincident(point: &Geometry, line: &Geometry) -> bool {
        let p = point.first_vertex().xy();
        on_path(p, line) && !at_terminal(p, line)
    }

    /// The point sits exactly on one of the line's terminal vertices
    pub fn coincident_and_terminate(point: &Geometry, line: &Geometry) -> bool {
        at_terminal(point.first_vertex().xy(), line)
    }

    pub fn disjoint(point: &Geometry, line: &Geometry) -> bool {
        !on_path(point.first_vertex().xy(), line)
    }
}

/// Relations between a single-coordinate geometry and an area
pub mod point_area {
    use super::*;

    /// The point lies on the area's boundary (outer ring or a hole ring)
    pub fn coincident(point: &Geometry, area: &Geometry) -> bool {
        locate_point_in_region(area, point.first_vertex().xy()) == RegionLocation::Boundary
    }

    /// The point lies strictly inside the area, outside every hole
    pub fn within(point: &Geometry, area: &Geometry) -> bool {
        locate_point_in_region(area, point.first_vertex().xy()) == RegionLocation::Inside
    }

    pub fn disjoint(point: &Geometry, area: &Geometry) -> bool {
        locate_point_in_region(area, point.first_vertex().xy()) == RegionLocation::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;

    fn point_at(x: f64, y: f64) -> Geometry {
        Geometry::point(90, Vertex::new(x, y, 0.0))
    }

    fn diagonal() -> Geometry {
        Geometry::line(
            1,
            vec![
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(10.0, 10.0, 0.0),
                Vertex::new(20.0, 10.0, 0.0),
            ],
            false,
        )
        .unwrap()
    }

    fn donut() -> Geometry {
        let outer = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(10.0, 0.0, 0.0),
            Vertex::new(10.0, 10.0, 0.0),
            Vertex::new(0.0, 10.0, 0.0),
            Vertex::new(0.0, 0.0, 0.0),
        ];
        let hole = vec![
            Vertex::new(4.0, 4.0, 0.0),
            Vertex::new(6.0, 4.0, 0.0),
            Vertex::new(6.0, 6.0, 0.0),
            Vertex::new(4.0, 6.0, 0.0),
            Vertex::new(4.0, 4.0, 0.0),
        ];
        Geometry::polygon(2, outer, vec![hole]).unwrap()
    }

    #[test]
    fn test_point_point() {
        assert!(point_point::coincident(&point_at(3.0, 4.0), &point_at(3.0, 4.0)));
        assert!(point_point::disjoint(&point_at(3.0, 4.0), &point_at(3.0, 4.1)));
    }

    #[test]
    fn test_point_line_interior_vs_terminal() {
        let l = diagonal();
        assert!(point_line::coincident(&point_at(5.0, 5.0), &l));
        assert!(!point_line::coincident(&point_at(0.0, 0.0), &l));
        assert!(point_line::coincident_and_terminate(&point_at(0.0, 0.0), &l));
        assert!(point_line::coincident_and_terminate(&point_at(20.0, 10.0), &l));
        assert!(point_line::disjoint(&point_at(5.0, 6.0), &l));
        // An interior vertex is on the interior, not a terminal
        assert!(point_line::coincident(&point_at(10.0, 10.0), &l));
    }

    #[test]
    fn test_point_area_with_hole() {
        let a = donut();
        assert!(point_area::within(&point_at(2.0, 2.0), &a));
        assert!(point_area::coincident(&point_at(0.0, 5.0), &a));
        assert!(point_area::disjoint(&point_at(15.0, 5.0), &a));
        // Inside the hole counts as outside the area
        assert!(point_area::disjoint(&point_at(5.0, 5.0), &a));
        // On the hole boundary counts as boundary
        assert!(point_area::coincident(&point_at(4.0, 5.0), &a));
    }
}
