//! Quality-control rule catalogue
//!
//! Thin consumers of the predicate/evaluator engine, one function per rule.
//! Every rule is pure: it reads the subject and the context and returns a
//! `RuleResult`. Rules gate silently on kinds they do not apply to, except
//! the must-be-kind family whose gate IS the check.

use crate::geometry::{is_area, Geometry, GeometryKind};
use crate::predicates::{line_area, line_line, path_segments, point_area, point_on_segment, same_xy};
use crate::session::geometry_area;
use crate::zcheck::{check_z_at_crossings, check_z_sequence, ZComparison, ZSequence};
use crate::COORD_EPSILON;

use super::combinators::candidates;
use super::types::{RuleContext, RuleResult, Violation};

fn kind_violation(subject: &Geometry, kind_name: &str) -> RuleResult {
    RuleResult::single(Violation::Geometry {
        message: format!("Geometries with this code must be of type {kind_name}"),
        coordinate: Some(subject.first_vertex().to_array()),
    })
}

fn must_be(subject: &Geometry, expected: GeometryKind, kind_name: &str) -> RuleResult {
    if subject.kind == expected {
        RuleResult::pass()
    } else {
        kind_violation(subject, kind_name)
    }
}

pub fn must_be_point(subject: &Geometry, _ctx: &RuleContext) -> RuleResult {
    must_be(subject, GeometryKind::Point, "Point")
}

pub fn must_be_line(subject: &Geometry, _ctx: &RuleContext) -> RuleResult {
    must_be(subject, GeometryKind::Line, "Line")
}

pub fn must_be_text(subject: &Geometry, _ctx: &RuleContext) -> RuleResult {
    must_be(subject, GeometryKind::Text, "Text")
}

pub fn must_be_polygon(subject: &Geometry, _ctx: &RuleContext) -> RuleResult {
    must_be(subject, GeometryKind::Polygon, "Polygon")
}

pub fn must_be_complex(subject: &Geometry, _ctx: &RuleContext) -> RuleResult {
    must_be(subject, GeometryKind::Complex, "Complex")
}

// ---------------------------------------------------------------------------
// Code-count rules
// ---------------------------------------------------------------------------

pub fn must_have_single_code(subject: &Geometry, _ctx: &RuleContext) -> RuleResult {
    if subject.codes.len() > 1 {
        RuleResult::single(Violation::Geometry {
            message: "Geometries with this code must carry a single code".into(),
            coordinate: Some(subject.first_vertex().to_array()),
        })
    } else {
        RuleResult::pass()
    }
}

pub fn must_have_exactly_codes(subject: &Geometry, _ctx: &RuleContext, count: usize) -> RuleResult {
    if subject.codes.len() != count {
        RuleResult::single(Violation::Geometry {
            message: format!("Geometries with this code must carry {count} codes"),
            coordinate: Some(subject.first_vertex().to_array()),
        })
    } else {
        RuleResult::pass()
    }
}

pub fn must_have_at_least_codes(
    subject: &Geometry,
    _ctx: &RuleContext,
    count: usize,
) -> RuleResult {
    if subject.codes.len() < count {
        RuleResult::single(Violation::Geometry {
            message: format!("Geometries with this code must carry at least {count} codes"),
            coordinate: Some(subject.first_vertex().to_array()),
        })
    } else {
        RuleResult::pass()
    }
}

pub fn must_have_more_than_codes(
    subject: &Geometry,
    _ctx: &RuleContext,
    count: usize,
) -> RuleResult {
    if subject.codes.len() <= count {
        RuleResult::single(Violation::Geometry {
            message: format!("Geometries with this code must carry more than {count} codes"),
            coordinate: Some(subject.first_vertex().to_array()),
        })
    } else {
        RuleResult::pass()
    }
}

/// The code at the context's code index must carry a non-null value for the
/// named attribute
pub fn must_have_attribute(subject: &Geometry, ctx: &RuleContext, attribute: &str) -> RuleResult {
    let Some(code) = subject.codes.get(ctx.code_index) else {
        return RuleResult::single(Violation::DatabaseField {
            message: "Rule fired for a code index the geometry does not carry".into(),
            code_index: ctx.code_index,
            attribute: attribute.to_string(),
        });
    };
    if code.attribute(attribute).is_none() {
        RuleResult::single(Violation::DatabaseField {
            message: format!("Code '{}' is missing a value", code.name),
            code_index: ctx.code_index,
            attribute: attribute.to_string(),
        })
    } else {
        RuleResult::pass()
    }
}

// ---------------------------------------------------------------------------
// Area-threshold rules
//
// Gated on lines and polygons, like the host's area property. Each variant
// carries its literal comparison.
// ---------------------------------------------------------------------------

fn area_gate(subject: &Geometry) -> bool {
    matches!(subject.kind, GeometryKind::Line | GeometryKind::Polygon)
}

fn area_violation(subject: &Geometry, message: String) -> RuleResult {
    RuleResult::single(Violation::Geometry {
        message,
        coordinate: Some(subject.first_vertex().to_array()),
    })
}

pub fn must_have_area_above(subject: &Geometry, ctx: &RuleContext, bound: f64) -> RuleResult {
    if !area_gate(subject) {
        return RuleResult::pass();
    }
    if geometry_area(subject, ctx.calculator) <= bound {
        area_violation(
            subject,
            format!("Geometries with this code must have an area above {bound}"),
        )
    } else {
        RuleResult::pass()
    }
}

pub fn must_have_area_at_least(subject: &Geometry, ctx: &RuleContext, bound: f64) -> RuleResult {
    if !area_gate(subject) {
        return RuleResult::pass();
    }
    if geometry_area(subject, ctx.calculator) < bound {
        area_violation(
            subject,
            format!("Geometries with this code must have an area of at least {bound}"),
        )
    } else {
        RuleResult::pass()
    }
}

pub fn must_have_area_below(subject: &Geometry, ctx: &RuleContext, bound: f64) -> RuleResult {
    if !area_gate(subject) {
        return RuleResult::pass();
    }
    if geometry_area(subject, ctx.calculator) >= bound {
        area_violation(
            subject,
            format!("Geometries with this code must have an area below {bound}"),
        )
    } else {
        RuleResult::pass()
    }
}

pub fn must_have_area_at_most(subject: &Geometry, ctx: &RuleContext, bound: f64) -> RuleResult {
    if !area_gate(subject) {
        return RuleResult::pass();
    }
    if geometry_area(subject, ctx.calculator) > bound {
        area_violation(
            subject,
            format!("Geometries with this code must have an area of at most {bound}"),
        )
    } else {
        RuleResult::pass()
    }
}

// ---------------------------------------------------------------------------
// Z-sequence rules
// ---------------------------------------------------------------------------

fn z_sequence_rule(
    subject: &Geometry,
    ctx: &RuleContext,
    sequence: ZSequence,
    message: &str,
) -> RuleResult {
    check_z_sequence(subject, sequence, ctx.mode)
        .into_iter()
        .map(|i| Violation::Geometry {
            message: message.to_string(),
            coordinate: Some(subject.vertices[i].to_array()),
        })
        .collect()
}

pub fn no_vertex_z_above_previous(subject: &Geometry, ctx: &RuleContext) -> RuleResult {
    z_sequence_rule(
        subject,
        ctx,
        ZSequence::NonIncreasing,
        "Vertex with Z above the previous one",
    )
}

pub fn no_vertex_z_above_or_equal_previous(subject: &Geometry, ctx: &RuleContext) -> RuleResult {
    z_sequence_rule(
        subject,
        ctx,
        ZSequence::StrictlyDecreasing,
        "Vertex with Z above or equal to the previous one",
    )
}

pub fn no_vertex_z_below_previous(subject: &Geometry, ctx: &RuleContext) -> RuleResult {
    z_sequence_rule(
        subject,
        ctx,
        ZSequence::NonDecreasing,
        "Vertex with Z below the previous one",
    )
}

pub fn no_vertex_z_below_or_equal_previous(subject: &Geometry, ctx: &RuleContext) -> RuleResult {
    z_sequence_rule(
        subject,
        ctx,
        ZSequence::StrictlyIncreasing,
        "Vertex with Z below or equal to the previous one",
    )
}

pub fn all_vertices_same_z(subject: &Geometry, ctx: &RuleContext) -> RuleResult {
    z_sequence_rule(
        subject,
        ctx,
        ZSequence::AllEqual,
        "Vertex with Z different from the first vertex",
    )
}

/// Contour lines keep one constant Z, and that Z is a multiple of the
/// session equidistance
pub fn contour_z_multiple_of_equidistance(subject: &Geometry, ctx: &RuleContext) -> RuleResult {
    if subject.kind != GeometryKind::Line {
        return RuleResult::pass();
    }
    let constant = all_vertices_same_z(subject, ctx);
    if !constant.is_pass() {
        return constant;
    }

    let equidistance = ctx.drawing.equidistance();
    if equidistance <= 0.0 {
        return RuleResult::pass();
    }
    let z = subject.first_vertex().z;
    let nearest = (z / equidistance).round() * equidistance;
    if (z - nearest).abs() > COORD_EPSILON {
        RuleResult::single(Violation::Geometry {
            message: format!("Contour elevation {z} is not a multiple of the equidistance"),
            coordinate: Some(subject.first_vertex().to_array()),
        })
    } else {
        RuleResult::pass()
    }
}

/// Vertex elevations must stay within a tolerance of the terrain model
///
/// Coordinates the model cannot project are skipped; an absent model passes
/// everything.
pub fn elevation_within_terrain_tolerance(
    subject: &Geometry,
    ctx: &RuleContext,
    tolerance: f64,
) -> RuleResult {
    let Some(model) = ctx.elevation else {
        return RuleResult::pass();
    };
    let mut result = RuleResult::pass();
    for vertex in &subject.vertices {
        if let Some(ground) = model.project(vertex.x, vertex.y) {
            if (vertex.z - ground).abs() > tolerance {
                result.push(Violation::Geometry {
                    message: format!(
                        "Vertex elevation deviates {:.3} from the terrain model",
                        (vertex.z - ground).abs()
                    ),
                    coordinate: Some(vertex.to_array()),
                });
                if ctx.mode.stop_at_first() {
                    break;
                }
            }
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Relation rules
// ---------------------------------------------------------------------------

/// The subject must not properly cross any candidate matching the token list
pub fn must_not_cross(subject: &Geometry, ctx: &RuleContext, tokens: &str) -> RuleResult {
    if subject.vertices.len() < 2 {
        return RuleResult::pass();
    }
    let mut result = RuleResult::pass();
    for candidate in candidates(ctx, subject, Some(tokens)) {
        let crossings =
            line_line::get_cross_vertices(subject, candidate, ctx.mode.stop_at_first());
        for vertex_index in crossings {
            result.push(Violation::Relation {
                message: "Geometry crosses a geometry it must not cross".into(),
                coordinate: Some(subject.vertices[vertex_index].to_array()),
                others: vec![candidate.id],
            });
            if ctx.mode.stop_at_first() {
                return result;
            }
        }
    }
    result
}

/// The subject must lie within some candidate area matching the token list
pub fn must_be_within_area(subject: &Geometry, ctx: &RuleContext, tokens: &str) -> RuleResult {
    let areas: Vec<&Geometry> = candidates(ctx, subject, Some(tokens))
        .into_iter()
        .filter(|g| is_area(g))
        .collect();

    let contained = areas.iter().any(|area| match subject.kind {
        GeometryKind::Point | GeometryKind::Text => {
            point_area::within(subject, area) || point_area::coincident(subject, area)
        }
        _ => line_area::within(subject, area),
    });

    if contained {
        RuleResult::pass()
    } else {
        RuleResult::single(Violation::Geometry {
            message: format!("Geometry must lie within an area coded '{tokens}'"),
            coordinate: Some(subject.first_vertex().to_array()),
        })
    }
}

/// Both terminal vertices of the subject line must land on a candidate line
pub fn endpoints_must_join(subject: &Geometry, ctx: &RuleContext, tokens: &str) -> RuleResult {
    if subject.kind != GeometryKind::Line || subject.closed_2d {
        return RuleResult::pass();
    }
    let candidate_set = candidates(ctx, subject, Some(tokens));
    let mut result = RuleResult::pass();

    for terminal in [subject.first_vertex(), subject.last_vertex()] {
        let p = terminal.xy();
        let joined = candidate_set.iter().any(|c| {
            path_segments(c)
                .iter()
                .any(|(_, a, b)| point_on_segment(p, *a, *b))
        });
        if !joined {
            result.push(Violation::Relation {
                message: format!("Line endpoint does not join a geometry coded '{tokens}'"),
                coordinate: Some(terminal.to_array()),
                others: Vec::new(),
            });
            if ctx.mode.stop_at_first() {
                return result;
            }
        }
    }
    result
}

/// Two points with this code must not share a coordinate
pub fn must_not_duplicate_point(subject: &Geometry, ctx: &RuleContext, tokens: &str) -> RuleResult {
    if !matches!(subject.kind, GeometryKind::Point | GeometryKind::Text) {
        return RuleResult::pass();
    }
    let p = subject.first_vertex().xy();
    let duplicates: Vec<u64> = candidates(ctx, subject, Some(tokens))
        .into_iter()
        .filter(|g| matches!(g.kind, GeometryKind::Point | GeometryKind::Text))
        .filter(|g| same_xy(p, g.first_vertex().xy()))
        .map(|g| g.id)
        .collect();

    if duplicates.is_empty() {
        RuleResult::pass()
    } else {
        RuleResult::single(Violation::Relation {
            message: "Another point with this code sits on the same coordinate".into(),
            coordinate: Some(subject.first_vertex().to_array()),
            others: duplicates,
        })
    }
}

/// Elevation-difference rule at every planar meeting point with matching
/// candidates; comparator and tolerance are literal rule parameters
pub fn z_difference_at_crossings(
    subject: &Geometry,
    ctx: &RuleContext,
    tokens: &str,
    cmp: ZComparison,
    tolerance: f64,
) -> RuleResult {
    if subject.vertices.len() < 2 {
        return RuleResult::pass();
    }
    let candidate_set = candidates(ctx, subject, Some(tokens));
    check_z_at_crossings(subject, &candidate_set, cmp, tolerance, ctx.mode)
        .into_iter()
        .map(|hit| Violation::Relation {
            message: format!(
                "Elevation difference {:.3} at a shared point violates the tolerance",
                (hit.subject_z - hit.other_z).abs()
            ),
            coordinate: Some([hit.coordinate[0], hit.coordinate[1], hit.subject_z]),
            others: vec![hit.other_id],
        })
        .collect()
}
