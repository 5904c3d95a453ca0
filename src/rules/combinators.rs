//! Candidate filtering and the exists-matching combinator
//!
//! Every relation rule follows the same shape: gate on the subject's kind,
//! build a filtered candidate set, apply a predicate across it. The
//! filtering and scanning live here once instead of in every rule body.

use crate::codes::{has_any_code, has_code, has_code_or_tag};
use crate::geometry::Geometry;
use std::collections::HashSet;

use super::types::RuleContext;

/// Candidate set for a relation rule: every non-deleted geometry other than
/// the subject whose bounds overlap the subject's, optionally narrowed to a
/// code/tag token list
///
/// The bounding-box pre-filter runs inside the snapshot's R-tree query;
/// exact predicates only ever see geometries that survived it.
pub fn candidates<'a>(
    ctx: &RuleContext<'a>,
    subject: &Geometry,
    tokens: Option<&str>,
) -> Vec<&'a Geometry> {
    ctx.drawing
        .candidates_near(&subject.bounds)
        .into_iter()
        .filter(|g| g.id != subject.id)
        .filter(|g| match tokens {
            Some(tokens) => has_code_or_tag(g, tokens, ctx.code_table),
            None => true,
        })
        .collect()
}

/// True when any candidate satisfies the predicate
pub fn exists_matching<'a>(
    candidates: &[&'a Geometry],
    predicate: impl Fn(&Geometry) -> bool,
) -> bool {
    candidates.iter().any(|g| predicate(g))
}

/// Candidates satisfying the predicate, in candidate order
pub fn matching<'a>(
    candidates: &[&'a Geometry],
    predicate: impl Fn(&Geometry) -> bool,
) -> Vec<&'a Geometry> {
    candidates
        .iter()
        .filter(|g| predicate(g))
        .copied()
        .collect()
}

// ---------------------------------------------------------------------------
// Sequence utilities over host geometry sets
// ---------------------------------------------------------------------------

pub fn deleted<'a>(
    geometries: impl IntoIterator<Item = &'a Geometry>,
) -> impl Iterator<Item = &'a Geometry> {
    geometries.into_iter().filter(|g| g.deleted)
}

pub fn non_deleted<'a>(
    geometries: impl IntoIterator<Item = &'a Geometry>,
) -> impl Iterator<Item = &'a Geometry> {
    geometries.into_iter().filter(|g| !g.deleted)
}

pub fn with_code<'a>(
    geometries: impl IntoIterator<Item = &'a Geometry>,
    name: &'a str,
) -> impl Iterator<Item = &'a Geometry> {
    geometries.into_iter().filter(move |g| has_code(g, name))
}

pub fn with_any_code<'a>(
    geometries: impl IntoIterator<Item = &'a Geometry>,
    names: &'a HashSet<String>,
) -> impl Iterator<Item = &'a Geometry> {
    geometries
        .into_iter()
        .filter(move |g| has_any_code(g, names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Code, Vertex};

    fn coded_point(id: u64, x: f64, code: &str) -> Geometry {
        Geometry::point(id, Vertex::new(x, 0.0, 0.0)).with_code(Code::new(code))
    }

    #[test]
    fn test_sequence_filters() {
        let geometries = vec![
            coded_point(1, 0.0, "0101"),
            coded_point(2, 1.0, "0204").with_deleted(true),
            coded_point(3, 2.0, "0204"),
        ];

        let live: Vec<u64> = non_deleted(&geometries).map(|g| g.id).collect();
        assert_eq!(live, vec![1, 3]);
        let dead: Vec<u64> = deleted(&geometries).map(|g| g.id).collect();
        assert_eq!(dead, vec![2]);

        let roads: Vec<u64> = with_code(&geometries, "0204").map(|g| g.id).collect();
        assert_eq!(roads, vec![2, 3]);

        let names: HashSet<String> = ["0101".to_string()].into();
        let hydro: Vec<u64> = with_any_code(&geometries, &names).map(|g| g.id).collect();
        assert_eq!(hydro, vec![1]);
    }

    #[test]
    fn test_exists_matching() {
        let a = coded_point(1, 0.0, "0101");
        let b = coded_point(2, 1.0, "0204");
        let set = vec![&a, &b];
        assert!(exists_matching(&set, |g| has_code(g, "0204")));
        assert!(!exists_matching(&set, |g| has_code(g, "9999")));
        assert_eq!(matching(&set, |g| has_code(g, "0101")).len(), 1);
    }
}
