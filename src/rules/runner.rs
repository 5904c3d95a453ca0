//! Validation runners
//!
//! Batch validation runs every rule over every geometry of a snapshot,
//! parallel across subjects over the shared immutable context. Interactive
//! validation checks one freshly digitized geometry and returns on the
//! first failing rule.

use rayon::prelude::*;
use serde::Serialize;

use crate::codes::CodeTable;
use crate::geometry::Geometry;
use crate::session::{DistanceCalculator, DrawingSnapshot, ElevationModel};
use crate::EvalMode;

use super::types::{RuleContext, RuleResult, Violation};

/// One rule with the name it is reported under
pub struct NamedRule<'a> {
    pub name: &'a str,
    pub run: &'a (dyn Fn(&Geometry, &RuleContext) -> RuleResult + Sync),
}

/// Violations one rule produced for one geometry
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub geometry_id: u64,
    pub rule: String,
    pub violations: Vec<Violation>,
}

/// Run every rule over every geometry of the snapshot and collect all
/// findings
pub fn run_batch_validation(
    drawing: &DrawingSnapshot,
    code_table: &CodeTable,
    calculator: &dyn DistanceCalculator,
    elevation: Option<&dyn ElevationModel>,
    rules: &[NamedRule],
) -> Vec<Finding> {
    let start = std::time::Instant::now();
    let ctx = RuleContext {
        drawing,
        code_table,
        calculator,
        elevation,
        mode: EvalMode::Batch,
        code_index: 0,
    };

    let subjects: Vec<&Geometry> = drawing.geometries().collect();
    let findings: Vec<Finding> = subjects
        .par_iter()
        .flat_map(|subject| {
            rules
                .iter()
                .filter_map(|rule| {
                    let result = (rule.run)(subject, &ctx);
                    if result.is_pass() {
                        None
                    } else {
                        Some(Finding {
                            geometry_id: subject.id,
                            rule: rule.name.to_string(),
                            violations: result.into_violations(),
                        })
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    eprintln!(
        "[QC] Batch validation: {} geometries, {} rules, {} findings in {:?}",
        subjects.len(),
        rules.len(),
        findings.len(),
        start.elapsed()
    );

    findings
}

/// Validate one freshly digitized geometry; returns the first failing
/// rule's result, or a pass
pub fn run_interactive_validation(
    subject: &Geometry,
    drawing: &DrawingSnapshot,
    code_table: &CodeTable,
    calculator: &dyn DistanceCalculator,
    elevation: Option<&dyn ElevationModel>,
    rules: &[NamedRule],
) -> RuleResult {
    let ctx = RuleContext {
        drawing,
        code_table,
        calculator,
        elevation,
        mode: EvalMode::Interactive,
        code_index: 0,
    };

    for rule in rules {
        let result = (rule.run)(subject, &ctx);
        if !result.is_pass() {
            return result;
        }
    }
    RuleResult::pass()
}
