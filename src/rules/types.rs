//! Rule results and the violation taxonomy
//!
//! Violations are reported values, never process-fatal: a rule that finds
//! nothing wrong returns an empty result, and a missing code attribute is a
//! reportable condition like any other.

use serde::Serialize;
use thiserror::Error;

use crate::codes::CodeTable;
use crate::session::{DistanceCalculator, DrawingSnapshot, ElevationModel};
use crate::EvalMode;

/// One reported quality violation
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind")]
pub enum Violation {
    /// Defect of the geometry itself
    #[error("{message}")]
    Geometry {
        message: String,
        coordinate: Option<[f64; 3]>,
    },
    /// Defect of the geometry's relation to other geometries
    #[error("{message}")]
    Relation {
        message: String,
        coordinate: Option<[f64; 3]>,
        /// Ids of the implicated geometries
        others: Vec<u64>,
    },
    /// Missing or null attribute on an attached code
    #[error("{message} (code {code_index}, attribute '{attribute}')")]
    DatabaseField {
        message: String,
        code_index: usize,
        attribute: String,
    },
}

impl Violation {
    pub fn coordinate(&self) -> Option<[f64; 3]> {
        match self {
            Violation::Geometry { coordinate, .. } | Violation::Relation { coordinate, .. } => {
                *coordinate
            }
            Violation::DatabaseField { .. } => None,
        }
    }
}

/// Outcome of one rule invocation; empty means the geometry passed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleResult {
    violations: Vec<Violation>,
}

impl RuleResult {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn is_pass(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl FromIterator<Violation> for RuleResult {
    fn from_iter<T: IntoIterator<Item = Violation>>(iter: T) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

/// Read-only collaborators handed to every rule invocation
///
/// Rules receive the subject geometry separately; everything here is shared
/// across subjects and across worker threads.
pub struct RuleContext<'a> {
    pub drawing: &'a DrawingSnapshot,
    pub code_table: &'a CodeTable,
    pub calculator: &'a dyn DistanceCalculator,
    pub elevation: Option<&'a dyn ElevationModel>,
    pub mode: EvalMode,
    /// Index of the code under which the rule fired, for attribute lookups
    pub code_index: usize,
}
