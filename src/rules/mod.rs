//! Rule evaluation framework
//!
//! # Submodules
//! - `types` - violations, rule results, the rule context
//! - `combinators` - candidate filtering and exists-matching
//! - `quality` - the quality-control rule catalogue
//! - `runner` - batch and interactive validation entry points

mod combinators;
pub mod quality;
mod runner;
mod types;

pub use combinators::{
    candidates, deleted, exists_matching, matching, non_deleted, with_any_code, with_code,
};
pub use runner::{run_batch_validation, run_interactive_validation, Finding, NamedRule};
pub use types::{RuleContext, RuleResult, Violation};
