//! Ranking rules and rule engine for task ordering.
//!
//! Both the auto-scheduler and task search order tasks with the same
//! machinery: a chain of ranking rules evaluated in sequence, each one
//! consulted only when the previous ones tie.
//!
//! # Usage
//!
//! ```
//! use cabinet_planner::dispatching::{rules, RuleEngine};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::UrgencyRank)
//!     .with_rule(rules::EarliestDueDate)
//!     .with_rule(rules::LeastProgress);
//! assert_eq!(engine.rule_names(), vec!["URGENCY", "EDD", "PROGRESS"]);
//! ```

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::Task;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = ranked first.
pub type RuleScore = f64;

/// A rule that scores a task for ordering.
///
/// # Score Convention
/// **Lower score = ranked first.** A rule favouring urgent tasks returns
/// smaller values for more urgent ones.
pub trait RankingRule: Send + Sync + Debug {
    /// Short rule name (e.g., "EDD").
    fn name(&self) -> &'static str;

    /// Scores a task.
    fn evaluate(&self, task: &Task) -> RuleScore;

    fn description(&self) -> &'static str {
        self.name()
    }
}
