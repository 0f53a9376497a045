//! Built-in ranking rules.
//!
//! # Score Convention
//! All rules return lower scores for tasks that should come first.

use chrono::Datelike;

use super::{RankingRule, RuleScore};
use crate::models::Task;

/// Most urgent first (urgent → high → medium → low).
#[derive(Debug, Clone, Copy)]
pub struct UrgencyRank;

impl RankingRule for UrgencyRank {
    fn name(&self) -> &'static str {
        "URGENCY"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        -f64::from(task.urgency.rank())
    }

    fn description(&self) -> &'static str {
        "Highest urgency rank"
    }
}

/// Earliest Due Date.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct EarliestDueDate;

impl RankingRule for EarliestDueDate {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        f64::from(task.due_date.num_days_from_ce())
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Least complete first.
#[derive(Debug, Clone, Copy)]
pub struct LeastProgress;

impl RankingRule for LeastProgress {
    fn name(&self) -> &'static str {
        "PROGRESS"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        f64::from(task.progression)
    }

    fn description(&self) -> &'static str {
        "Lowest completion percentage"
    }
}
