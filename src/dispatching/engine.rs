//! Rule engine for multi-criteria task ordering.
//!
//! Chains ranking rules lexicographically: the first rule decides, the
//! next one is consulted only on ties, and so on. Sorting is stable, so
//! tasks tied on every rule keep their input order.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, RankingRule, RuleScore};
use crate::models::Task;

/// A composable rule engine for task ordering.
///
/// # Example
/// ```
/// use cabinet_planner::dispatching::RuleEngine;
/// use cabinet_planner::models::{Task, TaskType, Urgency};
/// use chrono::NaiveDate;
///
/// let due = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// let tasks = vec![
///     Task::new("low", TaskType::Tva, "BRUNO", due).with_urgency(Urgency::Low),
///     Task::new("urgent", TaskType::Tva, "BRUNO", due).with_urgency(Urgency::Urgent),
/// ];
/// let order = RuleEngine::scheduling_order().sort_indices(&tasks);
/// assert_eq!(tasks[order[0]].id, "urgent");
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn RankingRule>>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Ordering used for automatic placement: most urgent, then earliest due.
    pub fn scheduling_order() -> Self {
        Self::new()
            .with_rule(rules::UrgencyRank)
            .with_rule(rules::EarliestDueDate)
    }

    /// Ordering used for search results: most urgent, earliest due, least complete.
    pub fn search_order() -> Self {
        Self::scheduling_order().with_rule(rules::LeastProgress)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the chained rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns indices into `tasks`, highest ranked first.
    ///
    /// Accepts both owned tasks and task references.
    pub fn sort_indices<T: Borrow<Task>>(&self, tasks: &[T]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..tasks.len()).collect();
        // `sort_by` is stable: full ties keep input order.
        indices.sort_by(|&a, &b| self.compare(tasks[a].borrow(), tasks[b].borrow()));
        indices
    }

    /// Sorts a vector of task references in place, highest ranked first.
    pub fn sort_refs(&self, tasks: &mut [&Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }

    /// Scores from each rule for one task.
    pub fn evaluate(&self, task: &Task) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(task)).collect()
    }

    /// Compares two tasks through the rule chain. Full ties are `Equal`.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a);
            let score_b = rule.evaluate(b);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("epsilon", &self.epsilon)
            .finish()
    }
}
