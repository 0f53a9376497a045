//! Priority-driven greedy auto-scheduler.
//!
//! # Algorithm
//!
//! 1. Take every available (unscheduled) task, in store order.
//! 2. Stable-sort them with the rule engine (urgency desc, due date asc).
//! 3. Normalize the target days: chronological, deduplicated, weekends
//!    dropped.
//! 4. For each task, try the days in order through
//!    [`AssignmentEngine::assign`]; the first commit wins. Overflow
//!    proposals raised while scanning are discarded.
//! 5. Tasks no day accepts stay available and are reported as unplaced.
//!
//! # Complexity
//! O(n log n + n * d * m) where n=available tasks, d=target days,
//! m=tasks and events in the store (each capacity read scans the store).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{AssignOutcome, AssignmentEngine};
use crate::dispatching::RuleEngine;
use crate::error::PlannerResult;
use crate::models::{normalize_days, CollaboratorRegistry, Task};
use crate::store::TaskEventStore;

/// Result of an auto-scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoScheduleOutcome {
    /// Tasks committed during this run, in placement order.
    pub placed: Vec<Task>,
    /// Tasks no target day could take, in attempt order.
    pub unplaced: Vec<Task>,
}

impl AutoScheduleOutcome {
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// The day a task was placed on during this run.
    pub fn day_of(&self, task_id: &str) -> Option<NaiveDate> {
        self.placed
            .iter()
            .find(|t| t.id == task_id)
            .and_then(|t| t.scheduled_day)
    }
}

/// Greedy batch scheduler.
///
/// # Example
///
/// ```
/// use cabinet_planner::models::{CollaboratorRegistry, Task, TaskType};
/// use cabinet_planner::scheduler::{AssignmentEngine, AutoScheduler};
/// use cabinet_planner::store::TaskEventStore;
/// use chrono::{NaiveDate, Utc};
///
/// let registry = CollaboratorRegistry::default().with_collaborator("BRUNO", 3.5);
/// let mut store = TaskEventStore::new();
/// let due = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// store.add_task(Task::new("T1", TaskType::Tva, "BRUNO", due)).unwrap();
///
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let outcome = AutoScheduler::new()
///     .schedule(&AssignmentEngine::new(), &registry, &mut store, &[monday], Utc::now())
///     .unwrap();
/// assert_eq!(outcome.placed_count(), 1);
/// assert_eq!(outcome.day_of("T1"), Some(monday));
/// ```
#[derive(Debug, Clone)]
pub struct AutoScheduler {
    rule_engine: RuleEngine,
    weekdays_only: bool,
}

impl AutoScheduler {
    /// Creates a scheduler ordering by urgency then due date, weekdays only.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::scheduling_order(),
            weekdays_only: true,
        }
    }

    /// Allows weekend days as targets.
    pub fn with_weekdays_only(mut self, weekdays_only: bool) -> Self {
        self.weekdays_only = weekdays_only;
        self
    }

    /// Places every available task on the earliest target day that takes it.
    pub fn schedule(
        &self,
        assignment: &AssignmentEngine,
        registry: &CollaboratorRegistry,
        store: &mut TaskEventStore,
        target_days: &[NaiveDate],
        now: DateTime<Utc>,
    ) -> PlannerResult<AutoScheduleOutcome> {
        let days = normalize_days(target_days, self.weekdays_only);
        let order = self.sort_available(store);
        let mut outcome = AutoScheduleOutcome::default();

        for task_id in order {
            let mut placed = false;
            for &day in &days {
                match assignment.assign(registry, store, &task_id, day, None, now)? {
                    AssignOutcome::Committed(_) => {
                        placed = true;
                        break;
                    }
                    AssignOutcome::OverflowDetected(_) => continue,
                }
            }

            if let Some(task) = store.task(&task_id) {
                if placed {
                    outcome.placed.push(task.clone());
                } else {
                    tracing::debug!(task_id = %task_id, "No target day could take task");
                    outcome.unplaced.push(task.clone());
                }
            }
        }

        tracing::info!(
            days = days.len(),
            placed = outcome.placed_count(),
            unplaced = outcome.unplaced_count(),
            "Auto-schedule run finished"
        );
        Ok(outcome)
    }

    /// Ids of available tasks in placement order.
    fn sort_available(&self, store: &TaskEventStore) -> Vec<String> {
        let available: Vec<&Task> = store.available_tasks().collect();
        self.rule_engine
            .sort_indices(&available)
            .into_iter()
            .map(|i| available[i].id.clone())
            .collect()
    }
}

impl Default for AutoScheduler {
    fn default() -> Self {
        Self::new()
    }
}
