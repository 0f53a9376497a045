//! Manual assignment engine.
//!
//! # Algorithm
//!
//! 1. Resolve the duration (explicit override, else the task's estimate).
//! 2. Read capacity for the task's responsible on the target day, not
//!    counting the task itself if it already sits there.
//! 3. Urgent tasks due within the override window always commit.
//! 4. Otherwise, if load + duration exceeds capacity, return an overflow
//!    proposal and mutate nothing.
//! 5. Otherwise commit: set the day, persist the override duration.
//!
//! The auto-scheduler goes through [`AssignmentEngine::assign`] too, so
//! capacity is enforced in exactly one place.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::overflow::{OverflowProposal, OverflowResolution};
use crate::capacity::CapacityCalculator;
use crate::error::{ensure_valid_duration, PlannerError, PlannerResult};
use crate::models::{CollaboratorRegistry, Selection, Task, Urgency};
use crate::store::TaskEventStore;

/// Default urgency override window (hours before the due date).
pub const DEFAULT_URGENCY_WINDOW_HOURS: i64 = 24;

/// Longest accepted urgency override window: one leap year.
pub const MAX_URGENCY_WINDOW_HOURS: i64 = 24 * 366;

/// Why a commit was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitReason {
    /// Load stayed within capacity.
    WithinCapacity,
    /// Urgent task due within the override window; capacity was not enforced.
    UrgencyOverride,
    /// The user acknowledged an overflow.
    OverflowConfirmed,
}

/// A committed assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Committed {
    pub task_id: String,
    pub date: NaiveDate,
    /// Duration the task now carries.
    pub duration_hours: f64,
    pub reason: CommitReason,
}

/// Result of an assignment attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignOutcome {
    Committed(Committed),
    /// Capacity would be exceeded; nothing was mutated.
    OverflowDetected(OverflowProposal),
}

impl AssignOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// The overflow proposal, if one was raised.
    pub fn into_overflow(self) -> Option<OverflowProposal> {
        match self {
            Self::OverflowDetected(proposal) => Some(proposal),
            Self::Committed(_) => None,
        }
    }
}

/// Capacity-checked assignment of tasks to days.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentEngine {
    urgency_window: Duration,
}

impl AssignmentEngine {
    /// Creates an engine with the default 24h urgency window.
    pub fn new() -> Self {
        Self {
            urgency_window: Duration::hours(DEFAULT_URGENCY_WINDOW_HOURS),
        }
    }

    /// Sets the urgency override window, clamped to
    /// `0..=MAX_URGENCY_WINDOW_HOURS`.
    pub fn with_urgency_window_hours(mut self, hours: i64) -> Self {
        self.urgency_window = Duration::hours(hours.clamp(0, MAX_URGENCY_WINDOW_HOURS));
        self
    }

    /// Length of the urgency override window.
    pub fn urgency_window(&self) -> Duration {
        self.urgency_window
    }

    /// Whether a task bypasses capacity enforcement.
    ///
    /// True iff the task is `Urgent` and its due date (midnight UTC) is at
    /// most the override window away from `now`. Overdue urgent tasks
    /// qualify as well.
    pub fn urgency_override_applies(&self, task: &Task, now: DateTime<Utc>) -> bool {
        if task.urgency != Urgency::Urgent {
            return false;
        }
        let due = Utc.from_utc_datetime(&task.due_date.and_time(NaiveTime::default()));
        due - now <= self.urgency_window
    }

    /// Attempts to place a task on `date`.
    ///
    /// # Errors
    /// `UnknownTask` if the id is not tracked, `InvalidDuration` if the
    /// override is not a positive number of hours. Neither mutates.
    pub fn assign(
        &self,
        registry: &CollaboratorRegistry,
        store: &mut TaskEventStore,
        task_id: &str,
        date: NaiveDate,
        duration_override: Option<f64>,
        now: DateTime<Utc>,
    ) -> PlannerResult<AssignOutcome> {
        let task = store
            .task(task_id)
            .ok_or_else(|| PlannerError::UnknownTask(task_id.to_string()))?;
        let duration = match duration_override {
            Some(hours) => ensure_valid_duration(hours)?,
            None => task.estimated_duration_hours,
        };

        let selection = Selection::single(task.responsible.clone());
        let snapshot = CapacityCalculator::new(registry, store)
            .capacity_for_excluding(date, &selection, task_id);

        let reason = if self.urgency_override_applies(task, now) {
            CommitReason::UrgencyOverride
        } else if snapshot.fits(duration) {
            CommitReason::WithinCapacity
        } else {
            tracing::debug!(
                task_id,
                %date,
                current_load = snapshot.current_load_hours,
                proposed = duration,
                capacity = snapshot.max_capacity_hours,
                "Assignment would overflow capacity"
            );
            return Ok(AssignOutcome::OverflowDetected(OverflowProposal::new(
                task_id,
                date,
                task.estimated_duration_hours,
                duration,
                snapshot,
            )));
        };

        let committed = self.commit(store, task_id, date, duration_override, reason)?;
        Ok(AssignOutcome::Committed(committed))
    }

    /// Resolves an overflow proposal by committing it without a capacity check.
    ///
    /// The proposal is consumed; a resolved overflow cannot be replayed.
    pub fn confirm_overflow(
        &self,
        store: &mut TaskEventStore,
        proposal: OverflowProposal,
    ) -> PlannerResult<OverflowResolution> {
        let committed = self.commit(
            store,
            proposal.task_id(),
            proposal.date(),
            Some(proposal.candidate_duration()),
            CommitReason::OverflowConfirmed,
        )?;
        Ok(OverflowResolution::Confirmed(committed))
    }

    fn commit(
        &self,
        store: &mut TaskEventStore,
        task_id: &str,
        date: NaiveDate,
        duration: Option<f64>,
        reason: CommitReason,
    ) -> PlannerResult<Committed> {
        let task = store.place(task_id, date, duration)?;
        tracing::debug!(
            task_id,
            %date,
            duration = task.estimated_duration_hours,
            reason = ?reason,
            "Task committed"
        );
        Ok(Committed {
            task_id: task.id.clone(),
            date,
            duration_hours: task.estimated_duration_hours,
            reason,
        })
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}
