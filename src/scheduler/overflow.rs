//! Overflow confirmation workflow.
//!
//! An [`OverflowProposal`] is the *Proposed* state: it is created by the
//! assignment engine when a task would exceed its day's capacity and
//! holds the capacity snapshot taken at that moment. The caller may
//! adjust the candidate duration and watch the projected figures, then
//! either confirms (through the planner or
//! [`AssignmentEngine::confirm_overflow`](super::AssignmentEngine::confirm_overflow))
//! or cancels. Both consume the proposal and yield an
//! [`OverflowResolution`], the *Resolved* state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::Committed;
use crate::capacity::{utilization_percent, CapacitySnapshot};
use crate::error::{ensure_valid_duration, PlannerResult};

/// A pending overflow awaiting confirmation or cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverflowProposal {
    task_id: String,
    date: NaiveDate,
    /// Duration the task had before the attempt.
    original_duration: f64,
    /// Duration requested by the assignment attempt.
    proposed_duration: f64,
    /// Duration the user currently intends to commit.
    candidate_duration: f64,
    snapshot: CapacitySnapshot,
}

impl OverflowProposal {
    pub(crate) fn new(
        task_id: impl Into<String>,
        date: NaiveDate,
        original_duration: f64,
        proposed_duration: f64,
        snapshot: CapacitySnapshot,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            date,
            original_duration,
            proposed_duration,
            candidate_duration: proposed_duration,
            snapshot,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn original_duration(&self) -> f64 {
        self.original_duration
    }

    /// Duration that triggered the overflow.
    pub fn proposed_duration(&self) -> f64 {
        self.proposed_duration
    }

    pub fn candidate_duration(&self) -> f64 {
        self.candidate_duration
    }

    /// Load on the day before this task, at detection time.
    pub fn current_load_hours(&self) -> f64 {
        self.snapshot.current_load_hours
    }

    pub fn max_capacity_hours(&self) -> f64 {
        self.snapshot.max_capacity_hours
    }

    /// Tasks already on the day for this collaborator, at detection time.
    pub fn task_count(&self) -> usize {
        self.snapshot.task_count
    }

    pub fn snapshot(&self) -> &CapacitySnapshot {
        &self.snapshot
    }

    /// Adjusts the duration to commit.
    ///
    /// An invalid duration is rejected and the previous candidate kept.
    pub fn set_candidate_duration(&mut self, hours: f64) -> PlannerResult<()> {
        self.candidate_duration = ensure_valid_duration(hours)?;
        Ok(())
    }

    /// Load the day would carry with the candidate duration.
    pub fn projected_load_hours(&self) -> f64 {
        self.snapshot.current_load_hours + self.candidate_duration
    }

    /// Projected load as a percentage of capacity. Display only.
    pub fn utilization_percent(&self) -> f64 {
        utilization_percent(self.projected_load_hours(), self.snapshot.max_capacity_hours)
    }

    /// Hours above capacity with the candidate duration (0.0 if it now fits).
    pub fn excess_hours(&self) -> f64 {
        (self.projected_load_hours() - self.snapshot.max_capacity_hours).max(0.0)
    }

    /// Whether the candidate duration still exceeds capacity.
    pub fn still_overflows(&self) -> bool {
        self.projected_load_hours() > self.snapshot.max_capacity_hours
    }

    /// Discards the proposal. The task keeps its original day and duration.
    pub fn cancel(self) -> OverflowResolution {
        tracing::debug!(task_id = %self.task_id, date = %self.date, "Overflow cancelled");
        OverflowResolution::Cancelled {
            task_id: self.task_id,
            date: self.date,
        }
    }
}

/// Terminal state of an overflow workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum OverflowResolution {
    /// Committed beyond capacity with the chosen duration.
    Confirmed(Committed),
    /// Discarded; nothing changed.
    Cancelled { task_id: String, date: NaiveDate },
}

impl OverflowResolution {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn task_id(&self) -> &str {
        match self {
            Self::Confirmed(c) => &c.task_id,
            Self::Cancelled { task_id, .. } => task_id,
        }
    }
}
