//! Error types for planning operations.
//!
//! Capacity overflow is deliberately absent: it is a control-flow signal
//! returned as [`AssignOutcome::OverflowDetected`](crate::scheduler::AssignOutcome),
//! not a failure.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Result alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors raised at the planner boundary. No variant leaves partial state behind.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid duration: {0}h (must be a finite number of hours > 0)")]
    InvalidDuration(f64),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Unknown collaborator: {0}")]
    UnknownCollaborator(String),

    #[error("Task already tracked: {0}")]
    DuplicateTask(String),

    #[error("Event already tracked: {0}")]
    DuplicateEvent(String),

    #[error("Task '{0}' is already placed; imported tasks must be unscheduled")]
    TaskAlreadyScheduled(String),

    #[error("Task '{task_id}' has progression {progression}% (must be at most 100)")]
    InvalidProgression { task_id: String, progression: u8 },

    #[error("Event '{event_id}' on {date} ends at {end} which is not after its start {start}")]
    InvalidEventTime {
        event_id: String,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Event '{0}' is not a client meeting; invitations are only sent for client events")]
    InvitationNotApplicable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Checks that a duration is usable as a task length.
pub(crate) fn ensure_valid_duration(hours: f64) -> PlannerResult<f64> {
    if hours.is_finite() && hours > 0.0 {
        Ok(hours)
    } else {
        Err(PlannerError::InvalidDuration(hours))
    }
}
