//! Input validation for planning data.
//!
//! Checks structural integrity of the roster, tasks and events before
//! they enter the planner. Detects:
//! - Duplicate IDs
//! - Non-positive capacities and durations
//! - References to unknown collaborators
//! - Empty or inverted event time slots
//! - Tasks imported with a scheduled day already set
//!
//! Every check runs; all problems are reported together.

use crate::models::{CollaboratorRegistry, Event, Participants, Task};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// ID of the offending entity (the unknown collaborator for
    /// `UnknownCollaborator`).
    pub subject: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A collaborator has a zero, negative or non-finite capacity.
    InvalidCapacity,
    /// A task has a zero, negative or non-finite duration.
    InvalidDuration,
    /// A task or event references an unregistered collaborator.
    UnknownCollaborator,
    /// An event ends at or before its start.
    InvalidEventWindow,
    /// Completion percentage above 100.
    InvalidProgression,
    /// A task arrives already placed on a day.
    AlreadyScheduled,
}

impl ValidationError {
    fn new(
        kind: ValidationErrorKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the collaborator roster.
///
/// Checks:
/// 1. No duplicate collaborator IDs
/// 2. Every daily capacity is a finite number > 0
pub fn validate_roster(registry: &CollaboratorRegistry) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for c in registry.iter() {
        if !ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &c.id,
                format!("Duplicate collaborator ID: {}", c.id),
            ));
        }
        if !(c.daily_capacity_hours.is_finite() && c.daily_capacity_hours > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                &c.id,
                format!(
                    "Collaborator '{}' has invalid daily capacity {}h",
                    c.id, c.daily_capacity_hours
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates tasks against the roster.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Every duration is a finite number > 0
/// 3. Every responsible is a registered collaborator
/// 4. Progression is at most 100
/// 5. No scheduled day is set (tasks enter the planner unscheduled)
pub fn validate_tasks(tasks: &[Task], registry: &CollaboratorRegistry) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for task in tasks {
        if !ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &task.id,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        let hours = task.estimated_duration_hours;
        if !(hours.is_finite() && hours > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                &task.id,
                format!("Task '{}' has invalid duration {hours}h", task.id),
            ));
        }
        if !registry.contains(&task.responsible) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCollaborator,
                &task.responsible,
                format!(
                    "Task '{}' references unknown collaborator '{}'",
                    task.id, task.responsible
                ),
            ));
        }
        if task.progression > 100 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProgression,
                &task.id,
                format!("Task '{}' has progression {}%", task.id, task.progression),
            ));
        }
        if let Some(day) = task.scheduled_day {
            errors.push(ValidationError::new(
                ValidationErrorKind::AlreadyScheduled,
                &task.id,
                format!("Task '{}' is already placed on {day}", task.id),
            ));
        }
    }

    finish(errors)
}

/// Validates events against the roster.
///
/// Checks:
/// 1. No duplicate event IDs
/// 2. End time strictly after start time
/// 3. Every named participant is a registered collaborator
pub fn validate_events(events: &[Event], registry: &CollaboratorRegistry) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for event in events {
        if !ids.insert(event.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &event.id,
                format!("Duplicate event ID: {}", event.id),
            ));
        }
        if event.end_time <= event.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidEventWindow,
                &event.id,
                format!(
                    "Event '{}' ends at {} which is not after {}",
                    event.id, event.end_time, event.start_time
                ),
            ));
        }
        if let Participants::Specific(participants) = &event.participants {
            for p in participants.iter().filter(|p| !registry.contains(p)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCollaborator,
                    p,
                    format!("Event '{}' references unknown participant '{p}'", event.id),
                ));
            }
        }
    }

    finish(errors)
}
