//! Accounting task model.
//!
//! A task is a unit of client work (a VAT return, a year-end closing, ...)
//! owned by one collaborator, with a due date and an estimated duration.
//! A task with a `scheduled_day` is *placed*; without one it is *available*.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of accounting work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// VAT return.
    Tva,
    /// Personal income tax return.
    Ipp,
    /// Corporate income tax return.
    Isoc,
    /// Year-end closing.
    Cloture,
    /// Interim statement.
    SituationIntermediaire,
    /// Advance tax payments.
    VersementsAnticipees,
    /// Supplementary work.
    Complementaire,
    Other,
}

impl TaskType {
    /// Default estimated duration (hours) when a task does not specify one.
    pub fn default_duration_hours(self) -> f64 {
        match self {
            Self::Tva => 2.0,
            Self::Ipp => 3.0,
            Self::Isoc => 4.0,
            Self::Cloture => 8.0,
            Self::SituationIntermediaire => 4.0,
            Self::VersementsAnticipees => 1.0,
            Self::Complementaire => 2.0,
            Self::Other => 2.0,
        }
    }

    /// Display label, as shown in the planning views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tva => "TVA",
            Self::Ipp => "IPP",
            Self::Isoc => "ISOC",
            Self::Cloture => "CLOTURE",
            Self::SituationIntermediaire => "SITUATION_INTERMEDIAIRE",
            Self::VersementsAnticipees => "VERSEMENTS_ANTICIPEES",
            Self::Complementaire => "COMPLEMENTAIRE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency level. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Urgent,
}

impl Urgency {
    /// Numeric rank used for ordering (urgent = 4 ... low = 1).
    pub fn rank(self) -> u8 {
        match self {
            Self::Urgent => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Work status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    /// Blocked on the client (missing documents, pending answer).
    Waiting,
    Done,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Waiting => "waiting",
            Self::Done => "done",
        }
    }
}

/// An accounting task to be planned.
///
/// Fields are public for reading; once a task is handed to the
/// [`TaskEventStore`](crate::store::TaskEventStore) it is only mutated
/// through store and planner operations, which keep
/// `estimated_duration_hours > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Work category.
    pub task_type: TaskType,
    /// Client the work is done for.
    pub client_name: String,
    /// Responsible collaborator id.
    pub responsible: String,
    pub urgency: Urgency,
    pub status: TaskStatus,
    /// Completion percentage (0..=100).
    pub progression: u8,
    /// Deadline (calendar day).
    pub due_date: NaiveDate,
    /// Estimated work in hours.
    pub estimated_duration_hours: f64,
    /// Day the task is planned on. `None` = available.
    pub scheduled_day: Option<NaiveDate>,
    /// When the task entered the planner.
    pub added_at: DateTime<Utc>,
}

impl Task {
    /// Creates an unscheduled task.
    ///
    /// The duration defaults to [`TaskType::default_duration_hours`],
    /// urgency to `Medium` and status to `Todo`.
    pub fn new(
        id: impl Into<String>,
        task_type: TaskType,
        responsible: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            task_type,
            client_name: String::new(),
            responsible: responsible.into(),
            urgency: Urgency::Medium,
            status: TaskStatus::Todo,
            progression: 0,
            due_date,
            estimated_duration_hours: task_type.default_duration_hours(),
            scheduled_day: None,
            added_at: Utc::now(),
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the client name.
    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    /// Sets the urgency.
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the completion percentage (clamped to 100).
    pub fn with_progression(mut self, progression: u8) -> Self {
        self.progression = progression.min(100);
        self
    }

    /// Sets the estimated duration in hours.
    pub fn with_duration(mut self, hours: f64) -> Self {
        self.estimated_duration_hours = hours;
        self
    }

    /// Sets the import timestamp.
    pub fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }

    /// Whether the task has a scheduled day.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.scheduled_day.is_some()
    }

    /// Whether the task is scheduled on `date`.
    #[inline]
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.scheduled_day == Some(date)
    }
}
