//! Day plan (derived view) model.
//!
//! A day plan is the projection of the store onto one day and one
//! collaborator selection. It is always recomputed, never stored, so it
//! cannot drift from the tasks and events it summarizes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Event, Selection, Task};

/// Tasks, events and capacity figures for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// Tasks scheduled on this day for the selection, in store order.
    pub tasks: Vec<Task>,
    /// Events on this day relevant to the selection, in store order.
    pub events: Vec<Event>,
    /// Task plus event hours.
    pub total_load_hours: f64,
    pub max_capacity_hours: f64,
    pub selection: Selection,
}

impl DayPlan {
    /// Hours still available (negative when overloaded).
    #[inline]
    pub fn remaining_hours(&self) -> f64 {
        self.max_capacity_hours - self.total_load_hours
    }

    /// Load as a percentage of capacity (0.0 if there is no capacity).
    pub fn utilization_percent(&self) -> f64 {
        if self.max_capacity_hours <= 0.0 {
            0.0
        } else {
            self.total_load_hours / self.max_capacity_hours * 100.0
        }
    }

    /// Whether load exceeds capacity.
    #[inline]
    pub fn is_overloaded(&self) -> bool {
        self.total_load_hours > self.max_capacity_hours
    }

    /// Hours coming from tasks only.
    pub fn task_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.estimated_duration_hours).sum()
    }

    /// Hours coming from events only.
    pub fn event_hours(&self) -> f64 {
        self.events.iter().map(Event::duration_hours).sum()
    }
}
