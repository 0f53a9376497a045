//! Capacity calculation.
//!
//! Computes, for a day and a collaborator selection, how many hours can
//! be scheduled and how many already are. Everything here is a pure
//! function of the registry and the store.
//!
//! # Load
//! load(d, s) = Σ duration(task) for tasks scheduled on d with responsible ∈ s
//!            + Σ duration(event) for events on d whose participants match s

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CollaboratorRegistry, Selection};
use crate::store::TaskEventStore;

/// Capacity and load figures for one day and selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    pub max_capacity_hours: f64,
    pub current_load_hours: f64,
    /// Number of tasks contributing to the load.
    pub task_count: usize,
    /// Number of events contributing to the load.
    pub event_count: usize,
}

impl CapacitySnapshot {
    /// Hours still available (negative when overloaded).
    #[inline]
    pub fn remaining_hours(&self) -> f64 {
        self.max_capacity_hours - self.current_load_hours
    }

    /// Whether `duration` more hours stay within capacity.
    #[inline]
    pub fn fits(&self, duration: f64) -> bool {
        self.current_load_hours + duration <= self.max_capacity_hours
    }

    /// Current load as a percentage of capacity.
    pub fn utilization_percent(&self) -> f64 {
        utilization_percent(self.current_load_hours, self.max_capacity_hours)
    }
}

/// `load / capacity * 100`, or 0.0 when there is no capacity.
pub fn utilization_percent(load_hours: f64, capacity_hours: f64) -> f64 {
    if capacity_hours <= 0.0 {
        0.0
    } else {
        load_hours / capacity_hours * 100.0
    }
}

/// Computes capacity figures over a registry and a store.
#[derive(Debug, Clone, Copy)]
pub struct CapacityCalculator<'a> {
    registry: &'a CollaboratorRegistry,
    store: &'a TaskEventStore,
}

impl<'a> CapacityCalculator<'a> {
    pub fn new(registry: &'a CollaboratorRegistry, store: &'a TaskEventStore) -> Self {
        Self { registry, store }
    }

    /// Maximum capacity of a selection on any day.
    ///
    /// An empty explicit selection falls back to a single collaborator's
    /// capacity and is logged as a data-consistency warning.
    pub fn max_capacity(&self, selection: &Selection) -> f64 {
        if selection.is_empty() {
            let fallback = self.registry.fallback_capacity();
            tracing::warn!(
                fallback_hours = fallback,
                "Empty collaborator selection, falling back to single collaborator capacity"
            );
            return fallback;
        }
        self.registry.total_capacity(selection)
    }

    /// Capacity and load for a day and selection.
    pub fn capacity_for(&self, date: NaiveDate, selection: &Selection) -> CapacitySnapshot {
        self.snapshot(date, selection, None)
    }

    /// Same as [`capacity_for`](Self::capacity_for), ignoring one task.
    ///
    /// Used when re-assigning a task that may already sit on `date`, so it
    /// is not counted against itself.
    pub fn capacity_for_excluding(
        &self,
        date: NaiveDate,
        selection: &Selection,
        task_id: &str,
    ) -> CapacitySnapshot {
        self.snapshot(date, selection, Some(task_id))
    }

    fn snapshot(
        &self,
        date: NaiveDate,
        selection: &Selection,
        excluded_task: Option<&str>,
    ) -> CapacitySnapshot {
        let mut load = 0.0;
        let mut task_count = 0;
        for task in self
            .store
            .tasks_on(date, selection)
            .filter(|t| Some(t.id.as_str()) != excluded_task)
        {
            load += task.estimated_duration_hours;
            task_count += 1;
        }

        let mut event_count = 0;
        for event in self.store.events_on(date, selection) {
            load += event.duration_hours();
            event_count += 1;
        }

        CapacitySnapshot {
            max_capacity_hours: self.max_capacity(selection),
            current_load_hours: load,
            task_count,
            event_count,
        }
    }
}
