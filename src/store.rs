//! In-memory task and event store.
//!
//! The store is the single owner of every task and event. It hands out
//! shared references only; all mutation goes through its methods so the
//! invariants (unique ids, durations > 0, valid event windows) hold.
//!
//! Iteration order is insertion order. The auto-scheduler and search rely
//! on it as the final, stable tie-break.

use chrono::NaiveDate;

use crate::error::{ensure_valid_duration, PlannerError, PlannerResult};
use crate::models::{Event, Selection, Task};

/// Owned collection of tasks and events.
#[derive(Debug, Clone, Default)]
pub struct TaskEventStore {
    tasks: Vec<Task>,
    events: Vec<Event>,
}

impl TaskEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ======================== Tasks ========================

    /// Adds a task. Rejects duplicate ids, invalid durations and tasks
    /// that already carry a scheduled day.
    pub fn add_task(&mut self, task: Task) -> PlannerResult<()> {
        ensure_valid_duration(task.estimated_duration_hours)?;
        if task.is_placed() {
            return Err(PlannerError::TaskAlreadyScheduled(task.id));
        }
        if self.task(&task.id).is_some() {
            return Err(PlannerError::DuplicateTask(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Removes a task. Removing an unknown id is a no-op returning `None`.
    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == task_id)?;
        Some(self.tasks.remove(idx))
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    fn task_mut(&mut self, task_id: &str) -> PlannerResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| PlannerError::UnknownTask(task_id.to_string()))
    }

    /// Whether a task id is tracked.
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.task(task_id).is_some()
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Ids of every tracked task.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.id.as_str())
    }

    /// Tasks without a scheduled day, in insertion order.
    pub fn available_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_placed())
    }

    /// Tasks scheduled on `date` whose responsible is in the selection.
    pub fn tasks_on<'a>(
        &'a self,
        date: NaiveDate,
        selection: &'a Selection,
    ) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks
            .iter()
            .filter(move |t| t.is_scheduled_on(date) && selection.includes(&t.responsible))
    }

    /// Replaces a task's estimated duration. Leaves `scheduled_day` untouched.
    pub fn set_duration(&mut self, task_id: &str, hours: f64) -> PlannerResult<()> {
        let hours = ensure_valid_duration(hours)?;
        self.task_mut(task_id)?.estimated_duration_hours = hours;
        Ok(())
    }

    /// Places a task on a day, optionally replacing its duration.
    ///
    /// Performs no capacity check; callers go through the scheduling engine.
    pub(crate) fn place(
        &mut self,
        task_id: &str,
        date: NaiveDate,
        duration: Option<f64>,
    ) -> PlannerResult<&Task> {
        let duration = duration.map(ensure_valid_duration).transpose()?;
        let task = self.task_mut(task_id)?;
        if let Some(hours) = duration {
            task.estimated_duration_hours = hours;
        }
        task.scheduled_day = Some(date);
        Ok(task)
    }

    /// Clears a task's scheduled day. Returns the day it was on.
    pub fn unassign(&mut self, task_id: &str) -> PlannerResult<Option<NaiveDate>> {
        Ok(self.task_mut(task_id)?.scheduled_day.take())
    }

    // ======================== Events ========================

    /// Adds an event. Rejects duplicate ids and empty time windows.
    pub fn add_event(&mut self, event: Event) -> PlannerResult<()> {
        event.check_window()?;
        if self.event(&event.id).is_some() {
            return Err(PlannerError::DuplicateEvent(event.id));
        }
        self.events.push(event);
        Ok(())
    }

    /// Removes an event. Removing an unknown id is a no-op returning `None`.
    pub fn remove_event(&mut self, event_id: &str) -> Option<Event> {
        let idx = self.events.iter().position(|e| e.id == event_id)?;
        Some(self.events.remove(idx))
    }

    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events on `date` relevant to the selection.
    pub fn events_on<'a>(
        &'a self,
        date: NaiveDate,
        selection: &'a Selection,
    ) -> impl Iterator<Item = &'a Event> + 'a {
        self.events
            .iter()
            .filter(move |e| e.date == date && e.participants.matches(selection))
    }

    /// Records the online meeting link returned by the invitation service.
    pub fn set_meeting_link(&mut self, event_id: &str, link: impl Into<String>) -> PlannerResult<()> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| PlannerError::UnknownEvent(event_id.to_string()))?;
        event.external_meeting_link = Some(link.into());
        Ok(())
    }
}
