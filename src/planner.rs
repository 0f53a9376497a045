//! Planner facade.
//!
//! `Planner` owns the roster, the store and the scheduling policies, and
//! is the entry point for every planning command: import, assign,
//! overflow resolution, auto-scheduling, duration edits, removal and the
//! day/window read API.
//!
//! All mutating commands take `&mut self` and run to completion, so the
//! read-capacity-then-commit sequence of an assignment cannot interleave
//! with another command. Hosts serving several users must put the
//! planner behind a lock to keep that property.

use chrono::{DateTime, NaiveDate, Utc};

use crate::capacity::{CapacityCalculator, CapacitySnapshot};
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::invitation::{InvitationOutcome, InvitationRequest};
use crate::models::{
    CollaboratorRegistry, DayPlan, Event, EventKind, Participants, Selection, Task,
};
use crate::scheduler::{
    AssignOutcome, AssignmentEngine, AutoScheduleOutcome, AutoScheduler, OverflowProposal,
    OverflowResolution, WindowKpi,
};
use crate::search::{search, SearchResults, TaskFilters};
use crate::store::TaskEventStore;
use crate::validation::{
    validate_events, validate_roster, validate_tasks, ValidationError, ValidationErrorKind,
};

/// Time source for the urgency override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }
}

/// Capacity-aware planner.
///
/// # Example
///
/// ```
/// use cabinet_planner::models::{CollaboratorRegistry, Selection, Task, TaskType};
/// use cabinet_planner::planner::Planner;
/// use chrono::NaiveDate;
///
/// let registry = CollaboratorRegistry::default().with_collaborator("BRUNO", 3.5);
/// let mut planner = Planner::new(registry).unwrap();
/// let due = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// planner
///     .add_task(Task::new("T1", TaskType::Tva, "BRUNO", due).with_duration(2.0))
///     .unwrap();
///
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// assert!(planner.assign("T1", monday, None).unwrap().is_committed());
///
/// let plan = planner.compute_day_plan(monday, &Selection::All);
/// assert_eq!(plan.tasks.len(), 1);
/// assert!((plan.total_load_hours - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    registry: CollaboratorRegistry,
    store: TaskEventStore,
    engine: AssignmentEngine,
    auto: AutoScheduler,
    clock: Clock,
}

impl Planner {
    /// Creates a planner over a validated roster.
    pub fn new(registry: CollaboratorRegistry) -> PlannerResult<Self> {
        validate_roster(&registry).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            PlannerError::InvalidConfig(messages.join("; "))
        })?;
        Ok(Self {
            registry,
            store: TaskEventStore::new(),
            engine: AssignmentEngine::new(),
            auto: AutoScheduler::new(),
            clock: Clock::System,
        })
    }

    /// Creates a planner from configuration.
    pub fn from_config(config: &PlannerConfig) -> PlannerResult<Self> {
        config.validate()?;
        let mut planner = Self::new(config.registry())?;
        planner.engine =
            AssignmentEngine::new().with_urgency_window_hours(config.urgency_override_hours);
        planner.auto = AutoScheduler::new().with_weekdays_only(config.weekdays_only);
        Ok(planner)
    }

    /// Sets the time source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Freezes "now", for reproducible urgency decisions.
    pub fn with_fixed_time(self, now: DateTime<Utc>) -> Self {
        self.with_clock(Clock::Fixed(now))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn registry(&self) -> &CollaboratorRegistry {
        &self.registry
    }

    /// Read-only view of tracked tasks and events.
    pub fn store(&self) -> &TaskEventStore {
        &self.store
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.store.task(task_id)
    }

    // ======================== Task commands ========================

    /// Imports an unscheduled task.
    ///
    /// The task must pass [`validate_tasks`]: a positive duration, a
    /// registered responsible, progression at most 100 and no scheduled
    /// day. Placement only happens through [`assign`](Self::assign) and
    /// [`auto_schedule`](Self::auto_schedule).
    pub fn add_task(&mut self, task: Task) -> PlannerResult<()> {
        if let Err(errors) = validate_tasks(std::slice::from_ref(&task), &self.registry) {
            if let Some(error) = errors.into_iter().next() {
                return Err(task_rejection(&task, error));
            }
        }
        tracing::debug!(task_id = %task.id, responsible = %task.responsible, "Task added");
        self.store.add_task(task)
    }

    /// Removes a task. A second removal is a no-op.
    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let removed = self.store.remove_task(task_id);
        if removed.is_some() {
            tracing::debug!(task_id, "Task removed");
        }
        removed
    }

    /// Changes a task's estimated duration without touching its day.
    ///
    /// A placed task is not re-validated against capacity; if the new
    /// duration overloads its day, a warning is logged and the edit stands.
    pub fn modify_duration(&mut self, task_id: &str, hours: f64) -> PlannerResult<()> {
        self.store.set_duration(task_id, hours)?;

        if let Some(task) = self.store.task(task_id) {
            if let Some(day) = task.scheduled_day {
                let snapshot = self.capacity_for(day, &Selection::single(task.responsible.clone()));
                if snapshot.current_load_hours > snapshot.max_capacity_hours {
                    tracing::warn!(
                        task_id,
                        date = %day,
                        load = snapshot.current_load_hours,
                        capacity = snapshot.max_capacity_hours,
                        "Duration edit leaves day over capacity"
                    );
                }
            }
        }
        Ok(())
    }

    /// Assigns a task to a day, enforcing capacity.
    pub fn assign(
        &mut self,
        task_id: &str,
        date: NaiveDate,
        duration_override: Option<f64>,
    ) -> PlannerResult<AssignOutcome> {
        let now = self.now();
        self.engine.assign(
            &self.registry,
            &mut self.store,
            task_id,
            date,
            duration_override,
            now,
        )
    }

    /// Commits an overflow proposal beyond capacity.
    pub fn confirm_overflow(&mut self, proposal: OverflowProposal) -> PlannerResult<OverflowResolution> {
        self.engine.confirm_overflow(&mut self.store, proposal)
    }

    /// Returns a task to the available pool.
    pub fn unassign(&mut self, task_id: &str) -> PlannerResult<Option<NaiveDate>> {
        let previous = self.store.unassign(task_id)?;
        tracing::debug!(task_id, previous = ?previous, "Task unassigned");
        Ok(previous)
    }

    /// Places every available task on the earliest target day with room.
    pub fn auto_schedule(&mut self, target_days: &[NaiveDate]) -> PlannerResult<AutoScheduleOutcome> {
        let now = self.now();
        self.auto
            .schedule(&self.engine, &self.registry, &mut self.store, target_days, now)
    }

    // ======================== Event commands ========================

    /// Adds an event. Named participants must be registered collaborators.
    pub fn add_event(&mut self, event: Event) -> PlannerResult<()> {
        if let Err(errors) = validate_events(std::slice::from_ref(&event), &self.registry) {
            if let Some(error) = errors.into_iter().next() {
                return Err(event_rejection(&event, error));
            }
        }
        self.store.add_event(event)
    }

    /// Removes an event. A second removal is a no-op.
    pub fn remove_event(&mut self, event_id: &str) -> Option<Event> {
        self.store.remove_event(event_id)
    }

    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.store.event(event_id)
    }

    /// Builds the invitation payload for a client meeting.
    pub fn invitation_request(
        &self,
        event_id: &str,
        organizer: impl Into<String>,
    ) -> PlannerResult<InvitationRequest> {
        let event = self
            .store
            .event(event_id)
            .ok_or_else(|| PlannerError::UnknownEvent(event_id.to_string()))?;
        if event.kind != EventKind::Client {
            return Err(PlannerError::InvitationNotApplicable(event_id.to_string()));
        }

        let participants = match &event.participants {
            Participants::All => self.registry.ids().map(str::to_string).collect(),
            Participants::Specific(ids) => ids.iter().cloned().collect(),
        };
        Ok(InvitationRequest {
            event_id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start: event.start(),
            end: event.end(),
            participants,
            location: event.location.clone(),
            organizer: organizer.into(),
        })
    }

    /// Applies a late invitation answer.
    ///
    /// Returns whether a meeting link was recorded. Failures and answers
    /// for events removed in the meantime leave the store unchanged.
    pub fn apply_invitation_outcome(&mut self, event_id: &str, outcome: &InvitationOutcome) -> bool {
        match (&outcome.meeting_link, outcome.success) {
            (Some(link), true) => match self.store.set_meeting_link(event_id, link.clone()) {
                Ok(()) => true,
                Err(_) => {
                    tracing::debug!(event_id, "Invitation answer for a removed event ignored");
                    false
                }
            },
            _ => {
                tracing::warn!(
                    event_id,
                    error = outcome.error.as_deref().unwrap_or("no meeting link"),
                    "Invitation failed, event kept without link"
                );
                false
            }
        }
    }

    // ======================== Read API ========================

    /// Capacity and load for a day and selection.
    pub fn capacity_for(&self, date: NaiveDate, selection: &Selection) -> CapacitySnapshot {
        CapacityCalculator::new(&self.registry, &self.store).capacity_for(date, selection)
    }

    /// Derived plan for one day.
    pub fn compute_day_plan(&self, date: NaiveDate, selection: &Selection) -> DayPlan {
        let snapshot = self.capacity_for(date, selection);
        DayPlan {
            date,
            tasks: self.store.tasks_on(date, selection).cloned().collect(),
            events: self.store.events_on(date, selection).cloned().collect(),
            total_load_hours: snapshot.current_load_hours,
            max_capacity_hours: snapshot.max_capacity_hours,
            selection: selection.clone(),
        }
    }

    /// Derived plans for several days, in the given order.
    pub fn compute_window(&self, days: &[NaiveDate], selection: &Selection) -> Vec<DayPlan> {
        days.iter()
            .map(|&day| self.compute_day_plan(day, selection))
            .collect()
    }

    /// Indicators over several days.
    pub fn window_kpi(&self, days: &[NaiveDate], selection: &Selection) -> WindowKpi {
        WindowKpi::calculate(&self.compute_window(days, selection))
    }

    /// Searches a pool for tasks not yet tracked by the planner.
    pub fn search<'a>(
        &self,
        pool: &'a [Task],
        query: &str,
        filters: &TaskFilters,
    ) -> SearchResults<'a> {
        let tracked: Vec<&str> = self.store.task_ids().collect();
        search(pool, query, filters, &tracked)
    }
}

/// Maps a task validation failure to the planner error for that field.
fn task_rejection(task: &Task, error: ValidationError) -> PlannerError {
    match error.kind {
        ValidationErrorKind::InvalidDuration => {
            PlannerError::InvalidDuration(task.estimated_duration_hours)
        }
        ValidationErrorKind::UnknownCollaborator => PlannerError::UnknownCollaborator(error.subject),
        ValidationErrorKind::InvalidProgression => PlannerError::InvalidProgression {
            task_id: error.subject,
            progression: task.progression,
        },
        ValidationErrorKind::AlreadyScheduled => PlannerError::TaskAlreadyScheduled(error.subject),
        ValidationErrorKind::DuplicateId => PlannerError::DuplicateTask(error.subject),
        ValidationErrorKind::InvalidCapacity | ValidationErrorKind::InvalidEventWindow => {
            PlannerError::InvalidConfig(error.message)
        }
    }
}

/// Maps an event validation failure to the planner error for that field.
fn event_rejection(event: &Event, error: ValidationError) -> PlannerError {
    match error.kind {
        ValidationErrorKind::UnknownCollaborator => PlannerError::UnknownCollaborator(error.subject),
        ValidationErrorKind::InvalidEventWindow => PlannerError::InvalidEventTime {
            event_id: event.id.clone(),
            date: event.date,
            start: event.start_time,
            end: event.end_time,
        },
        ValidationErrorKind::DuplicateId => PlannerError::DuplicateEvent(error.subject),
        _ => PlannerError::InvalidConfig(error.message),
    }
}
