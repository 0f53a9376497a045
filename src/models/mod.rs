//! Planning domain models.
//!
//! Provides the core data types of the planner: who can work
//! (collaborators), what has to be done (tasks), what is already booked
//! (events), and the derived per-day view.
//!
//! # Domain Mappings
//!
//! | cabinet-planner | Generic scheduling |
//! |-----------------|--------------------|
//! | Collaborator | Resource with a daily capacity |
//! | Task | Job with a due date and a duration |
//! | Event | Fixed reservation on a resource |
//! | DayPlan | One bucket of a capacity plan |

mod calendar;
mod collaborator;
mod day_plan;
mod event;
mod selection;
mod task;

pub use calendar::{is_weekday, normalize_days, PlanningWindow};
pub use collaborator::{Collaborator, CollaboratorRegistry};
pub use day_plan::DayPlan;
pub use event::{Event, EventKind, Participants};
pub use selection::Selection;
pub use task::{Task, TaskStatus, TaskType, Urgency};
