//! Capacity-aware planning core for an accounting firm.
//!
//! Places client tasks (VAT returns, tax filings, closings) and meetings
//! onto a day-by-day calendar while respecting each collaborator's daily
//! hour budget.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Event`, `Collaborator`,
//!   `Selection`, `DayPlan`, `PlanningWindow`
//! - **`store`**: Tracked tasks and events, the single source of truth
//! - **`capacity`**: Daily capacity and load for a collaborator selection
//! - **`dispatching`**: Ranking rules (urgency, due date, progress) and the
//!   rule engine that orders tasks
//! - **`scheduler`**: Capacity-checked assignment, overflow negotiation,
//!   automatic placement and window indicators
//! - **`search`**: Candidate lookup over a task pool
//! - **`planner`**: Facade owning the roster, the store and the policies
//! - **`invitation`**: Boundary to an external meeting-invitation service
//! - **`config`**: YAML configuration
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   collaborators, invalid durations)
//!
//! # Capacity model
//!
//! A day's load is the sum of placed task durations plus the durations of
//! relevant events. Assignment is accepted when `load + duration <= capacity`,
//! or when the task is urgent and due within the override window. Otherwise
//! the caller receives an overflow proposal to confirm or cancel.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Panwalkar & Iskander (1977), "A Survey of Scheduling Rules"

pub mod capacity;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod invitation;
pub mod models;
pub mod planner;
pub mod scheduler;
pub mod search;
pub mod store;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use planner::{Clock, Planner};
