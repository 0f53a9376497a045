//! Assignment, overflow workflow, auto-scheduling and KPIs.
//!
//! # Assignment
//!
//! `AssignmentEngine` is the single capacity-checked path from "task X on
//! day Y" to a committed placement. It either commits or returns an
//! `OverflowProposal` that the caller confirms or cancels.
//!
//! # Auto-scheduling
//!
//! `AutoScheduler` is a greedy, priority-driven, earliest-day heuristic
//! built on the same assignment path. It is not optimal, but it is fast
//! and deterministic.
//!
//! # KPI
//!
//! `WindowKpi` summarizes load and capacity over a planning window.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

mod auto;
mod engine;
mod kpi;
mod overflow;

pub use auto::{AutoScheduleOutcome, AutoScheduler};
pub use engine::{
    AssignOutcome, AssignmentEngine, CommitReason, Committed, DEFAULT_URGENCY_WINDOW_HOURS,
    MAX_URGENCY_WINDOW_HOURS,
};
pub use kpi::WindowKpi;
pub use overflow::{OverflowProposal, OverflowResolution};
