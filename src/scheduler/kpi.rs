//! Planning window indicators (KPIs).
//!
//! Summarizes a series of day plans, typically one week or one month of
//! the planning view.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total load | Σ task + event hours |
//! | Total capacity | Σ daily capacity |
//! | Avg utilization | Total load / total capacity |
//! | Peak utilization | Highest single-day utilization |
//! | Overloaded days | Days with load > capacity |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::capacity::utilization_percent;
use crate::models::DayPlan;

/// Indicators over a planning window. Percentages are 0..100+.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowKpi {
    pub total_load_hours: f64,
    pub total_capacity_hours: f64,
    /// Window-wide load over capacity.
    pub avg_utilization_percent: f64,
    /// Highest single-day utilization.
    pub peak_utilization_percent: f64,
    /// Days whose load exceeds capacity, chronological.
    pub overloaded_days: Vec<NaiveDate>,
    pub task_count: usize,
    pub event_count: usize,
}

impl WindowKpi {
    /// Computes indicators from day plans.
    pub fn calculate(plans: &[DayPlan]) -> Self {
        let mut kpi = Self::default();

        for plan in plans {
            kpi.total_load_hours += plan.total_load_hours;
            kpi.total_capacity_hours += plan.max_capacity_hours;
            kpi.task_count += plan.tasks.len();
            kpi.event_count += plan.events.len();
            kpi.peak_utilization_percent = kpi
                .peak_utilization_percent
                .max(plan.utilization_percent());
            if plan.is_overloaded() {
                kpi.overloaded_days.push(plan.date);
            }
        }

        kpi.overloaded_days.sort_unstable();
        kpi.avg_utilization_percent =
            utilization_percent(kpi.total_load_hours, kpi.total_capacity_hours);
        kpi
    }

    /// Hours left across the window (negative when overbooked overall).
    pub fn remaining_hours(&self) -> f64 {
        self.total_capacity_hours - self.total_load_hours
    }
}
