//! Planning windows.
//!
//! A planning window is an inclusive range of calendar days backing the
//! week and month views. The auto-scheduler only ever fills weekdays.
//!
//! # Precedence
//! A day is a candidate for automatic placement iff it falls within the
//! window AND is a weekday (Monday to Friday).

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// An inclusive day range [start, end].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl PlanningWindow {
    /// Creates a window. Bounds are swapped if given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Monday to Sunday week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let monday = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
        Self::new(monday, sunday)
    }

    /// Calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self::new(first, last)
    }

    /// Number of days in the window.
    #[inline]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether a day falls within this window.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day in chronological order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(|d| *d <= end).collect()
    }

    /// Weekdays (Monday to Friday) in chronological order.
    pub fn weekdays(&self) -> Vec<NaiveDate> {
        self.days().into_iter().filter(|d| is_weekday(*d)).collect()
    }
}

/// Whether a day is Monday to Friday.
#[inline]
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Deduplicates and sorts days chronologically, optionally dropping weekends.
pub fn normalize_days(days: &[NaiveDate], weekdays_only: bool) -> Vec<NaiveDate> {
    let mut out: Vec<NaiveDate> = days
        .iter()
        .copied()
        .filter(|d| !weekdays_only || is_weekday(*d))
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}
