//! Meeting (event) model.
//!
//! Events occupy a fixed time slot on a single day and count against the
//! capacity of every participating collaborator.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Selection;
use crate::error::{PlannerError, PlannerResult};

/// Kind of meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Internal,
    /// Meeting with a client. The only kind that sends external invitations.
    Client,
    External,
    Meeting,
}

/// Who attends an event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "ids")]
pub enum Participants {
    /// The whole firm.
    #[default]
    All,
    Specific(BTreeSet<String>),
}

impl Participants {
    pub fn specific<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Specific(ids.into_iter().map(Into::into).collect())
    }

    /// Whether the event is relevant for a collaborator selection.
    ///
    /// Firm-wide events match every selection; every event matches `All`.
    pub fn matches(&self, selection: &Selection) -> bool {
        match (self, selection) {
            (Self::All, _) | (_, Selection::All) => true,
            (Self::Specific(ids), Selection::Specific(selected)) => {
                ids.iter().any(|id| selected.contains(id))
            }
        }
    }
}

/// A meeting on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub participants: Participants,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Online meeting link, filled in once the invitation service answers.
    pub external_meeting_link: Option<String>,
}

impl Event {
    /// Creates an event. Fails if `end_time` is not after `start_time`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: EventKind,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> PlannerResult<Self> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            kind,
            date,
            start_time,
            end_time,
            participants: Participants::All,
            location: None,
            description: None,
            external_meeting_link: None,
        };
        event.check_window()?;
        Ok(event)
    }

    /// Sets the participants.
    pub fn with_participants(mut self, participants: Participants) -> Self {
        self.participants = participants;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Duration in hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_seconds() as f64 / 3600.0
    }

    /// Start as a full date-time.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// End as a full date-time.
    pub fn end(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    pub(crate) fn check_window(&self) -> PlannerResult<()> {
        if self.end_time > self.start_time {
            Ok(())
        } else {
            Err(PlannerError::InvalidEventTime {
                event_id: self.id.clone(),
                date: self.date,
                start: self.start_time,
                end: self.end_time,
            })
        }
    }
}
