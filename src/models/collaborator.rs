//! Collaborator (planning resource) model.
//!
//! A collaborator is a person who can be scheduled for work. Their only
//! scheduling-relevant attribute is a fixed daily capacity in hours.

use serde::{Deserialize, Serialize};

use super::Selection;

/// A collaborator with a fixed daily work capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Unique collaborator identifier (their name, e.g. "BRUNO").
    pub id: String,
    /// Hours this collaborator can be scheduled for on a single day.
    pub daily_capacity_hours: f64,
}

impl Collaborator {
    /// Creates a collaborator with the given daily capacity.
    pub fn new(id: impl Into<String>, daily_capacity_hours: f64) -> Self {
        Self {
            id: id.into(),
            daily_capacity_hours,
        }
    }
}

/// Read-only roster of collaborators, in configuration order.
///
/// Validation of the roster (duplicate ids, non-positive capacities)
/// lives in [`crate::validation::validate_roster`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaboratorRegistry {
    collaborators: Vec<Collaborator>,
}

impl CollaboratorRegistry {
    /// Creates a registry from a list of collaborators.
    pub fn new(collaborators: Vec<Collaborator>) -> Self {
        Self { collaborators }
    }

    /// Adds a collaborator.
    pub fn with_collaborator(mut self, id: impl Into<String>, daily_capacity_hours: f64) -> Self {
        self.collaborators
            .push(Collaborator::new(id, daily_capacity_hours));
        self
    }

    /// Looks up a collaborator by id.
    pub fn get(&self, id: &str) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| c.id == id)
    }

    /// Whether a collaborator is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All collaborators in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Collaborator> {
        self.collaborators.iter()
    }

    /// All collaborator ids in configuration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.collaborators.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.collaborators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collaborators.is_empty()
    }

    /// Daily capacity of one collaborator (0.0 if unknown).
    pub fn capacity_of(&self, id: &str) -> f64 {
        self.get(id).map(|c| c.daily_capacity_hours).unwrap_or(0.0)
    }

    /// Capacity of the first registered collaborator.
    ///
    /// Used when an explicit selection turns out empty.
    pub fn fallback_capacity(&self) -> f64 {
        self.collaborators
            .first()
            .map(|c| c.daily_capacity_hours)
            .unwrap_or(0.0)
    }

    /// Summed daily capacity of the selected collaborators.
    ///
    /// Ids in the selection that are not registered contribute nothing.
    /// An empty explicit selection sums to 0.0; the fallback is applied
    /// by the capacity calculator, which also reports it.
    pub fn total_capacity(&self, selection: &Selection) -> f64 {
        self.collaborators
            .iter()
            .filter(|c| selection.includes(&c.id))
            .map(|c| c.daily_capacity_hours)
            .sum()
    }
}
