//! Task search and ranking.
//!
//! Surfaces candidate tasks from a pool (advanced search, deadline
//! tracker, suggestion import) that the planner does not track yet.
//!
//! A task is returned iff:
//! - its id is not excluded,
//! - its responsible is in the active selection,
//! - every non-empty structural filter contains its value, AND
//! - the text query is blank or a case-insensitive substring of its name,
//!   client, type label, responsible or status label.
//!
//! Results are ordered most urgent, earliest due, least complete first.

use std::collections::HashSet;

use crate::dispatching::RuleEngine;
use crate::models::{Selection, Task, TaskStatus, TaskType, Urgency};

/// Structural filters. Empty sets do not constrain.
#[derive(Debug, Clone, Default)]
pub struct TaskFilters {
    pub selection: Selection,
    pub types: HashSet<TaskType>,
    pub urgencies: HashSet<Urgency>,
    pub responsibles: HashSet<String>,
    pub statuses: HashSet<TaskStatus>,
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to the selection's collaborators.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.types.insert(task_type);
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgencies.insert(urgency);
        self
    }

    pub fn with_responsible(mut self, id: impl Into<String>) -> Self {
        self.responsibles.insert(id.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// Whether a task passes every structural filter.
    pub fn accepts(&self, task: &Task) -> bool {
        self.selection.includes(&task.responsible)
            && (self.types.is_empty() || self.types.contains(&task.task_type))
            && (self.urgencies.is_empty() || self.urgencies.contains(&task.urgency))
            && (self.responsibles.is_empty() || self.responsibles.contains(&task.responsible))
            && (self.statuses.is_empty() || self.statuses.contains(&task.status))
    }
}

/// Case-insensitive substring match over the searchable fields.
///
/// A blank query matches every task.
pub fn matches_query(task: &Task, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        task.name.as_str(),
        task.client_name.as_str(),
        task.task_type.label(),
        task.responsible.as_str(),
        task.status.label(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Ordered search results. Finite and restartable: iterate as often as needed.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    tasks: Vec<&'a Task>,
}

impl<'a> SearchResults<'a> {
    /// Iterates the results from the top.
    pub fn iter(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.tasks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Result ids in order.
    pub fn ids(&self) -> Vec<&'a str> {
        self.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    /// Owned copies, e.g. for import into the planner.
    pub fn to_vec(&self) -> Vec<Task> {
        self.tasks.iter().map(|t| (*t).clone()).collect()
    }
}

impl<'a> IntoIterator for SearchResults<'a> {
    type Item = &'a Task;
    type IntoIter = std::vec::IntoIter<&'a Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

/// Searches a task pool.
///
/// `excluded_ids` are typically the ids already tracked by the store.
pub fn search<'a, S: AsRef<str>>(
    pool: &'a [Task],
    query: &str,
    filters: &TaskFilters,
    excluded_ids: &[S],
) -> SearchResults<'a> {
    let excluded: HashSet<&str> = excluded_ids.iter().map(AsRef::as_ref).collect();
    let mut tasks: Vec<&Task> = pool
        .iter()
        .filter(|t| !excluded.contains(t.id.as_str()))
        .filter(|t| filters.accepts(t))
        .filter(|t| matches_query(t, query))
        .collect();
    RuleEngine::search_order().sort_refs(&mut tasks);
    SearchResults { tasks }
}
