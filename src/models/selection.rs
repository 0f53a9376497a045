//! Collaborator selection.
//!
//! The active set of collaborators against which capacity and load are
//! computed: either everyone, or an explicit set of ids.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active collaborator selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "ids")]
pub enum Selection {
    /// Every registered collaborator.
    #[default]
    All,
    /// An explicit set of collaborator ids.
    Specific(BTreeSet<String>),
}

impl Selection {
    /// Selection of a single collaborator.
    pub fn single(id: impl Into<String>) -> Self {
        Self::Specific(BTreeSet::from([id.into()]))
    }

    /// Selection of the given collaborators.
    pub fn specific<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Specific(ids.into_iter().map(Into::into).collect())
    }

    /// Whether a collaborator is part of this selection.
    pub fn includes(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Specific(ids) => ids.contains(id),
        }
    }

    /// An explicit selection with no ids.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Specific(ids) if ids.is_empty())
    }
}
