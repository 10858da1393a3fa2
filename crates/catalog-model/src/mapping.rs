//! User-defined mapping state: source columns to target fields, per-field
//! defaults and linked-field values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldId;

/// Per-field fallback values, applied when the mapped value is empty.
pub type Defaults = BTreeMap<FieldId, String>;

/// Manually entered values for linked fields.
pub type LinkedValues = BTreeMap<FieldId, String>;

/// One `source column -> target field` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source: String,
    pub target: FieldId,
}

/// Source column to target field mapping in insertion order.
///
/// Each source column appears at most once. Re-assigning a column keeps its
/// position and replaces the target. Several columns may point at the same
/// target; consumers apply entries in order so the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `target` to `source`, returning the previous target.
    pub fn set(&mut self, source: impl Into<String>, target: impl Into<FieldId>) -> Option<FieldId> {
        let source = source.into();
        let target = target.into();
        match self.entries.iter_mut().find(|e| e.source == source) {
            Some(entry) => Some(std::mem::replace(&mut entry.target, target)),
            None => {
                self.entries.push(MappingEntry { source, target });
                None
            }
        }
    }

    /// Remove the assignment for `source`, returning its target.
    pub fn remove(&mut self, source: &str) -> Option<FieldId> {
        let index = self.entries.iter().position(|e| e.source == source)?;
        Some(self.entries.remove(index).target)
    }

    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.source == source)
            .map(|e| e.target.as_str())
    }

    /// The source column that currently wins for `target`.
    pub fn source_for(&self, target: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.target == target)
            .map(|e| e.source.as_str())
    }

    pub fn is_mapped(&self, target: &str) -> bool {
        self.entries.iter().any(|e| e.target == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<S, T> FromIterator<(S, T)> for Mapping
where
    S: Into<String>,
    T: Into<FieldId>,
{
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (source, target) in iter {
            mapping.set(source, target);
        }
        mapping
    }
}
