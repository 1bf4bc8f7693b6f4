//! Filter state
//!
//! One "show" flag per key on each classification axis. The status and importance
//! axes are keyed by the fixed enumerations; the milestone axis is keyed by the
//! names of the current [`MilestoneCatalog`] and is rebuilt with it.

use crate::filter::catalog::MilestoneCatalog;
use crate::models::{Importance, TaskStatus};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Classification axis of a filter flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Status,
    Importance,
    Milestone,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Status => "status",
            Axis::Importance => "importance",
            Axis::Milestone => "milestone",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The key is not part of the axis domain. For milestones this means the
    /// caller holds a reference into a catalog that has since been replaced.
    #[error("Unknown {axis} '{key}'")]
    InvalidKey { axis: Axis, key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    status: HashMap<TaskStatus, bool>,
    importance: HashMap<Importance, bool>,
    milestone: HashMap<String, bool>,
}

impl FilterState {
    /// Fresh state with the default flags for every axis.
    pub fn initialize(catalog: &MilestoneCatalog) -> Self {
        Self {
            status: TaskStatus::ALL.iter().map(|s| (*s, s.shown_by_default())).collect(),
            importance: Importance::ALL.iter().map(|i| (*i, i.shown_by_default())).collect(),
            milestone: catalog.names().iter().map(|name| (name.clone(), true)).collect(),
        }
    }

    /// Re-key the milestone axis to a new catalog.
    ///
    /// Flags for milestones that survive the rebuild are kept, new milestones
    /// start out shown, and names no longer in the catalog are dropped.
    pub fn rebuild_milestones(&mut self, catalog: &MilestoneCatalog) {
        let previous = std::mem::take(&mut self.milestone);
        self.milestone = catalog
            .names()
            .iter()
            .map(|name| (name.clone(), previous.get(name).copied().unwrap_or(true)))
            .collect();
    }

    /// Flip the flag for `key` on `axis`.
    pub fn toggle(&mut self, axis: Axis, key: &str) -> Result<(), FilterError> {
        let flag = self.flag_mut(axis, key).ok_or_else(|| FilterError::InvalidKey {
            axis,
            key: key.to_string(),
        })?;
        *flag = !*flag;
        log::debug!("Toggled {} '{}' to {}", axis, key, *flag);
        Ok(())
    }

    /// Whether `key` is shown on `axis`. Keys outside the domain are never active.
    pub fn is_active(&self, axis: Axis, key: &str) -> bool {
        self.flag(axis, key).unwrap_or(false)
    }

    /// Flag lookup that distinguishes "hidden" from "not in the domain".
    pub fn flag(&self, axis: Axis, key: &str) -> Option<bool> {
        match axis {
            Axis::Status => TaskStatus::from_str(key).and_then(|s| self.status.get(&s).copied()),
            Axis::Importance => Importance::from_str(key).and_then(|i| self.importance.get(&i).copied()),
            Axis::Milestone => self.milestone.get(key).copied(),
        }
    }

    fn flag_mut(&mut self, axis: Axis, key: &str) -> Option<&mut bool> {
        match axis {
            Axis::Status => TaskStatus::from_str(key).and_then(|s| self.status.get_mut(&s)),
            Axis::Importance => Importance::from_str(key).and_then(|i| self.importance.get_mut(&i)),
            Axis::Milestone => self.milestone.get_mut(key),
        }
    }

    pub fn active_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Status => self.status.values().filter(|shown| **shown).count(),
            Axis::Importance => self.importance.values().filter(|shown| **shown).count(),
            Axis::Milestone => self.milestone.values().filter(|shown| **shown).count(),
        }
    }

    pub fn status_active(&self, status: TaskStatus) -> bool {
        self.status.get(&status).copied().unwrap_or(false)
    }

    pub fn importance_active(&self, importance: Importance) -> bool {
        self.importance.get(&importance).copied().unwrap_or(false)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::initialize(&MilestoneCatalog::default())
    }
}
