//! Live dashboard state
//!
//! A [`Dashboard`] owns the most recent full snapshot of bugs, project metadata
//! and cards, together with the milestone catalog derived from it and the
//! user's [`FilterState`]. Every refresh replaces the snapshot wholesale; a
//! snapshot older than the one already applied is ignored.

use crate::filter::{build_catalog, Axis, BoardFilter, FilterError, FilterState, MilestoneCatalog};
use crate::filter::my_cards_filter;
use crate::models::{find_project_milestones, Bug, Card, ProjectMeta};
use anyhow::Result;

/// Project whose milestones the board shows unless configured otherwise.
pub const DEFAULT_PROJECT_URL: &str = "https://api.launchpad.net/1.0/juju-core";

/// Full-replacement view of the upstream data at one revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub revision: i64,
    pub bugs: Vec<Bug>,
    pub projects: Vec<ProjectMeta>,
    pub cards: Vec<Card>,
}

/// Provider of full snapshots (bug list, metadata and cards).
pub trait SnapshotSource {
    fn fetch(&self) -> Result<Snapshot>;
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    project_url: String,
    catalog: MilestoneCatalog,
    state: FilterState,
    snapshot: Option<Snapshot>,
}

impl Dashboard {
    pub fn new(project_url: &str) -> Self {
        let catalog = MilestoneCatalog::default();
        let state = FilterState::initialize(&catalog);
        Self {
            project_url: project_url.to_string(),
            catalog,
            state,
            snapshot: None,
        }
    }

    /// Fetch a snapshot from `source` and apply it.
    pub fn refresh<S: SnapshotSource + ?Sized>(&mut self, source: &S) -> Result<bool> {
        let snapshot = source.fetch()?;
        Ok(self.apply(snapshot))
    }

    /// Apply a snapshot. Returns false when it is older than the current one.
    pub fn apply(&mut self, snapshot: Snapshot) -> bool {
        if let Some(current) = &self.snapshot {
            if snapshot.revision < current.revision {
                log::debug!(
                    "Ignoring stale snapshot at revision {} (current {})",
                    snapshot.revision,
                    current.revision
                );
                return false;
            }
        }

        match find_project_milestones(&snapshot.projects, &self.project_url) {
            Some(milestones) => {
                self.catalog = build_catalog(milestones);
                self.state.rebuild_milestones(&self.catalog);
                log::info!(
                    "Milestone catalog rebuilt with {} entries at revision {}",
                    self.catalog.len(),
                    snapshot.revision
                );
            }
            None => {
                log::warn!(
                    "No metadata for project {}; keeping {} milestone(s)",
                    self.project_url,
                    self.catalog.len()
                );
            }
        }

        self.snapshot = Some(snapshot);
        true
    }

    pub fn filter(&self) -> BoardFilter<'_> {
        BoardFilter::new(&self.catalog, &self.state)
    }

    pub fn toggle(&mut self, axis: Axis, key: &str) -> Result<(), FilterError> {
        self.state.toggle(axis, key)
    }

    pub fn catalog(&self) -> &MilestoneCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn project_url(&self) -> &str {
        &self.project_url
    }

    pub fn revision(&self) -> Option<i64> {
        self.snapshot.as_ref().map(|s| s.revision)
    }

    pub fn bugs(&self) -> &[Bug] {
        self.snapshot.as_ref().map(|s| s.bugs.as_slice()).unwrap_or(&[])
    }

    pub fn cards(&self) -> &[Card] {
        self.snapshot.as_ref().map(|s| s.cards.as_slice()).unwrap_or(&[])
    }

    pub fn visible_bugs(&self) -> Vec<&Bug> {
        self.filter().visible_bugs(self.bugs())
    }

    pub fn my_cards(&self, my_name: &str) -> Vec<&Card> {
        self.cards().iter().filter(|card| my_cards_filter(card, my_name)).collect()
    }
}
