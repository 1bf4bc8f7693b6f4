//! Board filter evaluator
//!
//! Decides which bugs and tasks are visible under the current [`FilterState`] and
//! derives the milestone column layout.
//!
//! # Task visibility
//!
//! Rules are applied in order; the first one that hides the task wins:
//!
//! 1. The task's milestone (resolved through the catalog) must be shown.
//! 2. A task with neither status nor importance is hidden.
//! 3. A known status whose flag is off hides the task.
//! 4. Otherwise a known importance whose flag is off hides the task.
//!
//! Importance is never consulted once the status has hidden a task. Status or
//! importance values outside the enumerated sets match no flag and never hide.
//!
//! A bug is visible when at least one of its tasks is.

use crate::filter::catalog::{MilestoneCatalog, NONE_MILESTONE};
use crate::filter::state::{Axis, FilterState};
use crate::models::{Bug, BugTask, Card, Importance, TaskStatus};

/// Share of the board width given to milestone columns, in percent.
pub const MILESTONE_AREA_PERCENT: f64 = 50.0;

/// Read-only view over a catalog and filter state.
#[derive(Debug, Clone, Copy)]
pub struct BoardFilter<'a> {
    catalog: &'a MilestoneCatalog,
    state: &'a FilterState,
}

impl<'a> BoardFilter<'a> {
    pub fn new(catalog: &'a MilestoneCatalog, state: &'a FilterState) -> Self {
        Self { catalog, state }
    }

    /// Catalog key for a raw task milestone.
    ///
    /// Tasks sometimes reference milestones that are not in the metadata feed;
    /// those are collected in the `"none"` bucket together with untargeted tasks.
    pub fn resolve_milestone_key<'m>(&self, raw: &'m str) -> &'m str {
        if raw.is_empty() {
            return NONE_MILESTONE;
        }
        if !self.catalog.contains(raw) {
            log::trace!("Milestone '{}' not in catalog, using '{}'", raw, NONE_MILESTONE);
            return NONE_MILESTONE;
        }
        raw
    }

    pub fn milestone_shown(&self, raw: &str) -> bool {
        self.state.is_active(Axis::Milestone, self.resolve_milestone_key(raw))
    }

    pub fn task_visible(&self, task: &BugTask) -> bool {
        if !self.milestone_shown(&task.milestone) {
            return false;
        }
        if !task.is_classified() {
            return false;
        }

        let mut show = true;
        if let Some(status) = task.status.as_deref().and_then(TaskStatus::from_str) {
            if !self.state.status_active(status) {
                show = false;
            }
        }
        if show {
            if let Some(importance) = task.importance.as_deref().and_then(Importance::from_str) {
                if !self.state.importance_active(importance) {
                    show = false;
                }
            }
        }
        show
    }

    /// Whether the compact per-milestone cell for `task` is drawn.
    pub fn milestone_cell_visible(&self, task: &BugTask) -> bool {
        self.milestone_shown(&task.milestone) && task.is_classified()
    }

    pub fn bug_visible(&self, bug: &Bug) -> bool {
        bug.tasks.iter().any(|task| self.task_visible(task))
    }

    pub fn visible_bugs<'b>(&self, bugs: &'b [Bug]) -> Vec<&'b Bug> {
        bugs.iter().filter(|bug| self.bug_visible(bug)).collect()
    }

    /// Shown milestones in catalog order.
    pub fn active_milestones(&self) -> Vec<&'a str> {
        let state = self.state;
        self.catalog
            .names()
            .iter()
            .map(String::as_str)
            .filter(|name| state.is_active(Axis::Milestone, name))
            .collect()
    }

    /// Width of one milestone column in percent of the board.
    ///
    /// Returns `0.0` when every milestone is hidden; the board then has no
    /// milestone columns to lay out.
    pub fn milestone_column_width_percent(&self) -> f64 {
        milestone_column_width_percent(self.state.active_count(Axis::Milestone))
    }
}

/// Column width for `active` shown milestones.
pub fn milestone_column_width_percent(active: usize) -> f64 {
    if active == 0 {
        return 0.0;
    }
    MILESTONE_AREA_PERCENT / active as f64
}

/// Whether `card` is a card (not the board entry) assigned to `my_name`.
///
/// Names are compared exactly.
pub fn my_cards_filter(card: &Card, my_name: &str) -> bool {
    if card.board {
        return false;
    }
    card.is_assigned_to(my_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::catalog::build_catalog;
    use crate::models::AssignedUser;

    fn setup() -> (MilestoneCatalog, FilterState) {
        let catalog = build_catalog(&["2.0", "3.0"]);
        let state = FilterState::initialize(&catalog);
        (catalog, state)
    }

    #[test]
    fn test_resolve_milestone_key() {
        let (catalog, state) = setup();
        let filter = BoardFilter::new(&catalog, &state);
        assert_eq!(filter.resolve_milestone_key(""), "none");
        assert_eq!(filter.resolve_milestone_key("some-name-not-in-catalog"), "none");
        assert_eq!(filter.resolve_milestone_key("3.0"), "3.0");
        assert_eq!(filter.resolve_milestone_key("none"), "none");
    }

    #[test]
    fn test_default_visibility() {
        let (catalog, state) = setup();
        let filter = BoardFilter::new(&catalog, &state);

        assert!(!filter.task_visible(&BugTask::new("2.0").with_status("Fix Released")));
        assert!(filter.task_visible(&BugTask::new("2.0").with_status("New")));
        assert!(!filter.task_visible(&BugTask::new("2.0").with_importance("Wishlist")));
        assert!(filter.task_visible(&BugTask::new("").with_importance("High")));
    }

    #[test]
    fn test_unclassified_task_hidden() {
        let (catalog, state) = setup();
        let filter = BoardFilter::new(&catalog, &state);
        assert!(!filter.task_visible(&BugTask::new("2.0")));
        assert!(!filter.task_visible(&BugTask::new("")));
        assert!(!filter.milestone_cell_visible(&BugTask::new("2.0")));
    }

    #[test]
    fn test_status_checked_before_importance() {
        let (catalog, mut state) = setup();

        // Shown status does not rescue a hidden importance.
        let task = BugTask::new("2.0").with_status("New").with_importance("Low");
        assert!(!BoardFilter::new(&catalog, &state).task_visible(&task));

        // Shown importance does not rescue a hidden status.
        let task = BugTask::new("2.0").with_status("Fix Committed").with_importance("Critical");
        assert!(!BoardFilter::new(&catalog, &state).task_visible(&task));

        state.toggle(Axis::Status, "Fix Committed").unwrap();
        assert!(BoardFilter::new(&catalog, &state).task_visible(&task));
    }

    #[test]
    fn test_unknown_status_not_hidden() {
        let (catalog, state) = setup();
        let filter = BoardFilter::new(&catalog, &state);
        assert!(filter.task_visible(&BugTask::new("2.0").with_status("Incomplete")));
        assert!(!filter.task_visible(&BugTask::new("2.0").with_status("Confirmed").with_importance("Low")));
    }

    #[test]
    fn test_milestone_gate() {
        let (catalog, mut state) = setup();
        state.toggle(Axis::Milestone, "none").unwrap();
        let filter = BoardFilter::new(&catalog, &state);

        let task = BugTask::new("").with_status("New");
        assert!(!filter.task_visible(&task));
        assert!(!filter.task_visible(&BugTask::new("1.18").with_status("New")));
        assert!(!filter.milestone_cell_visible(&task));
        assert!(filter.task_visible(&BugTask::new("3.0").with_status("New")));
    }

    #[test]
    fn test_bug_visible() {
        let (catalog, state) = setup();
        let filter = BoardFilter::new(&catalog, &state);

        assert!(!filter.bug_visible(&Bug::new("empty", vec![])));
        let bug = Bug::new(
            "mixed",
            vec![
                BugTask::new("2.0"),
                BugTask::new("3.0").with_status("Fix Released"),
                BugTask::new("").with_status("Triaged"),
            ],
        );
        assert!(filter.bug_visible(&bug));

        let closed = Bug::new("closed", vec![BugTask::new("2.0").with_status("Fix Released")]);
        let bugs = vec![closed, bug];
        let visible = filter.visible_bugs(&bugs);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "mixed");
    }

    #[test]
    fn test_column_width() {
        let (catalog, mut state) = setup();
        assert!((BoardFilter::new(&catalog, &state).milestone_column_width_percent() - 50.0 / 3.0).abs() < 1e-9);

        state.toggle(Axis::Milestone, "none").unwrap();
        let filter = BoardFilter::new(&catalog, &state);
        assert_eq!(filter.milestone_column_width_percent(), 25.0);
        assert_eq!(filter.active_milestones(), vec!["2.0", "3.0"]);

        state.toggle(Axis::Milestone, "2.0").unwrap();
        state.toggle(Axis::Milestone, "3.0").unwrap();
        let filter = BoardFilter::new(&catalog, &state);
        assert_eq!(filter.milestone_column_width_percent(), 0.0);
        assert!(filter.active_milestones().is_empty());
    }

    #[test]
    fn test_my_cards_filter() {
        let mut card = Card {
            title: "Release notes".to_string(),
            assigned_users: vec![
                AssignedUser { assigned_user_name: "Someone Else".to_string() },
                AssignedUser { assigned_user_name: "James Tunnicliffe".to_string() },
            ],
            ..Card::default()
        };
        assert!(my_cards_filter(&card, "James Tunnicliffe"));
        assert!(!my_cards_filter(&card, "James"));

        card.board = true;
        assert!(!my_cards_filter(&card, "James Tunnicliffe"));
    }
}
