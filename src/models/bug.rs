use serde::{Deserialize, Serialize};

/// Task status as reported by the issue tracker.
///
/// Only these values take part in status filtering. Anything else the tracker
/// reports (for example `Incomplete` or `Confirmed`) is carried as a raw string
/// on [`BugTask`] and is never hidden by the status axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskStatus {
    Invalid,
    WontFix,
    New,
    Triaged,
    FixCommitted,
    FixReleased,
    Opinion,
    InProgress,
}

impl TaskStatus {
    /// All statuses in option-list order.
    pub const ALL: [TaskStatus; 8] = [
        TaskStatus::Invalid,
        TaskStatus::WontFix,
        TaskStatus::New,
        TaskStatus::Triaged,
        TaskStatus::FixCommitted,
        TaskStatus::FixReleased,
        TaskStatus::Opinion,
        TaskStatus::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Invalid => "Invalid",
            TaskStatus::WontFix => "Won't Fix",
            TaskStatus::New => "New",
            TaskStatus::Triaged => "Triaged",
            TaskStatus::FixCommitted => "Fix Committed",
            TaskStatus::FixReleased => "Fix Released",
            TaskStatus::Opinion => "Opinion",
            TaskStatus::InProgress => "In Progress",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == s)
    }

    /// Closed work is hidden until the user asks for it.
    pub fn shown_by_default(&self) -> bool {
        !matches!(self, Self::FixCommitted | Self::FixReleased)
    }
}

/// Task importance (priority).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Importance {
    Undecided,
    Critical,
    High,
    Medium,
    Low,
    Wishlist,
}

impl Importance {
    /// All importances in option-list order.
    pub const ALL: [Importance; 6] = [
        Importance::Undecided,
        Importance::Critical,
        Importance::High,
        Importance::Medium,
        Importance::Low,
        Importance::Wishlist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Undecided => "Undecided",
            Importance::Critical => "Critical",
            Importance::High => "High",
            Importance::Medium => "Medium",
            Importance::Low => "Low",
            Importance::Wishlist => "Wishlist",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|importance| importance.as_str() == s)
    }

    pub fn shown_by_default(&self) -> bool {
        !matches!(self, Self::Low | Self::Wishlist)
    }
}

/// One task of a bug, scoped to a single milestone/series.
///
/// The collector pads every bug with one placeholder task per milestone that
/// only carries a `milestone`; such tasks have neither status nor importance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BugTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
    #[serde(default)]
    pub milestone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_link: Option<String>,
}

impl BugTask {
    pub fn new(milestone: &str) -> Self {
        Self {
            milestone: milestone.to_string(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_importance(mut self, importance: &str) -> Self {
        self.importance = Some(importance.to_string());
        self
    }

    /// True when the task carries any classifiable state.
    pub fn is_classified(&self) -> bool {
        self.status.is_some() || self.importance.is_some()
    }
}

/// Bug record as written by the collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub web_link: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub tasks: Vec<BugTask>,
}

impl Bug {
    pub fn new(title: &str, tasks: Vec<BugTask>) -> Self {
        Self {
            title: title.to_string(),
            tasks,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion() {
        assert_eq!(TaskStatus::WontFix.as_str(), "Won't Fix");
        assert_eq!(TaskStatus::from_str("Won't Fix"), Some(TaskStatus::WontFix));
        assert_eq!(TaskStatus::from_str("In Progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_str("Incomplete"), None);
        assert_eq!(TaskStatus::from_str("new"), None);
    }

    #[test]
    fn test_status_defaults() {
        let hidden: Vec<_> = TaskStatus::ALL.iter().filter(|s| !s.shown_by_default()).collect();
        assert_eq!(hidden, vec![&TaskStatus::FixCommitted, &TaskStatus::FixReleased]);
    }

    #[test]
    fn test_importance_defaults() {
        let hidden: Vec<_> = Importance::ALL.iter().filter(|i| !i.shown_by_default()).collect();
        assert_eq!(hidden, vec![&Importance::Low, &Importance::Wishlist]);
        assert_eq!(Importance::from_str("Wishlist"), Some(Importance::Wishlist));
        assert_eq!(Importance::from_str("Unknown"), None);
    }

    #[test]
    fn test_bug_deserializes_collector_json() {
        let json = r#"{
            "id": 1234,
            "title": "juju status hangs",
            "web_link": "https://bugs.launchpad.net/juju-core/+bug/1234",
            "tags": ["status"],
            "tasks": [
                {"milestone": "2.0"},
                {"status": "New", "importance": "High", "milestone": "3.0",
                 "assignee_link": null, "milestone_link": "https://api/+milestone/3.0"}
            ]
        }"#;
        let bug: Bug = serde_json::from_str(json).unwrap();
        assert_eq!(bug.id, Some(1234));
        assert_eq!(bug.tasks.len(), 2);
        assert!(!bug.tasks[0].is_classified());
        assert_eq!(bug.tasks[1].status.as_deref(), Some("New"));
        assert!(bug.tasks[1].assignee_link.is_none());
        assert!(!bug.private);
    }
}
