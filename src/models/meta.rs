use serde::{Deserialize, Serialize};

/// Project metadata document.
///
/// The metadata feed is a loose collection of documents. Two shapes matter:
/// `{"k": "details", "url": ..., "milestones": [...]}` describes one project and
/// `{"k": "list", "v": [urls]}` lists the known project URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<Vec<String>>,
}

impl ProjectMeta {
    pub fn details(url: &str, milestones: &[&str]) -> Self {
        Self {
            k: Some("details".to_string()),
            url: Some(url.to_string()),
            milestones: Some(milestones.iter().map(|m| m.to_string()).collect()),
            v: None,
        }
    }
}

/// Milestones of the project identified by `project_url`.
///
/// Returns `None` when no entry matches; the first matching entry wins.
pub fn find_project_milestones<'a>(entries: &'a [ProjectMeta], project_url: &str) -> Option<&'a [String]> {
    entries
        .iter()
        .find(|entry| entry.url.as_deref() == Some(project_url))
        .map(|entry| entry.milestones.as_deref().unwrap_or(&[]))
}
