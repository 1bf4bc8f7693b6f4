use serde::{Deserialize, Serialize};

/// A user assigned to a kanban card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignedUser {
    #[serde(rename = "AssignedUserName", default)]
    pub assigned_user_name: String,
}

/// Kanban card as stored by the card collector.
///
/// The board itself is stored alongside its cards with `Board` set; it is a
/// container and never counts as anyone's card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "Board", default)]
    pub board: bool,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "BoardTitle", default)]
    pub board_title: String,
    #[serde(rename = "LaneTitle", default)]
    pub lane_title: String,
    #[serde(rename = "CardUrl", default, skip_serializing_if = "Option::is_none")]
    pub card_url: Option<String>,
    #[serde(rename = "AssignedUsers", default)]
    pub assigned_users: Vec<AssignedUser>,
}

impl Card {
    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.assigned_users.iter().any(|user| user.assigned_user_name == name)
    }
}
