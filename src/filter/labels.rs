// Severity tiers for status and importance labels (display styling only)

use crate::models::{Importance, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelTier {
    None,
    Info,
    Primary,
    Success,
    Warning,
    Danger,
}

impl LabelTier {
    /// Bootstrap label class used by web renderers.
    pub fn css_class(&self) -> &'static str {
        match self {
            LabelTier::None => "",
            LabelTier::Info => "label-info",
            LabelTier::Primary => "label-primary",
            LabelTier::Success => "label-success",
            LabelTier::Warning => "label-warning",
            LabelTier::Danger => "label-danger",
        }
    }

    /// ANSI foreground color for terminal renderers.
    pub fn ansi_fg(&self) -> Option<&'static str> {
        match self {
            LabelTier::None => None,
            LabelTier::Info => Some("\x1b[36m"),
            LabelTier::Primary => Some("\x1b[34m"),
            LabelTier::Success => Some("\x1b[32m"),
            LabelTier::Warning => Some("\x1b[33m"),
            LabelTier::Danger => Some("\x1b[31m"),
        }
    }
}

pub fn importance_tier(importance: Importance) -> LabelTier {
    match importance {
        Importance::Undecided => LabelTier::None,
        Importance::Critical => LabelTier::Danger,
        Importance::High => LabelTier::Warning,
        Importance::Medium => LabelTier::Success,
        Importance::Low => LabelTier::Primary,
        Importance::Wishlist => LabelTier::Info,
    }
}

pub fn status_tier(status: TaskStatus) -> LabelTier {
    match status {
        TaskStatus::Invalid | TaskStatus::WontFix => LabelTier::None,
        TaskStatus::New => LabelTier::Danger,
        TaskStatus::Triaged => LabelTier::Warning,
        TaskStatus::FixCommitted | TaskStatus::FixReleased => LabelTier::Success,
        TaskStatus::Opinion => LabelTier::Primary,
        TaskStatus::InProgress => LabelTier::Info,
    }
}

/// Tier for a raw importance value; unknown or missing values get no tier.
pub fn importance_label(importance: Option<&str>) -> LabelTier {
    importance
        .and_then(Importance::from_str)
        .map(importance_tier)
        .unwrap_or(LabelTier::None)
}

/// Tier for a raw status value; unknown or missing values get no tier.
pub fn status_label(status: Option<&str>) -> LabelTier {
    status
        .and_then(TaskStatus::from_str)
        .map(status_tier)
        .unwrap_or(LabelTier::None)
}
