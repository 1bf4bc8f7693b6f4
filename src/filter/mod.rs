//! Board filtering engine
//!
//! - [`catalog`] builds the milestone catalog from project metadata
//! - [`state`] holds the per-axis show flags
//! - [`evaluator`] decides task/bug visibility and milestone column layout
//! - [`labels`] maps status and importance to display tiers

pub mod catalog;
pub mod evaluator;
pub mod labels;
pub mod state;

pub use catalog::{build_catalog, MilestoneCatalog, NONE_MILESTONE};
pub use evaluator::{milestone_column_width_percent, my_cards_filter, BoardFilter};
pub use labels::{importance_label, status_label, LabelTier};
pub use state::{Axis, FilterError, FilterState};
