//! Milestone catalog
//!
//! Turns the milestone list from project metadata into an ordered catalog with a
//! stable index per name. The catalog always ends with the synthetic
//! [`NONE_MILESTONE`] bucket, which collects tasks with an empty milestone and
//! tasks targeted at milestones the metadata does not know about.

use std::collections::HashMap;

/// Name of the catch-all milestone bucket.
pub const NONE_MILESTONE: &str = "none";

#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneCatalog {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl MilestoneCatalog {
    /// Build a catalog from milestone names in display order.
    ///
    /// The source is expected to be deduplicated already. If it is not, the
    /// first occurrence of a name keeps its position and `"none"` is always
    /// moved to the end.
    pub fn build<S: AsRef<str>>(names: &[S]) -> Self {
        let mut catalog = Self {
            names: Vec::with_capacity(names.len() + 1),
            index: HashMap::with_capacity(names.len() + 1),
        };

        for name in names {
            let name = name.as_ref();
            if name == NONE_MILESTONE || catalog.index.contains_key(name) {
                log::debug!("Dropping repeated milestone '{}' from catalog", name);
                continue;
            }
            catalog.push(name);
        }
        catalog.push(NONE_MILESTONE);
        catalog
    }

    fn push(&mut self, name: &str) {
        self.index.insert(name.to_string(), self.names.len());
        self.names.push(name.to_string());
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names in catalog order, `"none"` last.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Never true: the `"none"` bucket is always present.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MilestoneCatalog {
    fn default() -> Self {
        Self::build::<&str>(&[])
    }
}

/// Build a catalog from the metadata milestone list.
pub fn build_catalog<S: AsRef<str>>(names: &[S]) -> MilestoneCatalog {
    MilestoneCatalog::build(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_appends_none() {
        let catalog = build_catalog(&["2.0", "3.0"]);
        assert_eq!(catalog.names(), &["2.0", "3.0", "none"]);
        assert_eq!(catalog.index_of("2.0"), Some(0));
        assert_eq!(catalog.index_of("3.0"), Some(1));
        assert_eq!(catalog.index_of("none"), Some(2));
        assert_eq!(catalog.index_of("1.25"), None);
    }

    #[test]
    fn test_empty_input_yields_only_none() {
        let catalog = build_catalog::<&str>(&[]);
        assert_eq!(catalog.names(), &["none"]);
        assert_eq!(catalog.index_of(NONE_MILESTONE), Some(0));
        assert_eq!(catalog, MilestoneCatalog::default());
    }

    #[test]
    fn test_none_stays_last_and_unique() {
        let catalog = build_catalog(&["none", "2.0", "2.0", "3.0"]);
        assert_eq!(catalog.names(), &["2.0", "3.0", "none"]);
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_indices_match_positions() {
        let names: Vec<String> = (0..10).map(|i| format!("1.{}", i)).collect();
        let catalog = build_catalog(&names);
        for (position, name) in catalog.names().iter().enumerate() {
            assert_eq!(catalog.index_of(name), Some(position));
        }
    }
}
