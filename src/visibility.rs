/// Column Visibility
///
/// The set of column keys currently shown. Projection always walks the
/// schema in order and keeps the visible keys, so the order in which
/// columns were toggled never matters. An empty set is allowed.

use crate::config::DefaultColumns;
use log::warn;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnVisibility {
    visible: BTreeSet<String>,
}

impl ColumnVisibility {
    /// Every given key visible
    pub fn all<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        ColumnVisibility {
            visible: keys.into_iter().map(str::to_string).collect(),
        }
    }

    /// Initial visibility from configuration. Configured keys that are not
    /// in `keys` are dropped.
    pub fn from_defaults(keys: &[&str], defaults: &DefaultColumns) -> Self {
        match defaults {
            DefaultColumns::All => Self::all(keys.iter().copied()),
            DefaultColumns::Only(wanted) => {
                let visible = wanted
                    .iter()
                    .filter(|key| {
                        let known = keys.contains(&key.as_str());
                        if !known {
                            warn!("Default visible column '{}' not in schema, ignoring", key);
                        }
                        known
                    })
                    .cloned()
                    .collect();
                ColumnVisibility { visible }
            }
        }
    }

    /// Flip one key. Returns whether the key is visible afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.visible.remove(key) {
            false
        } else {
            self.visible.insert(key.to_string());
            true
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    /// Drop keys that are no longer part of the schema.
    pub fn retain_known(&mut self, keys: &[&str]) {
        self.visible.retain(|key| keys.contains(&key.as_str()));
    }

    /// Follow a schema change from `previous` to `keys`: removed keys are
    /// dropped, and keys new to the schema start visible if `defaults`
    /// would have shown them. Keys present in both keep their current
    /// visibility.
    pub fn adopt(&mut self, previous: &[&str], keys: &[&str], defaults: &DefaultColumns) {
        self.retain_known(keys);
        for key in keys.iter().filter(|key| !previous.contains(key)) {
            let shown = match defaults {
                DefaultColumns::All => true,
                DefaultColumns::Only(wanted) => wanted.iter().any(|w| w == key),
            };
            if shown {
                self.visible.insert(key.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 3] = ["name", "status", "region"];

    #[test]
    fn test_defaults_to_all() {
        let vis = ColumnVisibility::from_defaults(&KEYS, &DefaultColumns::All);
        assert_eq!(vis.len(), 3);
        assert!(KEYS.iter().all(|k| vis.is_visible(k)));
    }

    #[test]
    fn test_defaults_subset_drops_unknown() {
        let vis = ColumnVisibility::from_defaults(
            &KEYS,
            &DefaultColumns::Only(vec!["name".into(), "ghost".into()]),
        );
        assert_eq!(vis.iter().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut vis = ColumnVisibility::all(KEYS);
        let before = vis.clone();
        assert!(!vis.toggle("status"));
        assert!(!vis.is_visible("status"));
        assert!(vis.toggle("status"));
        assert_eq!(vis, before);
    }

    #[test]
    fn test_last_column_can_be_hidden() {
        let mut vis = ColumnVisibility::all(["name"]);
        vis.toggle("name");
        assert!(vis.is_empty());
    }

    #[test]
    fn test_adopt_shows_new_columns_under_all() {
        let mut vis = ColumnVisibility::all(KEYS);
        vis.toggle("status");
        vis.adopt(&KEYS, &["name", "status", "size"], &DefaultColumns::All);
        assert!(vis.is_visible("size"));
        assert!(!vis.is_visible("status"));
        assert!(!vis.is_visible("region"));
    }

    #[test]
    fn test_adopt_respects_configured_subset() {
        let defaults = DefaultColumns::Only(vec!["name".into(), "size".into()]);
        let mut vis = ColumnVisibility::from_defaults(&KEYS, &defaults);
        vis.adopt(&KEYS, &["name", "size", "owner"], &defaults);
        assert_eq!(vis.iter().collect::<Vec<_>>(), vec!["name", "size"]);
    }

    #[test]
    fn test_retain_known() {
        let mut vis = ColumnVisibility::all(KEYS);
        vis.retain_known(&["name", "region"]);
        assert!(!vis.is_visible("status"));
        assert_eq!(vis.len(), 2);
    }
}
