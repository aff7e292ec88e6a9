/// DataGrid Configuration
///
/// Per-panel options for a grid. Everything has a default, so a panel only
/// spells out what it changes:
///
/// ```
/// use datagrid::{DefaultColumns, GridConfig};
///
/// let config = GridConfig::from_json(r#"{
///     "page_size": 25,
///     "default_visible_columns": ["name", "status"],
///     "filter_key": "status",
///     "search_placeholder": "Search droplets..."
/// }"#).unwrap();
///
/// assert_eq!(config.page_size, 25);
/// assert_eq!(config.page_size_options, vec![10, 25, 50, 100]);
/// assert_eq!(
///     config.default_visible_columns,
///     DefaultColumns::Only(vec!["name".into(), "status".into()])
/// );
/// ```

use crate::error::GridError;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Page size used when none (or an invalid one) is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which columns are visible when a grid is created
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawDefaultColumns")]
pub enum DefaultColumns {
    #[default]
    All,
    Only(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDefaultColumns {
    Keyword(String),
    Keys(Vec<String>),
}

impl TryFrom<RawDefaultColumns> for DefaultColumns {
    type Error = String;

    fn try_from(raw: RawDefaultColumns) -> Result<Self, Self::Error> {
        match raw {
            RawDefaultColumns::Keyword(word) if word.eq_ignore_ascii_case("all") => {
                Ok(DefaultColumns::All)
            }
            RawDefaultColumns::Keyword(word) => Err(format!(
                "expected \"all\" or a list of column keys, got \"{}\"",
                word
            )),
            RawDefaultColumns::Keys(keys) => Ok(DefaultColumns::Only(keys)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub default_visible_columns: DefaultColumns,
    /// Field the categorical filter compares against
    pub filter_key: Option<String>,
    /// Field whose text identifies a row for the row locator
    pub row_key: Option<String>,
    pub search_placeholder: String,
    pub empty_state_title: String,
    /// Shown when the snapshot itself is empty
    pub empty_state_description: String,
    /// Shown when records exist but search/filter hid all of them
    pub empty_state_filtered_description: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            default_visible_columns: DefaultColumns::All,
            filter_key: None,
            row_key: None,
            search_placeholder: "Search...".to_string(),
            empty_state_title: "No items found".to_string(),
            empty_state_description: "Get started by creating your first item.".to_string(),
            empty_state_filtered_description: "Try adjusting your search or filter criteria"
                .to_string(),
        }
    }
}

impl GridConfig {
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_filter_key(mut self, key: impl Into<String>) -> Self {
        self.filter_key = Some(key.into());
        self
    }

    pub fn with_row_key(mut self, key: impl Into<String>) -> Self {
        self.row_key = Some(key.into());
        self
    }

    pub fn with_visible_columns<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_visible_columns = DefaultColumns::Only(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Configured page size, or the default if the configured one is zero.
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            warn!(
                "Configured page size 0 is invalid, using default {}",
                DEFAULT_PAGE_SIZE
            );
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }

    /// Page size choices for the shell's selector, without zeros or duplicates.
    pub fn page_size_choices(&self) -> Vec<usize> {
        let mut choices: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|&size| size > 0)
            .collect();
        choices.sort_unstable();
        choices.dedup();
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.default_visible_columns, DefaultColumns::All);
        assert_eq!(config.search_placeholder, "Search...");
        assert_eq!(config.empty_state_title, "No items found");
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(GridConfig::from_json("{}").unwrap(), GridConfig::default());
    }

    #[test]
    fn test_all_keyword() {
        let config = GridConfig::from_json(r#"{"default_visible_columns": "all"}"#).unwrap();
        assert_eq!(config.default_visible_columns, DefaultColumns::All);
    }

    #[test]
    fn test_bad_keyword_rejected() {
        let err = GridConfig::from_json(r#"{"default_visible_columns": "some"}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_negative_page_size_rejected() {
        let err = GridConfig::from_json(r#"{"page_size": -3}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let config = GridConfig::default().with_page_size(0);
        assert_eq!(config.effective_page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_choices() {
        let config = GridConfig {
            page_size_options: vec![50, 0, 10, 50, 25],
            ..GridConfig::default()
        };
        assert_eq!(config.page_size_choices(), vec![10, 25, 50]);
    }

    #[test]
    fn test_missing_file() {
        let err = GridConfig::from_json_file("/nonexistent/grid.json").unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }
}
