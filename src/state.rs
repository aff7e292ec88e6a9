/// View State
///
/// The only mutable input of the engine: search text, categorical filter,
/// sort column and direction, page, page size and visible columns. It
/// changes only through the setters below, which also apply the page-reset
/// rules:
///
/// - a new search term, filter key, filter value or page size sends the view
///   back to page 1
/// - selecting the active sort column flips the direction, selecting another
///   column sorts it ascending
///
/// Upper-bound clamping of `page` needs the filtered row count, so it is done
/// by whoever knows it (`Grid`, or `derive` for the page it reports).

use crate::column::Schema;
use crate::config::{DefaultColumns, GridConfig};
use crate::error::GridError;
use crate::visibility::ColumnVisibility;
use log::debug;
use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    search_term: String,
    filter_key: Option<String>,
    filter_value: Option<String>,
    sort_column: Option<String>,
    sort_direction: SortDirection,
    page: usize,
    page_size: usize,
    visible_columns: ColumnVisibility,
}

impl ViewState {
    /// Fresh state for a panel: no search, no filter value, unsorted, page 1.
    pub fn new<T>(schema: &Schema<T>, config: &GridConfig) -> Self {
        let keys = schema.keys();
        ViewState {
            search_term: String::new(),
            filter_key: config.filter_key.clone(),
            filter_value: None,
            sort_column: None,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: config.effective_page_size(),
            visible_columns: ColumnVisibility::from_defaults(&keys, &config.default_visible_columns),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter_key(&self) -> Option<&str> {
        self.filter_key.as_deref()
    }

    pub fn filter_value(&self) -> Option<&str> {
        self.filter_value.as_deref()
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Requested page (1-based). Always at least 1.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_columns(&self) -> &ColumnVisibility {
        &self.visible_columns
    }

    /// Returns true if the term changed (and the page was reset).
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        debug!("Search term changed to {:?}", term);
        self.search_term = term;
        self.page = 1;
        true
    }

    /// Set the field the categorical filter reads. `None` disables it.
    pub fn set_filter_key(&mut self, key: Option<String>) -> bool {
        if key == self.filter_key {
            return false;
        }
        debug!("Filter key changed to {:?}", key);
        self.filter_key = key;
        self.page = 1;
        true
    }

    /// Set the value the filter field must equal. `None` or `""` disables it.
    pub fn set_filter_value(&mut self, value: Option<String>) -> bool {
        let value = value.filter(|v| !v.is_empty());
        if value == self.filter_value {
            return false;
        }
        debug!("Filter value changed to {:?}", value);
        self.filter_value = value;
        self.page = 1;
        true
    }

    /// Header-click semantics: toggle the active column, otherwise switch to
    /// `key` ascending.
    pub fn select_sort_column(&mut self, key: &str) {
        if self.sort_column.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = Some(key.to_string());
            self.sort_direction = SortDirection::Asc;
        }
        debug!("Sorting by {} {:?}", key, self.sort_direction);
    }

    pub fn set_sort(&mut self, column: Option<String>, direction: SortDirection) {
        debug!("Sort set to {:?} {:?}", column, direction);
        self.sort_column = column;
        self.sort_direction = direction;
    }

    pub fn clear_sort(&mut self) {
        self.set_sort(None, SortDirection::Asc);
    }

    /// Store a requested page; 0 is treated as 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Reject non-positive sizes; the previous size is kept.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), GridError> {
        if page_size == 0 {
            return Err(GridError::invalid_page_size(page_size));
        }
        if page_size != self.page_size {
            debug!("Page size changed {} -> {}", self.page_size, page_size);
            self.page_size = page_size;
            self.page = 1;
        }
        Ok(())
    }

    /// Returns whether the column is visible afterwards. Keys the schema
    /// has no column for are rejected.
    pub fn toggle_column<T>(&mut self, schema: &Schema<T>, key: &str) -> Result<bool, GridError> {
        if schema.column(key).is_none() {
            return Err(GridError::unknown_column(key));
        }
        Ok(self.visible_columns.toggle(key))
    }

    /// Pull `page` back into `[1, page_count]`. Returns true if it moved.
    pub(crate) fn clamp_page(&mut self, page_count: usize) -> bool {
        let clamped = crate::pager::clamp_page(self.page, page_count);
        if clamped != self.page {
            debug!("Page {} out of range, clamped to {}", self.page, clamped);
            self.page = clamped;
            return true;
        }
        false
    }

    /// Move from `previous` to `schema`: references to columns and fields
    /// that are gone are dropped, new columns follow `defaults`.
    pub(crate) fn adopt_schema<T>(&mut self, previous: &Schema<T>, schema: &Schema<T>, defaults: &DefaultColumns) {
        self.visible_columns.adopt(&previous.keys(), &schema.keys(), defaults);

        if let Some(column) = self.sort_column.as_deref() {
            if schema.column(column).map_or(true, |c| !c.is_sortable()) {
                debug!("Sort column '{}' left the schema, clearing sort", column);
                self.clear_sort();
            }
        }
        if let Some(key) = self.filter_key.as_deref() {
            if !schema.has_field(key) {
                debug!("Filter key '{}' left the schema, clearing filter", key);
                self.filter_key = None;
                self.filter_value = None;
                self.page = 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::value::CellValue;

    fn state() -> ViewState {
        let schema: Schema<(String, i64)> = Schema::new(vec![
            Column::new("name", "Name", |r: &(String, i64)| CellValue::from(&r.0)).sortable(),
            Column::new("count", "Count", |r: &(String, i64)| CellValue::from(r.1)).sortable(),
        ]);
        ViewState::new(&schema, &GridConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert_eq!(s.search_term(), "");
        assert_eq!(s.filter_value(), None);
        assert_eq!(s.sort_column(), None);
        assert_eq!(s.page(), 1);
        assert_eq!(s.page_size(), 10);
        assert_eq!(s.visible_columns().len(), 2);
    }

    #[test]
    fn test_search_resets_page() {
        let mut s = state();
        s.set_page(3);
        assert!(s.set_search_term("prod"));
        assert_eq!(s.page(), 1);

        s.set_page(2);
        assert!(!s.set_search_term("prod"));
        assert_eq!(s.page(), 2);
    }

    #[test]
    fn test_filter_value_resets_page_and_empty_disables() {
        let mut s = state();
        s.set_page(4);
        assert!(s.set_filter_value(Some("active".into())));
        assert_eq!(s.page(), 1);

        s.set_page(2);
        assert!(s.set_filter_value(Some(String::new())));
        assert_eq!(s.filter_value(), None);
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn test_select_sort_toggles() {
        let mut s = state();
        s.select_sort_column("name");
        assert_eq!(s.sort_column(), Some("name"));
        assert_eq!(s.sort_direction(), SortDirection::Asc);

        s.select_sort_column("name");
        assert_eq!(s.sort_direction(), SortDirection::Desc);

        s.select_sort_column("count");
        assert_eq!(s.sort_column(), Some("count"));
        assert_eq!(s.sort_direction(), SortDirection::Asc);
    }

    #[test]
    fn test_sort_does_not_reset_page() {
        let mut s = state();
        s.set_page(2);
        s.select_sort_column("name");
        assert_eq!(s.page(), 2);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut s = state();
        s.set_page(2);
        s.set_page_size(20).unwrap();
        assert_eq!(s.page_size(), 20);
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn test_invalid_page_size_keeps_previous() {
        let mut s = state();
        s.set_page(2);
        assert!(s.set_page_size(0).is_err());
        assert_eq!(s.page_size(), 10);
        assert_eq!(s.page(), 2);
    }

    #[test]
    fn test_page_zero_is_one() {
        let mut s = state();
        s.set_page(0);
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn test_clamp_page() {
        let mut s = state();
        s.set_page(5);
        assert!(s.clamp_page(2));
        assert_eq!(s.page(), 2);
        assert!(!s.clamp_page(3));
        assert!(s.clamp_page(0));
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn test_toggle_rejects_unknown_column() {
        let schema: Schema<(String, i64)> = Schema::new(vec![
            Column::new("name", "Name", |r: &(String, i64)| CellValue::from(&r.0)),
        ]);
        let mut s = ViewState::new(&schema, &GridConfig::default());
        assert!(matches!(s.toggle_column(&schema, "ghost"), Err(GridError::UnknownColumn { .. })));
        assert!(!s.visible_columns().is_visible("ghost"));
        assert_eq!(s.toggle_column(&schema, "name").unwrap(), false);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), r#""desc""#);
    }
}
