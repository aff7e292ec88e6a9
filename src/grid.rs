/// DataGrid Grid
///
/// A `Grid` is what a list panel owns for its lifetime: the current record
/// snapshot, the column schema, the view state and the configuration. The
/// panel renders `grid.view()` and wires its controls to the setters.
///
/// The grid keeps `page` inside `[1, page_count]` after every change, so a
/// shrinking result (a narrower search, a fresh snapshot with fewer rows)
/// moves the page back instead of showing an empty page.
///
/// # Memoization
///
/// The filtered and sorted row order is cached, keyed on a generation counter
/// that moves with every snapshot or schema swap plus the order-affecting
/// parts of the view state. Paging and projection are cheap and recomputed on
/// every call. Results are the same as `derive()` with or without the cache.
///
/// # Examples
///
/// ```
/// use datagrid::{CellValue, Column, Grid, GridConfig, Schema};
///
/// #[derive(Debug, PartialEq)]
/// struct Job {
///     id: String,
///     kind: &'static str,
///     status: &'static str,
/// }
///
/// let schema = Schema::new(vec![
///     Column::new("kind", "Type", |j: &Job| CellValue::from(j.kind)).sortable(),
///     Column::new("status", "Status", |j: &Job| CellValue::from(j.status)).sortable(),
/// ])
/// .with_field("id", |j: &Job| CellValue::from(&j.id));
///
/// let config = GridConfig::default().with_filter_key("status").with_row_key("id");
/// let mut grid = Grid::new(schema, config);
///
/// grid.set_records(vec![
///     Job { id: "j-1".into(), kind: "provision", status: "running" },
///     Job { id: "j-2".into(), kind: "diagnose", status: "failed" },
///     Job { id: "j-3".into(), kind: "scale", status: "running" },
/// ]);
///
/// grid.set_filter_value(Some("running".into()));
/// grid.set_sort_column("kind").unwrap();
///
/// let view = grid.view();
/// assert_eq!(view.total_filtered, 2);
/// assert_eq!(view.rows[0].id, "j-1");
/// ```

use crate::column::Schema;
use crate::config::GridConfig;
use crate::error::GridError;
use crate::locator::{locate_row, RowRevealer};
use crate::pager::page_count;
use crate::state::{SortDirection, ViewState};
use crate::view::{assemble, ordered_indices, DerivedView};
use log::{debug, trace, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// One choice for the categorical filter selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// What to show when no rows match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Callback for a clicked/activated row
pub type RowAction<T> = Box<dyn FnMut(&T)>;

/// Everything the cached row order depends on
#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderKey {
    generation: u64,
    search_term: String,
    filter_key: Option<String>,
    filter_value: Option<String>,
    sort_column: Option<String>,
    sort_direction: SortDirection,
}

impl OrderKey {
    fn new(generation: u64, state: &ViewState) -> Self {
        OrderKey {
            generation,
            search_term: state.search_term().to_string(),
            filter_key: state.filter_key().map(str::to_string),
            filter_value: state.filter_value().map(str::to_string),
            sort_column: state.sort_column().map(str::to_string),
            sort_direction: state.sort_direction(),
        }
    }
}

struct OrderCache {
    key: OrderKey,
    order: Rc<Vec<usize>>,
}

pub struct Grid<T> {
    records: Vec<T>,
    schema: Schema<T>,
    state: ViewState,
    config: GridConfig,
    /// Bumped whenever records or schema are replaced
    generation: u64,
    cache: RefCell<Option<OrderCache>>,
    revealer: Option<Box<dyn RowRevealer>>,
    row_action: Option<RowAction<T>>,
}

impl<T> Grid<T> {
    pub fn new(schema: Schema<T>, config: GridConfig) -> Self {
        if let Some(key) = config.filter_key.as_deref() {
            if !schema.has_field(key) {
                warn!("Filter key '{}' is not a field of the schema", key);
            }
        }
        if let Some(key) = config.row_key.as_deref() {
            if !schema.has_field(key) {
                warn!("Row key '{}' is not a field of the schema", key);
            }
        }
        let state = ViewState::new(&schema, &config);
        Grid {
            records: Vec::new(),
            schema,
            state,
            config,
            generation: 0,
            cache: RefCell::new(None),
            revealer: None,
            row_action: None,
        }
    }

    /// Install the adapter `locate_row` reveals rows through.
    pub fn with_revealer(mut self, revealer: impl RowRevealer + 'static) -> Self {
        self.revealer = Some(Box::new(revealer));
        self
    }

    /// Install the callback `activate_row` invokes.
    pub fn with_row_action<F>(mut self, action: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.row_action = Some(Box::new(action));
        self
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Number of records in the snapshot, before search and filter.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn schema(&self) -> &Schema<T> {
        &self.schema
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the snapshot (e.g. after a re-fetch). The view state is kept;
    /// only the page is clamped if the result shrank.
    pub fn set_records(&mut self, records: Vec<T>) {
        debug!(
            "Replacing snapshot: {} -> {} records",
            self.records.len(),
            records.len()
        );
        self.records = records;
        self.generation += 1;
        self.clamp_page();
    }

    /// Swap the schema. Visibility, sort and filter are pruned to it, and
    /// columns it adds are shown if the configured defaults include them.
    pub fn set_schema(&mut self, schema: Schema<T>) {
        debug!("Replacing schema with {} columns", schema.len());
        let previous = std::mem::replace(&mut self.schema, schema);
        self.generation += 1;
        self.state
            .adopt_schema(&previous, &self.schema, &self.config.default_visible_columns);
        self.clamp_page();
    }

    /// The current page, ready to render
    pub fn view(&self) -> DerivedView<'_, T> {
        let order = self.ordered();
        assemble(&self.records, &self.schema, &self.state, &order)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if self.state.set_search_term(term) {
            self.clamp_page();
        }
    }

    pub fn set_filter_value(&mut self, value: Option<String>) {
        if self.state.set_filter_value(value) {
            self.clamp_page();
        }
    }

    pub fn set_filter_key(&mut self, key: Option<String>) -> Result<(), GridError> {
        if let Some(k) = key.as_deref() {
            if !self.schema.has_field(k) {
                warn!("Rejected filter key '{}'", k);
                return Err(GridError::unknown_column(k));
            }
        }
        if self.state.set_filter_key(key) {
            self.clamp_page();
        }
        Ok(())
    }

    /// Header click: toggle direction on the active column, otherwise sort
    /// the new column ascending.
    pub fn set_sort_column(&mut self, key: &str) -> Result<(), GridError> {
        self.check_sortable(key)?;
        self.state.select_sort_column(key);
        Ok(())
    }

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> Result<(), GridError> {
        self.check_sortable(key)?;
        self.state.set_sort(Some(key.to_string()), direction);
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.state.clear_sort();
    }

    /// Go to a page; out-of-range requests are clamped.
    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.state.page().saturating_sub(1));
    }

    /// Rejects zero; the previous page size stays in effect.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), GridError> {
        if let Err(err) = self.state.set_page_size(page_size) {
            warn!("{}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Toggle a column's visibility. Returns whether it is visible afterwards.
    pub fn toggle_column(&mut self, key: &str) -> Result<bool, GridError> {
        self.state.toggle_column(&self.schema, key)
    }

    pub fn is_column_visible(&self, key: &str) -> bool {
        self.state.visible_columns().is_visible(key)
    }

    /// Reveal the row with this key if it is on the current page.
    ///
    /// Never changes the page or any other state. Returns the row's position
    /// on the page when found.
    pub fn locate_row(&mut self, key: Option<&str>) -> Option<usize> {
        let Some(key_field) = self.config.row_key.as_deref() else {
            warn!("locate_row called without a configured row key");
            return None;
        };
        if !self.schema.has_field(key_field) {
            warn!("Row key '{}' is not a field of the schema, nothing to locate", key_field);
            return None;
        }
        let view = assemble(&self.records, &self.schema, &self.state, &self.ordered());
        match self.revealer.as_mut() {
            Some(revealer) => locate_row(&view, &self.schema, key_field, key, revealer.as_mut()),
            None => {
                let mut ignore = |_: &str, _: usize| {};
                locate_row(&view, &self.schema, key_field, key, &mut ignore)
            }
        }
    }

    /// Run the row action for the row at `position` on the current page.
    /// Returns false if there is no such row or no action.
    pub fn activate_row(&mut self, position: usize) -> bool {
        let order = self.ordered();
        let window = crate::pager::page_window(self.state.page(), self.state.page_size(), order.len());
        let Some(&index) = order[window].get(position) else {
            return false;
        };
        match self.row_action.as_mut() {
            Some(action) => {
                action(&self.records[index]);
                true
            }
            None => false,
        }
    }

    /// Distinct values of the filter field over the whole snapshot, in the
    /// order they first appear.
    pub fn filter_options(&self) -> Vec<FilterOption> {
        let Some(key) = self.state.filter_key() else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|record| self.schema.field_value(record, key))
            .filter(|value| !value.is_null())
            .map(|value| value.search_text())
            .filter(|text| !text.is_empty() && seen.insert(text.clone()))
            .map(|value| FilterOption {
                label: capitalize(&value),
                value,
            })
            .collect()
    }

    /// Title and description for an empty result, or `None` if rows match.
    pub fn empty_state(&self) -> Option<EmptyState<'_>> {
        if !self.ordered().is_empty() {
            return None;
        }
        let description = if self.records.is_empty() {
            &self.config.empty_state_description
        } else {
            &self.config.empty_state_filtered_description
        };
        Some(EmptyState {
            title: &self.config.empty_state_title,
            description,
        })
    }

    fn check_sortable(&self, key: &str) -> Result<(), GridError> {
        match self.schema.column(key) {
            None => {
                warn!("Rejected sort on unknown column '{}'", key);
                Err(GridError::unknown_column(key))
            }
            Some(column) if !column.is_sortable() => {
                warn!("Rejected sort on non-sortable column '{}'", key);
                Err(GridError::not_sortable(key))
            }
            Some(_) => Ok(()),
        }
    }

    fn clamp_page(&mut self) {
        let total = self.ordered().len();
        self.state.clamp_page(page_count(total, self.state.page_size()));
    }

    /// Filtered and sorted record positions, from cache when still valid.
    fn ordered(&self) -> Rc<Vec<usize>> {
        let key = OrderKey::new(self.generation, &self.state);
        if let Some(cache) = self.cache.borrow().as_ref() {
            if cache.key == key {
                trace!("Row order cache hit");
                return Rc::clone(&cache.order);
            }
        }

        let order = Rc::new(ordered_indices(&self.records, &self.schema, &self.state));
        *self.cache.borrow_mut() = Some(OrderCache {
            key,
            order: Rc::clone(&order),
        });
        order
    }
}

impl<T> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("records", &self.records.len())
            .field("schema", &self.schema)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
