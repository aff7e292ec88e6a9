/// DataGrid View Assembler
///
/// A derived view is what a panel renders: the rows of the current page and
/// the visible columns, plus the counts needed for a pager. It is computed
/// from `(records, schema, state)` alone, in a fixed order:
///
/// search -> categorical filter -> sort -> paginate -> column projection
///
/// Projection only decides which columns of the already selected rows are
/// shown; it never affects which rows are selected or their order.
///
/// # Examples
///
/// ```
/// use datagrid::{derive, CellValue, Column, GridConfig, Schema, ViewState};
///
/// let names = vec!["beta", "alpha", "gamma", "delta"];
/// let schema = Schema::new(vec![
///     Column::new("name", "Name", |n: &&str| CellValue::from(*n)).sortable(),
/// ]);
///
/// let mut state = ViewState::new(&schema, &GridConfig::default().with_page_size(3));
/// state.select_sort_column("name");
///
/// let view = derive(&names, &schema, &state);
/// assert_eq!(view.rows, vec![&"alpha", &"beta", &"delta"]);
/// assert_eq!(view.total_filtered, 4);
/// assert_eq!(view.page_count, 2);
/// ```

use crate::column::{Column, RenderedCell, Schema};
use crate::filter::filter_indices;
use crate::pager::paginate;
use crate::sort::sort_indices;
use crate::state::ViewState;
use log::trace;

/// Render-ready output of one derivation
#[derive(Debug)]
pub struct DerivedView<'a, T> {
    /// Rows on the current page, in display order
    pub rows: Vec<&'a T>,
    /// Visible columns, in schema order
    pub columns: Vec<&'a Column<T>>,
    /// Rows matching search and filter across all pages
    pub total_filtered: usize,
    pub page_count: usize,
    /// Page actually shown, after clamping
    pub page: usize,
    pub page_size: usize,
}

impl<'a, T> DerivedView<'a, T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key()).collect()
    }

    /// Projected, rendered cells for every row on the page
    pub fn cells(&self) -> Vec<Vec<RenderedCell>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(|c| c.render(row)).collect())
            .collect()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.page_count
    }
}

impl<T: PartialEq> PartialEq for DerivedView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.column_keys() == other.column_keys()
            && self.total_filtered == other.total_filtered
            && self.page_count == other.page_count
            && self.page == other.page
            && self.page_size == other.page_size
    }
}

/// Derive the view for `state` over `records`.
pub fn derive<'a, T>(records: &'a [T], schema: &'a Schema<T>, state: &ViewState) -> DerivedView<'a, T> {
    let order = ordered_indices(records, schema, state);
    assemble(records, schema, state, &order)
}

/// Filtered and sorted positions into `records`; the memoizable part of a
/// derivation.
pub(crate) fn ordered_indices<T>(records: &[T], schema: &Schema<T>, state: &ViewState) -> Vec<usize> {
    let matched = filter_indices(records, schema, state);
    sort_indices(records, matched, schema, state.sort_column(), state.sort_direction())
}

/// Paginate an already ordered index list and project columns.
pub(crate) fn assemble<'a, T>(
    records: &'a [T],
    schema: &'a Schema<T>,
    state: &ViewState,
    order: &[usize],
) -> DerivedView<'a, T> {
    let page = paginate(order, state.page(), state.page_size());
    let rows: Vec<&'a T> = page.rows.iter().map(|&i| &records[i]).collect();
    let columns: Vec<&'a Column<T>> = schema
        .columns()
        .iter()
        .filter(|c| state.visible_columns().is_visible(c.key()))
        .collect();

    trace!(
        "Derived page {}/{} with {} of {} matching rows",
        page.clamped_page,
        page.page_count,
        rows.len(),
        order.len()
    );

    DerivedView {
        rows,
        columns,
        total_filtered: order.len(),
        page_count: page.page_count,
        page: page.clamped_page,
        page_size: state.page_size(),
    }
}
