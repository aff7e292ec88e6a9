/// Row Locator
///
/// Finds a row by key on the *current* page of a derived view and hands it to
/// a `RowRevealer`, the rendering-side adapter that scrolls to or highlights
/// it. A key that is filtered out or sits on another page is a no-op: the
/// locator never touches view state to bring a row into view.
///
/// ```
/// use datagrid::{derive, locate_row, CellValue, Column, GridConfig, Schema, ViewState};
///
/// let ids = vec!["a", "b", "c"];
/// let schema = Schema::new(vec![Column::new("id", "ID", |s: &&str| CellValue::from(*s))]);
/// let state = ViewState::new(&schema, &GridConfig::default());
/// let view = derive(&ids, &schema, &state);
///
/// let mut revealed = Vec::new();
/// let mut reveal = |key: &str, position: usize| revealed.push((key.to_string(), position));
/// assert_eq!(locate_row(&view, &schema, "id", Some("b"), &mut reveal), Some(1));
/// assert_eq!(locate_row(&view, &schema, "id", Some("zz"), &mut reveal), None);
/// assert_eq!(revealed, vec![("b".to_string(), 1)]);
/// ```

use crate::column::Schema;
use crate::view::DerivedView;
use log::trace;

/// Rendering-side adapter that brings a located row into view
pub trait RowRevealer {
    /// `position` is the row's index on the current page.
    fn reveal(&mut self, key: &str, position: usize);
}

impl<F> RowRevealer for F
where
    F: FnMut(&str, usize),
{
    fn reveal(&mut self, key: &str, position: usize) {
        self(key, position)
    }
}

/// Position of the row whose `key_field` text equals `key`, if it is on the
/// current page. Rows without a key value never match, and neither does an
/// empty key.
pub fn find_row<T>(view: &DerivedView<'_, T>, schema: &Schema<T>, key_field: &str, key: &str) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    view.rows.iter().position(|row| {
        let value = schema.field_value(row, key_field);
        !value.is_null() && value.search_text() == key
    })
}

/// Reveal the row for `key` if it is rendered. Returns its page position.
///
/// Calling this again for a row that is already visible reveals it again.
pub fn locate_row<T>(
    view: &DerivedView<'_, T>,
    schema: &Schema<T>,
    key_field: &str,
    key: Option<&str>,
    revealer: &mut dyn RowRevealer,
) -> Option<usize> {
    let key = key?;
    match find_row(view, schema, key_field, key) {
        Some(position) => {
            revealer.reveal(key, position);
            Some(position)
        }
        None => {
            trace!("Row '{}' not on the current page, nothing to reveal", key);
            None
        }
    }
}
