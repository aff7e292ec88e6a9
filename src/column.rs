/// DataGrid Column Schema
///
/// A `Column` describes one displayed field of a record type `T`: how to read
/// its value, how to label and render it, and whether the grid may sort on
/// it. A `Schema` is the ordered list of columns for one panel, plus any
/// extra fields that should be searchable or filterable without being shown.
///
/// # Examples
///
/// ```
/// use datagrid::{CellValue, Column, Schema};
///
/// struct Cluster {
///     id: String,
///     name: String,
///     nodes: u32,
/// }
///
/// let schema = Schema::new(vec![
///     Column::new("name", "Name", |c: &Cluster| CellValue::from(&c.name)).sortable(),
///     Column::new("nodes", "Nodes", |c: &Cluster| CellValue::from(c.nodes))
///         .sortable()
///         .render_with(|value, _| format!("{} nodes", value)),
/// ])
/// .with_field("id", |c: &Cluster| CellValue::from(&c.id));
///
/// let cluster = Cluster { id: "c-1".into(), name: "prod".into(), nodes: 3 };
/// assert_eq!(schema.keys(), vec!["name", "nodes"]);
/// assert_eq!(schema.field_value(&cluster, "id"), CellValue::from("c-1"));
/// assert_eq!(schema.column("nodes").unwrap().render(&cluster).text, "3 nodes");
/// ```

use crate::value::CellValue;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Reads one value out of a record
pub type Accessor<T> = Rc<dyn Fn(&T) -> CellValue>;

/// Turns a raw value into display text
pub type CellRenderer<T> = Rc<dyn Fn(&CellValue, &T) -> String>;

/// Produces every value the free-text search should look at
pub type SearchSource<T> = Rc<dyn Fn(&T) -> Vec<CellValue>>;

/// One rendered cell of a projected row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    pub key: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

pub struct Column<T> {
    key: String,
    label: String,
    sortable: bool,
    nulls_last: bool,
    accessor: Accessor<T>,
    render: Option<CellRenderer<T>>,
    class_name: Option<String>,
}

impl<T> Column<T> {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + 'static,
    {
        Column {
            key: key.into(),
            label: label.into(),
            sortable: false,
            nulls_last: false,
            accessor: Rc::new(accessor),
            render: None,
            class_name: None,
        }
    }

    /// Allow the grid to sort on this column
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Keep null values after every non-null value in both sort directions.
    ///
    /// By default null is the lowest value, so it leads ascending sorts and
    /// trails descending ones.
    pub fn nulls_last(mut self) -> Self {
        self.nulls_last = true;
        self
    }

    /// Override how the value is displayed. Search and sort still use the
    /// raw value.
    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &T) -> String + 'static,
    {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn sorts_nulls_last(&self) -> bool {
        self.nulls_last
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Raw value of this column for a record
    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }

    pub fn render(&self, record: &T) -> RenderedCell {
        let value = self.value(record);
        let text = match &self.render {
            Some(render) => render(&value, record),
            None => value.to_string(),
        };
        RenderedCell {
            key: self.key.clone(),
            text,
            class_name: self.class_name.clone(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Column {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            nulls_last: self.nulls_last,
            accessor: Rc::clone(&self.accessor),
            render: self.render.clone(),
            class_name: self.class_name.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("nulls_last", &self.nulls_last)
            .field("render", &self.render.is_some())
            .field("class_name", &self.class_name)
            .finish()
    }
}

/// Ordered column definitions for a record type.
///
/// Keys are expected to be unique; lookups return the first match.
pub struct Schema<T> {
    columns: Vec<Column<T>>,
    /// Named accessors that are searchable/filterable but never displayed
    fields: Vec<(String, Accessor<T>)>,
    search_source: Option<SearchSource<T>>,
}

impl<T> Schema<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Schema {
            columns,
            fields: Vec::new(),
            search_source: None,
        }
    }

    /// Register a hidden field, e.g. an id used as the row key.
    pub fn with_field<F>(mut self, key: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + 'static,
    {
        self.fields.push((key.into(), Rc::new(accessor)));
        self
    }

    /// Replace the default search source (every column and field value).
    pub fn search_with<F>(mut self, source: F) -> Self
    where
        F: Fn(&T) -> Vec<CellValue> + 'static,
    {
        self.search_source = Some(Rc::new(source));
        self
    }

    /// Returns the number of displayed columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Keys of the displayed columns, in schema order.
    pub fn keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// True if `key` names a column or a hidden field.
    pub fn has_field(&self, key: &str) -> bool {
        self.column(key).is_some() || self.fields.iter().any(|(k, _)| k == key)
    }

    /// Value of a column or hidden field. Unknown keys read as `Null`.
    pub fn field_value(&self, record: &T, key: &str) -> CellValue {
        if let Some(column) = self.column(key) {
            return column.value(record);
        }
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, accessor)| accessor(record))
            .unwrap_or(CellValue::Null)
    }

    /// Every value the free-text search matches against.
    pub fn search_values(&self, record: &T) -> Vec<CellValue> {
        if let Some(source) = &self.search_source {
            return source(record);
        }
        self.columns
            .iter()
            .map(|c| c.value(record))
            .chain(self.fields.iter().map(|(_, accessor)| accessor(record)))
            .collect()
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Schema {
            columns: self.columns.clone(),
            fields: self.fields.clone(),
            search_source: self.search_source.clone(),
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("columns", &self.columns)
            .field("fields", &self.fields.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("custom_search", &self.search_source.is_some())
            .finish()
    }
}
