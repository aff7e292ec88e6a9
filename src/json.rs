/// JSON Records
///
/// Lets a grid run directly over `serde_json::Value` objects as returned by an
/// API, without declaring a record struct. Columns read a key, or a dotted
/// path such as `meta.region`, and a missing key reads as `Null`.
///
/// ```
/// use datagrid::{derive, Column, GridConfig, Schema, ViewState};
/// use serde_json::json;
///
/// let jobs = vec![
///     json!({"id": "j-1", "type": "provision", "meta": {"region": "nyc1"}}),
///     json!({"id": "j-2", "type": "scale", "meta": {"region": "sfo2"}}),
/// ];
/// let schema = Schema::new(vec![
///     Column::json("type", "Type").sortable(),
///     Column::json("meta.region", "Region"),
/// ])
/// .search_all_json_fields();
///
/// let mut state = ViewState::new(&schema, &GridConfig::default());
/// state.set_search_term("j-2");
/// let view = derive(&jobs, &schema, &state);
/// assert_eq!(view.rows[0]["type"], "scale");
/// ```

use crate::column::{Column, Schema};
use crate::value::CellValue;
use serde_json::Value;

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Null),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => CellValue::Text(s),
            other => CellValue::from(&other),
        }
    }
}

/// Resolve `path` in a JSON value. An exact top-level key wins over a dotted
/// walk; numeric segments index arrays.
pub fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    if let Some(found) = value.as_object().and_then(|obj| obj.get(path)) {
        return Some(found);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(obj) => obj.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Cell value at `path`, `Null` when absent.
pub fn field(value: &Value, path: &str) -> CellValue {
    lookup(value, path).map(CellValue::from).unwrap_or_default()
}

/// Every top-level value of an object; a non-object is its own single value.
pub fn all_fields(record: &Value) -> Vec<CellValue> {
    match record {
        Value::Object(obj) => obj.values().map(CellValue::from).collect(),
        other => vec![CellValue::from(other)],
    }
}

impl Column<Value> {
    /// Column reading `path` (a key or dotted path) from each object.
    pub fn json(path: impl Into<String>, label: impl Into<String>) -> Self {
        let path = path.into();
        let accessor_path = path.clone();
        Column::new(path, label, move |record: &Value| field(record, &accessor_path))
    }
}

impl Schema<Value> {
    /// Hidden field reading `path` from each object.
    pub fn with_json_field(self, path: impl Into<String>) -> Self {
        let path = path.into();
        let accessor_path = path.clone();
        self.with_field(path, move |record: &Value| field(record, &accessor_path))
    }

    /// Search every top-level value of each object, shown or not.
    pub fn search_all_json_fields(self) -> Self {
        self.search_with(all_fields)
    }
}
