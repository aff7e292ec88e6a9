/// DataGrid Cell Values
///
/// A `CellValue` is what a column accessor reads out of a record. The engine
/// never looks at records directly; search, filtering and sorting all work on
/// cell values.
///
/// # Ordering
///
/// Sorting needs a total order even when a column mixes types across
/// records (a status that is sometimes missing, a size that is sometimes a
/// number and sometimes a string). Every value is normalised to a sort key
/// with a fixed rank:
///
/// `Null < Bool < Number < Instant < Text`
///
/// Integers and floats share the Number rank. Timestamps and text that
/// parses as an ISO-8601 date share the Instant rank, so `"2024-03-01"` and a
/// `DateTime<Utc>` for the same instant compare equal. Keys of different
/// ranks compare by rank.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A single value produced by a column accessor
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The instant this value denotes, for timestamps and date-like text.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Timestamp(v) => Some(*v),
            CellValue::Text(v) => parse_instant(v),
            _ => None,
        }
    }

    /// Text the free-text search runs against. Null coerces to "".
    pub fn search_text(&self) -> String {
        self.to_string()
    }

    pub(crate) fn sort_key(&self) -> SortKey {
        SortKey::from(self)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
            CellValue::Timestamp(v) => f.write_str(&v.to_rfc3339()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<u64> for CellValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(n) => CellValue::Int(n),
            Err(_) => CellValue::Float(v as f64),
        }
    }
}

impl From<usize> for CellValue {
    fn from(v: usize) -> Self {
        CellValue::from(v as u64)
    }
}

impl From<f32> for CellValue {
    fn from(v: f32) -> Self {
        CellValue::Float(v as f64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(v: &String) -> Self {
        CellValue::Text(v.clone())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::Timestamp(v)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Parse ISO-8601 date-like text into an instant.
///
/// Accepts RFC 3339 with an offset, naive date-times with `T` or a space
/// separator (read as UTC), and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let bytes = text.as_bytes();
    // Cheap shape check before handing anything to chrono
    if bytes.len() < 10 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Compare two cell values under the engine's total order.
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

/// Normalised, owned form of a cell value used while sorting.
#[derive(Debug, Clone)]
pub(crate) enum SortKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Instant(DateTime<Utc>),
    Text { folded: String, raw: String },
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Int(_) | SortKey::Float(_) => 2,
            SortKey::Instant(_) => 3,
            SortKey::Text { .. } => 4,
        }
    }

    pub(crate) fn is_null(&self) -> bool {
        matches!(self, SortKey::Null)
    }
}

impl From<&CellValue> for SortKey {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Null => SortKey::Null,
            CellValue::Bool(v) => SortKey::Bool(*v),
            CellValue::Int(v) => SortKey::Int(*v),
            CellValue::Float(v) => SortKey::Float(*v),
            CellValue::Timestamp(v) => SortKey::Instant(*v),
            CellValue::Text(v) => match parse_instant(v) {
                Some(instant) => SortKey::Instant(instant),
                None => SortKey::Text {
                    folded: v.to_lowercase(),
                    raw: v.clone(),
                },
            },
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Ordering::Equal,
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => compare_floats(*a, *b),
            (SortKey::Int(a), SortKey::Float(b)) => compare_int_float(*a, *b),
            (SortKey::Float(a), SortKey::Int(b)) => compare_int_float(*b, *a).reverse(),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (
                SortKey::Text { folded: fa, raw: ra },
                SortKey::Text { folded: fb, raw: rb },
            ) => fa.cmp(fb).then_with(|| ra.cmp(rb)),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// `total_cmp`, except that `-0.0` and `0.0` are equal (as they are to `Int(0)`).
fn compare_floats(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Exact comparison of an integer with a float, without rounding the integer.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        // Matches where total_cmp puts NaN relative to every finite value
        return if f.is_sign_negative() { Ordering::Greater } else { Ordering::Less };
    }
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    let fraction = f - whole;
    i.cmp(&(whole as i64)).then_with(|| {
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}
