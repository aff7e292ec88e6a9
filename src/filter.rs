/// Predicate Pipeline
///
/// Two conjunctive predicates over records:
///
/// - free-text search: some searchable value, coerced to text, contains the
///   search term ignoring case (an empty term matches everything)
/// - categorical filter: the filter field's text equals the filter value
///   exactly (no key or no value disables it)
///
/// Both are pure and keep the input order.

use crate::column::Schema;
use crate::state::ViewState;

/// Records matching the search term and categorical filter, in input order.
pub fn filter<'a, T>(records: &'a [T], schema: &Schema<T>, state: &ViewState) -> Vec<&'a T> {
    filter_indices(records, schema, state)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Positions of the matching records, in input order.
pub(crate) fn filter_indices<T>(records: &[T], schema: &Schema<T>, state: &ViewState) -> Vec<usize> {
    let needle = state.search_term().to_lowercase();
    let categorical = state.filter_key().zip(state.filter_value());

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_search(*record, schema, &needle))
        .filter(|(_, record)| match categorical {
            Some((key, value)) => matches_filter(*record, schema, key, value),
            None => true,
        })
        .map(|(i, _)| i)
        .collect()
}

/// `needle` must already be lower-cased.
pub fn matches_search<T>(record: &T, schema: &Schema<T>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    schema
        .search_values(record)
        .iter()
        .any(|value| value.search_text().to_lowercase().contains(needle))
}

pub fn matches_filter<T>(record: &T, schema: &Schema<T>, key: &str, value: &str) -> bool {
    schema.field_value(record, key).search_text() == value
}
