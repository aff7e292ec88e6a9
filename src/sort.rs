/// Sort Engine
///
/// Orders rows by one column using the total order of `CellValue`
/// (see `value.rs`). Each row's sort key is computed once, then the rows are
/// sorted with a stable sort, so rows with equal keys keep the order they
/// came in with, in both directions.

use crate::column::Schema;
use crate::state::SortDirection;
use crate::value::SortKey;
use log::{debug, trace};
use std::cmp::Ordering;

/// Sort rows by `column`. No column, or a column the schema does not have,
/// returns the rows unchanged.
pub fn sort<'a, T>(
    rows: Vec<&'a T>,
    schema: &Schema<T>,
    column: Option<&str>,
    direction: SortDirection,
) -> Vec<&'a T> {
    let Some(key) = column else {
        return rows;
    };
    let Some(column) = schema.column(key) else {
        debug!("Sort column '{}' not in schema, keeping input order", key);
        return rows;
    };
    sort_keyed(
        rows,
        |row: &&T| column.value(row).sort_key(),
        direction,
        column.sorts_nulls_last(),
    )
}

/// Same as `sort`, over positions into `records`.
pub(crate) fn sort_indices<T>(
    records: &[T],
    indices: Vec<usize>,
    schema: &Schema<T>,
    column: Option<&str>,
    direction: SortDirection,
) -> Vec<usize> {
    let Some(key) = column else {
        return indices;
    };
    let Some(column) = schema.column(key) else {
        debug!("Sort column '{}' not in schema, keeping input order", key);
        return indices;
    };
    sort_keyed(
        indices,
        |&i: &usize| column.value(&records[i]).sort_key(),
        direction,
        column.sorts_nulls_last(),
    )
}

fn sort_keyed<R, F>(items: Vec<R>, key_of: F, direction: SortDirection, nulls_last: bool) -> Vec<R>
where
    F: Fn(&R) -> SortKey,
{
    trace!("Sorting {} rows {:?}", items.len(), direction);
    let mut keyed: Vec<(SortKey, R)> = items.into_iter().map(|item| (key_of(&item), item)).collect();
    // Vec::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, direction, nulls_last));
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection, nulls_last: bool) -> Ordering {
    if nulls_last {
        match (a.is_null(), b.is_null()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
    }
    let ordering = a.cmp(b);
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::value::CellValue;

    #[derive(Debug)]
    struct Job {
        name: &'static str,
        seq: u32,
        progress: Option<i64>,
        created: &'static str,
    }

    fn job(name: &'static str, seq: u32, progress: Option<i64>, created: &'static str) -> Job {
        Job { name, seq, progress, created }
    }

    fn schema(nulls_last: bool) -> Schema<Job> {
        let progress = Column::new("progress", "Progress", |j: &Job| CellValue::from(j.progress)).sortable();
        let progress = if nulls_last { progress.nulls_last() } else { progress };
        Schema::new(vec![
            Column::new("name", "Name", |j: &Job| CellValue::from(j.name)).sortable(),
            progress,
            Column::new("created", "Created", |j: &Job| CellValue::from(j.created)).sortable(),
        ])
    }

    fn seqs(rows: &[&Job]) -> Vec<u32> {
        rows.iter().map(|j| j.seq).collect()
    }

    #[test]
    fn test_no_column_keeps_order() {
        let jobs = vec![job("b", 1, None, ""), job("a", 2, None, "")];
        let rows = sort(jobs.iter().collect(), &schema(false), None, SortDirection::Desc);
        assert_eq!(seqs(&rows), vec![1, 2]);
    }

    #[test]
    fn test_unknown_column_keeps_order() {
        let jobs = vec![job("b", 1, None, ""), job("a", 2, None, "")];
        let rows = sort(jobs.iter().collect(), &schema(false), Some("region"), SortDirection::Asc);
        assert_eq!(seqs(&rows), vec![1, 2]);
    }

    #[test]
    fn test_stable_ascending() {
        let jobs = vec![job("beta", 2, None, ""), job("alpha", 1, None, ""), job("alpha", 3, None, "")];
        let rows = sort(jobs.iter().collect(), &schema(false), Some("name"), SortDirection::Asc);
        assert_eq!(seqs(&rows), vec![1, 3, 2]);
    }

    #[test]
    fn test_stable_descending() {
        let jobs = vec![job("alpha", 1, None, ""), job("beta", 2, None, ""), job("alpha", 3, None, "")];
        let rows = sort(jobs.iter().collect(), &schema(false), Some("name"), SortDirection::Desc);
        assert_eq!(seqs(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn test_numbers_not_lexicographic() {
        let jobs = vec![job("a", 1, Some(100), ""), job("b", 2, Some(9), ""), job("c", 3, Some(20), "")];
        let rows = sort(jobs.iter().collect(), &schema(false), Some("progress"), SortDirection::Asc);
        assert_eq!(seqs(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_null_is_lowest_by_default() {
        let jobs = vec![job("a", 1, Some(5), ""), job("b", 2, None, ""), job("c", 3, Some(1), "")];
        let asc = sort(jobs.iter().collect(), &schema(false), Some("progress"), SortDirection::Asc);
        assert_eq!(seqs(&asc), vec![2, 3, 1]);
        let desc = sort(jobs.iter().collect(), &schema(false), Some("progress"), SortDirection::Desc);
        assert_eq!(seqs(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn test_nulls_last_column() {
        let jobs = vec![job("a", 1, None, ""), job("b", 2, Some(5), ""), job("c", 3, Some(1), "")];
        let asc = sort(jobs.iter().collect(), &schema(true), Some("progress"), SortDirection::Asc);
        assert_eq!(seqs(&asc), vec![3, 2, 1]);
        let desc = sort(jobs.iter().collect(), &schema(true), Some("progress"), SortDirection::Desc);
        assert_eq!(seqs(&desc), vec![2, 3, 1]);
    }

    #[test]
    fn test_large_integers_sort_exactly() {
        let jobs = vec![
            job("a", 1, Some(9_007_199_254_740_993), ""),
            job("b", 2, Some(9_007_199_254_740_992), ""),
        ];
        let asc = sort(jobs.iter().collect(), &schema(false), Some("progress"), SortDirection::Asc);
        assert_eq!(seqs(&asc), vec![2, 1]);
        let desc = sort(jobs.iter().collect(), &schema(false), Some("progress"), SortDirection::Desc);
        assert_eq!(seqs(&desc), vec![1, 2]);
    }

    #[test]
    fn test_dates_sort_by_instant() {
        let jobs = vec![
            job("a", 1, None, "2024-03-01T10:00:00Z"),
            job("b", 2, None, "2024-02-28"),
            job("c", 3, None, "2024-03-01T09:00:00+02:00"),
        ];
        let rows = sort(jobs.iter().collect(), &schema(false), Some("created"), SortDirection::Asc);
        assert_eq!(seqs(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_indices_matches_sort() {
        let jobs = vec![job("c", 1, None, ""), job("a", 2, None, ""), job("b", 3, None, "")];
        let s = schema(false);
        let indices = sort_indices(&jobs, vec![0, 1, 2], &s, Some("name"), SortDirection::Asc);
        assert_eq!(indices, vec![1, 2, 0]);
    }
}
