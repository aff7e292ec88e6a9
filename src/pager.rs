/// Pager
///
/// Pages are 1-based. An empty row set still has one (empty) page, and a
/// requested page past the end is clamped to the last page.

use crate::config::DEFAULT_PAGE_SIZE;
use log::warn;
use std::ops::Range;

/// One page of rows plus where it sits in the whole sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, R> {
    pub rows: &'a [R],
    pub page_count: usize,
    pub clamped_page: usize,
}

/// `ceil(total / page_size)`, and 1 for an empty set.
pub fn page_count(total: usize, page_size: usize) -> usize {
    let page_size = usable_page_size(page_size);
    total.div_ceil(page_size).max(1)
}

/// `min(max(1, requested), max(1, page_count))`
pub fn clamp_page(requested: usize, page_count: usize) -> usize {
    requested.max(1).min(page_count.max(1))
}

/// Index range of a page inside a sequence of `total` rows.
pub fn page_window(page: usize, page_size: usize, total: usize) -> Range<usize> {
    let page_size = usable_page_size(page_size);
    let page = clamp_page(page, page_count(total, page_size));
    let start = ((page - 1) * page_size).min(total);
    let end = (start + page_size).min(total);
    start..end
}

pub fn paginate<R>(rows: &[R], page: usize, page_size: usize) -> Page<'_, R> {
    let page_size = usable_page_size(page_size);
    let page_count = page_count(rows.len(), page_size);
    let clamped_page = clamp_page(page, page_count);
    Page {
        rows: &rows[page_window(clamped_page, page_size, rows.len())],
        page_count,
        clamped_page,
    }
}

fn usable_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        warn!("Page size 0 is invalid, using default {}", DEFAULT_PAGE_SIZE);
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(20, 10), 2);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(0, 10), 1);
    }

    #[test]
    fn test_last_page_is_partial() {
        let rows: Vec<u32> = (0..25).collect();
        let page = paginate(&rows, 3, 10);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.clamped_page, 3);
        assert_eq!(page.rows, &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_requested_page_clamped() {
        let rows: Vec<u32> = (0..8).collect();
        let page = paginate(&rows, 2, 10);
        assert_eq!(page.clamped_page, 1);
        assert_eq!(page.rows.len(), 8);

        let page = paginate(&rows, 0, 5);
        assert_eq!(page.clamped_page, 1);
        assert_eq!(page.rows, &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_rows_have_one_page() {
        let rows: Vec<u32> = Vec::new();
        let page = paginate(&rows, 4, 10);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.clamped_page, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_zero_page_size_uses_default() {
        let rows: Vec<u32> = (0..30).collect();
        let page = paginate(&rows, 1, 0);
        assert_eq!(page.rows.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(2, 10, 15), 10..15);
        assert_eq!(page_window(9, 10, 15), 10..15);
        assert_eq!(page_window(1, 10, 0), 0..0);
    }
}
