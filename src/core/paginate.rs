//! Pagination stage of the view pipeline

use serde::Serialize;

/// Number of pages needed for `count` items, never less than 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    // Ensure page_size is at least 1 to avoid division by zero
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

/// Pagination metadata for the visible page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1, clamped to `total_pages`)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Compute metadata, clamping `page` into `[1, total_pages]`
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total, page_size);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index range of this page within the ordered collection
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }
}

/// A contiguous, bounded slice of an ordered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    pub meta: PaginationMeta,
}

/// Slice one page out of `items`
///
/// `page_index` is 1-based and clamped to the available pages, so the slice
/// is empty only when `items` is.
pub fn paginate<T>(items: &[T], page_size: usize, page_index: usize) -> PageSlice<'_, T> {
    let meta = PaginationMeta::new(page_index, page_size, items.len());
    PageSlice {
        items: &items[meta.range()],
        meta,
    }
}
