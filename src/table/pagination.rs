//! Page-count derivation, clamping and the pagination controls.

use std::num::NonZeroUsize;

use crate::table::query::{PageQuery, QueryPatch};

/// `max(1, ceil(total_rows / page_size))`. Zero rows still yield one page.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// Clamps any requested page, including negative or huge ones, into
/// `[1, page_count]`.
pub fn clamp_page(requested: i64, page_count: usize) -> usize {
    let last = i64::try_from(page_count.max(1)).unwrap_or(i64::MAX);
    usize::try_from(requested.clamp(1, last)).unwrap_or(1)
}

fn as_request(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(i64::MAX)
}

/// Builds the numbered page window: edges plus a neighbourhood around the
/// current page, with `None` marking gaps.
fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Pagination state derived freshly from the URL and the row total.
///
/// Nothing here is stored between renders; every value is recomputed from
/// `(PageQuery, total_rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total_rows: usize,
    page_count: usize,
}

impl Pager {
    pub fn new(query: &PageQuery, total_rows: usize) -> Self {
        let page_size = query.page_size.max(1);
        let page_count = page_count(total_rows, page_size);
        Self {
            page: clamp_page(as_request(query.page), page_count),
            page_size,
            total_rows,
            page_count,
        }
    }

    /// Current 1-based page, already clamped.
    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.page - 1
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn go_to_page(&self, page: i64) -> QueryPatch {
        QueryPatch::new().page(clamp_page(page, self.page_count))
    }

    pub fn go_first(&self) -> QueryPatch {
        self.go_to_page(1)
    }

    pub fn go_last(&self) -> QueryPatch {
        self.go_to_page(as_request(self.page_count))
    }

    pub fn go_prev(&self) -> QueryPatch {
        self.go_to_page(as_request(self.page).saturating_sub(1))
    }

    pub fn go_next(&self) -> QueryPatch {
        self.go_to_page(as_request(self.page).saturating_add(1))
    }

    /// Changing the page size always lands on page 1.
    pub fn set_page_size(&self, page_size: NonZeroUsize) -> QueryPatch {
        QueryPatch::new().page_size(page_size.get()).page(1)
    }

    /// First/prev controls are enabled.
    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// Next/last controls are enabled.
    pub fn can_next(&self) -> bool {
        self.page < self.page_count
    }

    /// `Page X of Y • N results`.
    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} • {} results",
            self.page, self.page_count, self.total_rows
        )
    }

    pub fn pages(&self) -> Vec<Option<usize>> {
        page_window(self.page_count, self.page, 2, 2, 4, 2)
    }
}
