//! Paginated, filtered transfer history.

use serde::Serialize;

use crate::domain::Transfer;

/// One page of history rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPage<'a> {
    /// 1-based page number after clamping.
    pub page: usize,
    /// Always at least 1, even with no rows.
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: &'a [Transfer],
}

impl<'a> HistoryPage<'a> {
    /// Slice `transfers` into page `page` of `page_size` rows.
    ///
    /// Out-of-range page numbers clamp to the first or last page. A zero
    /// page size is treated as one.
    #[must_use]
    pub fn paginate(transfers: &'a [Transfer], page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_rows = transfers.len();
        let total_pages = total_rows.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);

        let start = ((page - 1) * page_size).min(total_rows);
        let end = (start + page_size).min(total_rows);

        Self {
            page,
            total_pages,
            total_rows,
            rows: &transfers[start..end],
        }
    }

    /// Page `page` as cut by the service, which reported `total` matching
    /// rows. A service that ignores paging sends every row; those are cut
    /// here instead.
    #[must_use]
    pub fn served(rows: &'a [Transfer], page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        if rows.len() > page_size {
            return Self::paginate(rows, page, page_size);
        }
        let total_rows = total.max(rows.len());
        let total_pages = total_rows.div_ceil(page_size).max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
            total_rows,
            rows,
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}
