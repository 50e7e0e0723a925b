//! Page arithmetic for the product listing.

/// Number of page buttons shown at once in the pagination bar.
pub const PAGE_WINDOW: u64 = 5;

/// Current position within a paginated listing.
///
/// Pages are 1-based. The page size is fixed for the lifetime of the
/// listing; only the current page moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u64,
    page_size: u64,
}

impl Pagination {
    /// Creates pagination positioned on page 1. A zero page size is raised
    /// to 1.
    #[must_use]
    pub fn new(page_size: u64) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Moves back to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Moves to `page` if it lies in `1..=total_pages(filtered_count)`.
    ///
    /// Returns `false` and leaves the position untouched otherwise.
    pub fn go_to(&mut self, page: u64, filtered_count: u64) -> bool {
        if page == 0 || page > self.total_pages(filtered_count) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Request offset for the current page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.current_page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `filtered_count` items.
    #[must_use]
    pub const fn total_pages(&self, filtered_count: u64) -> u64 {
        filtered_count.div_ceil(self.page_size)
    }

    /// 1-based index of the first item on the current page.
    #[must_use]
    pub const fn start_item(&self) -> u64 {
        self.offset().saturating_add(1)
    }

    /// 1-based index of the last item on the current page.
    #[must_use]
    pub fn end_item(&self, filtered_count: u64) -> u64 {
        self.current_page
            .saturating_mul(self.page_size)
            .min(filtered_count)
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self, filtered_count: u64) -> bool {
        self.current_page < self.total_pages(filtered_count)
    }

    /// Page numbers for the button strip: up to [`PAGE_WINDOW`] consecutive
    /// pages, centred on the current page where possible.
    #[must_use]
    pub fn window(&self, filtered_count: u64) -> Vec<u64> {
        let total = self.total_pages(filtered_count);
        let len = total.min(PAGE_WINDOW);
        let first = total
            .saturating_sub(PAGE_WINDOW - 1)
            .min(self.current_page.saturating_sub(2))
            .max(1);
        (first..first + len).collect()
    }
}
