//! Observable state of the product listing.

use crate::domain::{Pagination, Product, ProductPage};

/// Everything the presentation layer reads about the listing.
///
/// Owned by [`super::ListCoordinator`]; only its transition methods
/// change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    products: Vec<Product>,
    total_count: u64,
    filtered_count: u64,
    pagination: Pagination,
    is_initial_loading: bool,
    is_refreshing: bool,
    is_saving: bool,
    last_error: Option<String>,
}

impl ListState {
    /// Empty listing positioned on page 1.
    #[must_use]
    pub fn new(page_size: u64) -> Self {
        Self {
            products: Vec::new(),
            total_count: 0,
            filtered_count: 0,
            pagination: Pagination::new(page_size),
            is_initial_loading: false,
            is_refreshing: false,
            is_saving: false,
            last_error: None,
        }
    }

    /// Products on the current page.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Catalog size ignoring filters.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of products matching the current filters.
    #[must_use]
    pub const fn filtered_count(&self) -> u64 {
        self.filtered_count
    }

    /// Current page position.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.pagination.current_page()
    }

    /// Number of pages for the current filtered count.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.pagination.total_pages(self.filtered_count)
    }

    /// First fetch is in flight and nothing has loaded yet.
    #[must_use]
    pub const fn is_initial_loading(&self) -> bool {
        self.is_initial_loading
    }

    /// A later fetch is in flight over already displayed data.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    /// A create, update or delete is in flight.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.is_saving
    }

    /// Message for the error banner, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(super) const fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    /// Marks a fetch as started.
    pub(super) const fn begin_fetch(&mut self, initial: bool) {
        if initial {
            self.is_initial_loading = true;
        } else {
            self.is_refreshing = true;
        }
    }

    /// Replaces the listing with `page` and ends loading.
    pub(super) fn finish_fetch(&mut self, page: ProductPage) {
        let (products, total_count, filtered_count) = page.into_parts();
        self.products = products;
        self.total_count = total_count;
        self.filtered_count = filtered_count;
        self.last_error = None;
        self.clear_loading();
    }

    /// Records a failed fetch, keeping the displayed listing.
    pub(super) fn fail_fetch(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
        self.clear_loading();
    }

    pub(super) fn set_error(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
    }

    pub(super) const fn set_saving(&mut self, saving: bool) {
        self.is_saving = saving;
    }

    /// Clears the error banner.
    pub(super) fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    const fn clear_loading(&mut self) {
        self.is_initial_loading = false;
        self.is_refreshing = false;
    }
}
