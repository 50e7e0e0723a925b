//! The list coordinator.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::completion::{Applied, Completion, MutationKind};
use super::state::ListState;
use super::{DELETE_FAILED, FETCH_FAILED, SAVE_FAILED};
use crate::api::ProductApi;
use crate::domain::{
    CreateProductData, FilterCriteria, ListQuery, Product, ProductId, UpdateProductData,
};
use crate::error::RequestError;

/// Orchestrates fetching, paging and writing products.
///
/// Every fetch gets a sequence number. Only the completion carrying the
/// most recently issued number is applied; earlier ones are dropped as
/// [`Applied::Stale`], so a slow response can never overwrite a newer one.
///
/// Writes never touch the listing directly. A successful write issues
/// exactly one [`ListCoordinator::refresh`] and the listing is re-derived
/// from the backend.
#[derive(Debug)]
pub struct ListCoordinator<A> {
    api: Arc<A>,
    state: ListState,
    criteria: FilterCriteria,
    last_issued: u64,
    has_loaded: bool,
    in_flight: usize,
    pending_writes: usize,
    completions: mpsc::UnboundedSender<Completion>,
}

impl<A: ProductApi> ListCoordinator<A> {
    /// Creates a coordinator and the receiver its completions arrive on.
    ///
    /// Nothing is fetched until [`ListCoordinator::refresh`] is called.
    #[must_use]
    pub fn new(api: Arc<A>, page_size: u64) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completions, rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            api,
            state: ListState::new(page_size),
            criteria: FilterCriteria::default(),
            last_issued: 0,
            has_loaded: false,
            in_flight: 0,
            pending_writes: 0,
            completions,
        };
        (coordinator, rx)
    }

    /// Current listing state.
    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Criteria the listing is currently fetched with.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// API the coordinator talks to.
    #[must_use]
    pub const fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Number of API calls whose completion has not been applied yet.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Query for the current criteria and page.
    #[must_use]
    pub fn current_query(&self) -> ListQuery {
        let pagination = self.state.pagination();
        ListQuery {
            criteria: self.criteria.clone(),
            limit: pagination.page_size(),
            offset: pagination.offset(),
        }
    }

    /// Issues a fetch for the current criteria and page.
    ///
    /// Returns the sequence number assigned to the fetch.
    pub fn refresh(&mut self) -> u64 {
        self.last_issued += 1;
        let seq = self.last_issued;
        let query = self.current_query();
        self.state.begin_fetch(!self.has_loaded);
        tracing::debug!(
            seq,
            page = self.state.current_page(),
            offset = query.offset,
            "refreshing product list"
        );

        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.list_products(&query).await;
            Completion::Fetch { seq, result }
        });
        seq
    }

    /// Adopts newly published criteria: back to page 1, then refresh.
    pub fn on_filter_criteria_changed(&mut self, criteria: FilterCriteria) {
        tracing::debug!(?criteria, "filter criteria changed");
        self.criteria = criteria;
        self.state.pagination_mut().reset();
        self.refresh();
    }

    /// Moves to `page` and refreshes.
    ///
    /// Pages outside `1..=total_pages` are ignored and `false` is
    /// returned; no request is issued.
    pub fn on_page_changed(&mut self, page: u64) -> bool {
        let filtered_count = self.state.filtered_count();
        if !self.state.pagination_mut().go_to(page, filtered_count) {
            tracing::debug!(page, filtered_count, "ignoring out-of-range page");
            return false;
        }
        self.refresh();
        true
    }

    /// Moves one page forward, if there is one.
    pub fn next_page(&mut self) -> bool {
        self.on_page_changed(self.state.current_page().saturating_add(1))
    }

    /// Moves one page back, if there is one.
    pub fn previous_page(&mut self) -> bool {
        self.on_page_changed(self.state.current_page().saturating_sub(1))
    }

    /// Creates a product; refreshes once it is stored.
    pub fn create(&mut self, data: CreateProductData) {
        let api = Arc::clone(&self.api);
        self.spawn_write(MutationKind::Create, async move {
            api.create_product(&data).await.map(Some)
        });
    }

    /// Applies a partial update; refreshes once it is stored.
    pub fn update(&mut self, id: ProductId, data: UpdateProductData) {
        let api = Arc::clone(&self.api);
        self.spawn_write(MutationKind::Update(id), async move {
            api.update_product(id, &data).await.map(Some)
        });
    }

    /// Deletes a product; refreshes once it is gone.
    ///
    /// If this empties the current page the coordinator stays on it; the
    /// refresh simply returns an empty page.
    pub fn delete(&mut self, id: ProductId) {
        let api = Arc::clone(&self.api);
        self.spawn_write(MutationKind::Delete(id), async move {
            api.delete_product(id).await.map(|()| None)
        });
    }

    /// Clears the error banner.
    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    /// Applies a finished API call to the state.
    pub fn apply(&mut self, completion: Completion) -> Applied {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Fetch { seq, result } => {
                if seq != self.last_issued {
                    tracing::debug!(seq, latest = self.last_issued, "discarding stale response");
                    return Applied::Stale;
                }
                match result {
                    Ok(page) => {
                        tracing::debug!(
                            seq,
                            products = page.products().len(),
                            filtered_count = page.filtered_count(),
                            total_count = page.total_count(),
                            "product list loaded"
                        );
                        self.state.finish_fetch(page);
                        self.has_loaded = true;
                        Applied::Loaded
                    }
                    Err(err) => {
                        tracing::warn!(seq, error = %err, "failed to fetch products");
                        self.state.fail_fetch(FETCH_FAILED);
                        Applied::LoadFailed
                    }
                }
            }
            Completion::Mutation { kind, result } => {
                self.pending_writes = self.pending_writes.saturating_sub(1);
                self.state.set_saving(self.pending_writes > 0);
                match result {
                    Ok(product) => {
                        tracing::info!(%kind, "product saved");
                        self.refresh();
                        Applied::Mutated { kind, product }
                    }
                    Err(err) => {
                        tracing::warn!(%kind, error = %err, "product write failed");
                        let message = match kind {
                            MutationKind::Delete(_) => DELETE_FAILED,
                            MutationKind::Create | MutationKind::Update(_) => SAVE_FAILED,
                        };
                        self.state.set_error(message);
                        Applied::MutationFailed(kind)
                    }
                }
            }
        }
    }

    fn spawn_write<F>(&mut self, kind: MutationKind, call: F)
    where
        F: Future<Output = Result<Option<Product>, RequestError>> + Send + 'static,
    {
        tracing::debug!(%kind, "issuing product write");
        self.pending_writes += 1;
        self.state.set_saving(true);
        self.spawn(async move {
            let result = call.await;
            Completion::Mutation { kind, result }
        });
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.in_flight += 1;
        let completions = self.completions.clone();
        tokio::spawn(async move {
            // A closed receiver means the session is gone; drop the result.
            let _ = completions.send(task.await);
        });
    }
}
