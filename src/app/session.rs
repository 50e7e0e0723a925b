//! Interactive session loop.
//!
//! Reads one command per line, feeds it to the filter state, the list
//! coordinator or the form, and writes a fresh frame whenever the listing
//! view changes.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, watch};

use crate::api::ProductApi;
use crate::config::AdminConfig;
use crate::coordinator::{Applied, ListCoordinator, MutationKind};
use crate::domain::{FilterCriteria, ProductId};
use crate::error::RequestError;
use crate::filters::{DEFAULT_DEBOUNCE, FilterState};
use crate::ui::{
    HELP, Intent, LowStockView, ProductDetail, ProductForm, SearchResultsView, Submission,
    ViewModel,
};

/// Session tuning taken from [`AdminConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Products per page.
    pub page_size: u64,
    /// Filter debounce window.
    pub debounce: Duration,
    /// Result cap passed to quick searches.
    pub search_limit: Option<u32>,
    /// Threshold used when `low-stock` is given none.
    pub low_stock_threshold: Option<u32>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            search_limit: None,
            low_stock_threshold: None,
        }
    }
}

impl From<&AdminConfig> for SessionOptions {
    fn from(config: &AdminConfig) -> Self {
        Self {
            page_size: config.page_size,
            debounce: config.debounce,
            search_limit: config.search_limit,
            low_stock_threshold: config.low_stock_threshold,
        }
    }
}

/// What the loop does after handling a line.
enum Flow {
    /// Draw the listing again.
    Redraw,
    /// Output was already written; nothing to redraw.
    Keep,
    /// Leave the session.
    Quit,
}

struct Session<A, W> {
    coordinator: ListCoordinator<A>,
    filters: FilterState,
    form: Option<ProductForm>,
    options: SessionOptions,
    output: W,
    lookups: mpsc::UnboundedSender<String>,
    pending_lookups: usize,
}

/// Runs an interactive session until `quit` or end of input.
///
/// On end of input the session keeps running until pending filter edits
/// are published and every in-flight request has been applied, so piped
/// scripts see the outcome of their last command.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails. API
/// failures are shown to the user and never end the session.
pub async fn run_session<A, R, W>(
    api: Arc<A>,
    options: SessionOptions,
    input: R,
    output: W,
) -> io::Result<()>
where
    A: ProductApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let filters = FilterState::new(options.debounce);
    let mut debounced = filters.subscribe();
    let (coordinator, mut completions) = ListCoordinator::new(api, options.page_size);
    let (lookups, mut lookup_results) = mpsc::unbounded_channel();
    let mut session = Session {
        coordinator,
        filters,
        form: None,
        options,
        output,
        lookups,
        pending_lookups: 0,
    };
    let mut lines = input.lines();
    let mut input_open = true;

    tracing::info!(page_size = options.page_size, "session started");
    session.coordinator.refresh();
    session.draw().await?;

    loop {
        if !input_open && session.is_settled(&debounced) {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => match session.handle_line(&line).await? {
                        Flow::Redraw => session.draw().await?,
                        Flow::Keep => {}
                        Flow::Quit => break,
                    },
                    None => {
                        tracing::debug!("end of input, waiting for pending work");
                        input_open = false;
                    }
                }
            }
            changed = debounced.changed() => {
                if changed.is_err() {
                    break;
                }
                let criteria = debounced.borrow_and_update().clone();
                session.coordinator.on_filter_criteria_changed(criteria);
                session.draw().await?;
            }
            Some(completion) = completions.recv() => {
                match session.coordinator.apply(completion) {
                    Applied::Stale => {}
                    Applied::Mutated { kind, .. } => {
                        if session.form.as_ref().is_some_and(|form| saved_by(form, kind)) {
                            session.form = None;
                        }
                        session.draw().await?;
                    }
                    Applied::Loaded | Applied::LoadFailed | Applied::MutationFailed(_) => {
                        session.draw().await?;
                    }
                }
            }
            Some(text) = lookup_results.recv() => {
                session.pending_lookups = session.pending_lookups.saturating_sub(1);
                session.write(&text).await?;
            }
        }
    }

    tracing::info!("session finished");
    session.output.flush().await
}

impl<A, W> Session<A, W>
where
    A: ProductApi,
    W: AsyncWrite + Unpin,
{
    fn is_settled(&self, debounced: &watch::Receiver<FilterCriteria>) -> bool {
        !self.filters.is_pending()
            && !debounced.has_changed().unwrap_or(false)
            && self.coordinator.in_flight() == 0
            && self.pending_lookups == 0
    }

    async fn draw(&mut self) -> io::Result<()> {
        let view = ViewModel::build(
            self.coordinator.state(),
            self.filters.criteria(),
            self.form.as_ref(),
        );
        self.write(&view.to_string()).await
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    async fn say(&mut self, line: &str) -> io::Result<()> {
        self.write(&format!("{line}\n")).await
    }

    async fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Keep);
        }
        match line.parse::<Intent>() {
            Ok(intent) => self.handle(intent).await,
            Err(err) => {
                self.say(&err.to_string()).await?;
                Ok(Flow::Keep)
            }
        }
    }

    async fn handle(&mut self, intent: Intent) -> io::Result<Flow> {
        tracing::trace!(?intent, "handling intent");
        match intent {
            Intent::Search(search) => self.filters.edit(|c| c.search = search),
            Intent::MinPrice(price) => self.filters.edit(|c| c.min_price = price),
            Intent::MaxPrice(price) => self.filters.edit(|c| c.max_price = price),
            Intent::InStock(only) => self.filters.edit(|c| c.in_stock = only.then_some(true)),
            Intent::Sort(sort_by) => self.filters.edit(|c| c.sort_by = sort_by),
            Intent::ClearFilters => self.filters.clear(),
            Intent::Page(page) => return self.go_to(page).await,
            Intent::NextPage => {
                let page = self.coordinator.state().current_page().saturating_add(1);
                return self.go_to(page).await;
            }
            Intent::PreviousPage => {
                let page = self.coordinator.state().current_page().saturating_sub(1);
                return self.go_to(page).await;
            }
            Intent::Refresh => {
                self.coordinator.refresh();
            }
            Intent::New => self.form = Some(ProductForm::create()),
            Intent::Edit(id) => return self.open_edit(id).await,
            Intent::Set(field, value) => match &mut self.form {
                Some(form) => form.set(field, value),
                None => return self.notice("No form is open; type `new` or `edit <id>`.").await,
            },
            Intent::Submit => return self.submit().await,
            Intent::Cancel => self.form = None,
            Intent::Delete(id) => self.coordinator.delete(id),
            Intent::DismissError => self.coordinator.dismiss_error(),
            Intent::Show(id) => {
                let api = Arc::clone(self.coordinator.api());
                self.spawn_lookup(async move {
                    match api.get_product(id).await {
                        Ok(product) => ProductDetail(&product).to_string(),
                        Err(err) if err.is_not_found() => format!("Product #{id} not found.\n"),
                        Err(err) => lookup_failed("product lookup", &err),
                    }
                });
                return Ok(Flow::Keep);
            }
            Intent::Find(text) => {
                let api = Arc::clone(self.coordinator.api());
                let limit = self.options.search_limit;
                self.spawn_lookup(async move {
                    match api.search_products(&text, limit).await {
                        Ok(results) => SearchResultsView(&results).to_string(),
                        Err(err) => lookup_failed("search", &err),
                    }
                });
                return Ok(Flow::Keep);
            }
            Intent::LowStock(threshold) => {
                let api = Arc::clone(self.coordinator.api());
                let threshold = threshold.or(self.options.low_stock_threshold);
                self.spawn_lookup(async move {
                    match api.low_stock_products(threshold).await {
                        Ok(report) => LowStockView(&report).to_string(),
                        Err(err) => lookup_failed("low-stock report", &err),
                    }
                });
                return Ok(Flow::Keep);
            }
            Intent::Help => return self.notice(HELP).await,
            Intent::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Redraw)
    }

    async fn notice(&mut self, text: &str) -> io::Result<Flow> {
        self.say(text).await?;
        Ok(Flow::Keep)
    }

    async fn go_to(&mut self, page: u64) -> io::Result<Flow> {
        if self.coordinator.on_page_changed(page) {
            return Ok(Flow::Redraw);
        }
        let total = self.coordinator.state().total_pages();
        self.notice(&format!("No page {page}; there are {total} page(s).")).await
    }

    async fn open_edit(&mut self, id: ProductId) -> io::Result<Flow> {
        let product = self
            .coordinator
            .state()
            .products()
            .iter()
            .find(|p| p.id == id)
            .cloned();
        match product {
            Some(product) => {
                self.form = Some(ProductForm::edit(product));
                Ok(Flow::Redraw)
            }
            None => self.notice(&format!("Product #{id} is not on this page.")).await,
        }
    }

    async fn submit(&mut self) -> io::Result<Flow> {
        if self.coordinator.state().is_saving() {
            return self.notice("Still saving; please wait.").await;
        }
        let Some(form) = &mut self.form else {
            return self.notice("No form is open; type `new` or `edit <id>`.").await;
        };
        match form.submit() {
            Ok(Submission::Create(data)) => self.coordinator.create(data),
            Ok(Submission::Update(id, data)) => self.coordinator.update(id, data),
            Err(err) => tracing::debug!(error = %err, "form rejected"),
        }
        Ok(Flow::Redraw)
    }

    /// Runs a read-only lookup off the loop; its text is printed when it
    /// arrives.
    fn spawn_lookup<F>(&mut self, lookup: F)
    where
        F: Future<Output = String> + Send + 'static,
    {
        self.pending_lookups += 1;
        let results = self.lookups.clone();
        tokio::spawn(async move {
            let _ = results.send(lookup.await);
        });
    }
}

/// Whether a successful write of `kind` is the one `form` submitted.
fn saved_by(form: &ProductForm, kind: MutationKind) -> bool {
    match kind {
        MutationKind::Create => form.editing().is_none(),
        MutationKind::Update(id) => form.editing().is_some_and(|product| product.id == id),
        MutationKind::Delete(_) => false,
    }
}

fn lookup_failed(what: &str, err: &RequestError) -> String {
    tracing::warn!(error = %err, "{what} failed");
    format!("The {what} failed. Please try again.\n")
}
