//! View model computed from listing, filter and form state.
//!
//! [`ViewModel::build`] is a pure function: it reads state and produces
//! display-ready data (texts, enabled flags, page numbers). The renderer
//! only formats it.

use crate::coordinator::ListState;
use crate::domain::{FilterCriteria, Product, ProductId, StockLevel};

use super::form::{FormField, ProductForm};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    /// First load in progress with nothing to show yet.
    Loading,
    /// Regular page.
    Page(PageView),
}

/// Regular catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Title and product counts.
    pub header: HeaderView,
    /// Dismissible error banner.
    pub error_banner: Option<String>,
    /// Filter panel.
    pub filters: FilterPanelView,
    /// A later fetch is running over the shown products.
    pub refreshing: bool,
    /// Product grid or empty state.
    pub body: BodyView,
    /// Open create/edit form.
    pub form: Option<FormView>,
}

/// Page heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// Heading text.
    pub title: String,
    /// "N products" or "F of N products".
    pub summary: String,
}

/// Filter panel contents, mirroring the raw (not yet debounced) input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelView {
    /// Search text.
    pub search: String,
    /// Lower price bound.
    pub min_price: String,
    /// Upper price bound.
    pub max_price: String,
    /// In-stock-only checkbox.
    pub in_stock: bool,
    /// Sort selector label.
    pub sort_label: &'static str,
    /// Whether "clear all" is offered.
    pub show_clear: bool,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// Products of the current page.
    Grid {
        /// One card per product.
        cards: Vec<CardView>,
        /// Pagination bar, present when there is more than one page.
        pagination: Option<PaginationView>,
    },
    /// Nothing on this page.
    Empty(EmptyView),
}

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Product id.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Formatted price.
    pub price: String,
    /// Description.
    pub description: String,
    /// "N in stock" or "Out of stock".
    pub stock_text: String,
    /// Stock classification for colouring.
    pub stock_level: StockLevel,
}

impl From<&Product> for CardView {
    fn from(product: &Product) -> Self {
        let stock_text = if product.stock > 0 {
            format!("{} in stock", product.stock)
        } else {
            "Out of stock".to_string()
        };
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format!("${}", product.price),
            description: product.description.clone(),
            stock_text,
            stock_level: product.stock_level(),
        }
    }
}

/// Pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// "Showing S to E of F results".
    pub summary: String,
    /// Whether Previous is enabled.
    pub previous_enabled: bool,
    /// Whether Next is enabled.
    pub next_enabled: bool,
    /// Page number buttons.
    pub pages: Vec<PageButton>,
}

/// A page number button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    /// Page number.
    pub number: u64,
    /// Whether this is the current page.
    pub current: bool,
}

/// Empty-state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    /// Headline.
    pub message: String,
    /// Explanation.
    pub hint: String,
    /// Whether to offer creating the first product.
    pub offer_create: bool,
}

/// Open create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// "Add New Product" or "Edit Product".
    pub title: &'static str,
    /// Field labels and current text.
    pub fields: Vec<(FormField, String)>,
    /// A write is in flight.
    pub busy: bool,
    /// Validation message.
    pub error: Option<String>,
}

impl ViewModel {
    /// Builds the frame for the given state.
    #[must_use]
    pub fn build(
        list: &ListState,
        criteria: &FilterCriteria,
        form: Option<&ProductForm>,
    ) -> Self {
        if list.is_initial_loading() && list.products().is_empty() {
            return Self::Loading;
        }

        let total = list.total_count();
        let filtered = list.filtered_count();
        let summary = if filtered == total {
            format!("{total} products")
        } else {
            format!("{filtered} of {total} products")
        };

        let body = if list.products().is_empty() {
            let filtered_view = criteria.is_active();
            BodyView::Empty(EmptyView {
                message: "No products found".to_string(),
                hint: if filtered_view {
                    "Try adjusting your filters or search terms.".to_string()
                } else {
                    "Get started by adding your first product.".to_string()
                },
                offer_create: !filtered_view,
            })
        } else {
            BodyView::Grid {
                cards: list.products().iter().map(CardView::from).collect(),
                pagination: pagination_view(list),
            }
        };

        Self::Page(PageView {
            header: HeaderView {
                title: "Products".to_string(),
                summary,
            },
            error_banner: list.last_error().map(str::to_string),
            filters: filter_panel(criteria),
            refreshing: list.is_refreshing(),
            body,
            form: form.map(|form| form_view(form, list.is_saving())),
        })
    }
}

fn pagination_view(list: &ListState) -> Option<PaginationView> {
    let pagination = list.pagination();
    let filtered = list.filtered_count();
    if pagination.total_pages(filtered) <= 1 {
        return None;
    }
    let current = pagination.current_page();
    Some(PaginationView {
        summary: format!(
            "Showing {} to {} of {filtered} results",
            pagination.start_item(),
            pagination.end_item(filtered)
        ),
        previous_enabled: pagination.has_previous(),
        next_enabled: pagination.has_next(filtered),
        pages: pagination
            .window(filtered)
            .into_iter()
            .map(|number| PageButton {
                number,
                current: number == current,
            })
            .collect(),
    })
}

fn filter_panel(criteria: &FilterCriteria) -> FilterPanelView {
    let price = |value: Option<rust_decimal::Decimal>| value.map(|v| v.to_string()).unwrap_or_default();
    FilterPanelView {
        search: criteria.search.clone().unwrap_or_default(),
        min_price: price(criteria.min_price),
        max_price: price(criteria.max_price),
        in_stock: criteria.in_stock.unwrap_or(false),
        sort_label: criteria
            .sort_by
            .map_or("Default (Name A-Z)", |sort_by| sort_by.label()),
        show_clear: criteria.is_active(),
    }
}

fn form_view(form: &ProductForm, busy: bool) -> FormView {
    FormView {
        title: form.title(),
        fields: [
            FormField::Name,
            FormField::Price,
            FormField::Description,
            FormField::Stock,
        ]
        .into_iter()
        .map(|field| (field, form.value(field).to_string()))
        .collect(),
        busy,
        error: form.error().map(str::to_string),
    }
}
