//! Presentation layer: intents in, text frames out.
//!
//! - [`intent`] parses command lines into [`Intent`]s.
//! - [`form`] holds the UI-local create/edit draft.
//! - [`viewmodel`] derives a [`ViewModel`] from state.
//! - [`render`] formats view models as plain text.

pub mod form;
pub mod intent;
pub mod render;
pub mod viewmodel;

pub use form::{FormError, FormField, ProductForm, Submission};
pub use intent::{HELP, Intent, IntentError};
pub use render::{LowStockView, ProductDetail, SearchResultsView};
pub use viewmodel::ViewModel;

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::viewmodel::{BodyView, PageView};
    use super::*;
    use crate::coordinator::{FETCH_FAILED, ListCoordinator};
    use crate::domain::{FilterCriteria, StockLevel};
    use crate::testing::{MemoryCatalog, settle};

    async fn loaded(count: u64) -> ListCoordinator<MemoryCatalog> {
        let (mut coord, mut rx) = ListCoordinator::new(Arc::new(MemoryCatalog::with_products(count)), 12);
        coord.refresh();
        settle(&mut coord, &mut rx).await;
        coord
    }

    fn page(view: ViewModel) -> PageView {
        let ViewModel::Page(page) = view else {
            panic!("expected a page view");
        };
        page
    }

    #[tokio::test]
    async fn spinner_only_before_first_load() {
        let (mut coord, _rx) = ListCoordinator::new(Arc::new(MemoryCatalog::with_products(3)), 12);
        coord.refresh();
        let view = ViewModel::build(coord.state(), &FilterCriteria::default(), None);
        assert_eq!(view, ViewModel::Loading);
        assert_eq!(view.to_string(), "Loading products...\n");
    }

    #[tokio::test]
    async fn first_page_of_three() {
        let coord = loaded(30).await;
        let view = page(ViewModel::build(coord.state(), &FilterCriteria::default(), None));

        assert_eq!(view.header.summary, "30 products");
        assert!(!view.refreshing);
        let BodyView::Grid { cards, pagination } = &view.body else {
            panic!("expected a grid");
        };
        assert_eq!(cards.len(), 12);
        let Some(pagination) = pagination else {
            panic!("three pages need a pagination bar");
        };
        assert_eq!(pagination.summary, "Showing 1 to 12 of 30 results");
        assert!(!pagination.previous_enabled);
        assert!(pagination.next_enabled);
        let numbers: Vec<u64> = pagination.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(pagination.pages.first().is_some_and(|p| p.current));

        let text = ViewModel::Page(view).to_string();
        assert!(text.contains("Products  (30 products)"));
        assert!(text.contains("  ---- [1] 2 3 next >"));
    }

    #[tokio::test]
    async fn single_page_has_no_pagination() {
        let coord = loaded(5).await;
        let view = page(ViewModel::build(coord.state(), &FilterCriteria::default(), None));
        assert!(matches!(view.body, BodyView::Grid { pagination: None, .. }));
    }

    #[tokio::test]
    async fn cards_describe_stock() {
        let coord = loaded(15).await;
        let view = page(ViewModel::build(coord.state(), &FilterCriteria::default(), None));
        let BodyView::Grid { cards, .. } = view.body else {
            panic!("expected a grid");
        };
        let Some(card) = cards.iter().find(|c| c.id.get() == 12) else {
            panic!("product 12 on first page");
        };
        assert_eq!(card.stock_text, "12 in stock");
        assert_eq!(card.stock_level, StockLevel::InStock);
        assert_eq!(card.price, "$12.00");
    }

    #[tokio::test]
    async fn empty_state_depends_on_filters() {
        let coord = loaded(0).await;
        let view = page(ViewModel::build(coord.state(), &FilterCriteria::default(), None));
        let BodyView::Empty(empty) = &view.body else {
            panic!("expected empty state");
        };
        assert!(empty.offer_create);
        assert_eq!(empty.hint, "Get started by adding your first product.");

        let criteria = FilterCriteria {
            search: Some("zzz".to_string()),
            ..FilterCriteria::default()
        };
        let view = page(ViewModel::build(coord.state(), &criteria, None));
        let BodyView::Empty(empty) = &view.body else {
            panic!("expected empty state");
        };
        assert!(!empty.offer_create);
        assert_eq!(empty.hint, "Try adjusting your filters or search terms.");
        assert!(view.filters.show_clear);
    }

    #[tokio::test]
    async fn error_banner_and_form_are_shown() {
        let api = Arc::new(MemoryCatalog::with_products(3));
        let (mut coord, mut rx) = ListCoordinator::new(Arc::clone(&api), 12);
        coord.refresh();
        settle(&mut coord, &mut rx).await;
        api.set_fail_list(true);
        coord.refresh();
        settle(&mut coord, &mut rx).await;

        let mut form = ProductForm::create();
        form.set(FormField::Name, "Lamp");
        let view = page(ViewModel::build(coord.state(), &FilterCriteria::default(), Some(&form)));
        assert_eq!(view.error_banner.as_deref(), Some(FETCH_FAILED));
        assert!(matches!(view.body, BodyView::Grid { ref cards, .. } if cards.len() == 3));

        let text = ViewModel::Page(view).to_string();
        assert!(text.contains("== Add New Product =="));
        assert!(text.contains("  name         Lamp"));
    }

    #[tokio::test]
    async fn filtered_summary_shows_both_counts() {
        let api = Arc::new(MemoryCatalog::with_products(30));
        let (mut coord, mut rx) = ListCoordinator::new(api, 12);
        let criteria = FilterCriteria {
            search: Some("Product 2".to_string()),
            ..FilterCriteria::default()
        };
        coord.on_filter_criteria_changed(criteria.clone());
        settle(&mut coord, &mut rx).await;
        let view = page(ViewModel::build(coord.state(), &criteria, None));
        assert_eq!(view.header.summary, "10 of 30 products");
    }
}
