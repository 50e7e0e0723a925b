//! In-memory product service for unit tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::api::ProductApi;
use crate::coordinator::{Applied, Completion, ListCoordinator};
use crate::domain::{
    CreateProductData, ListQuery, LowStockReport, Product, ProductId, ProductPage, SearchResults,
    SortBy, UpdateProductData,
};
use crate::error::RequestError;

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    next_id: u64,
    list_calls: Vec<ListQuery>,
    write_calls: usize,
    fail_list: bool,
    fail_writes: bool,
    list_delays: VecDeque<Duration>,
    lookup_delay: Option<Duration>,
}

/// Catalog double implementing the listing semantics of the real backend.
#[derive(Debug, Default)]
pub(crate) struct MemoryCatalog {
    inner: Mutex<Inner>,
}

pub(crate) fn product(id: u64, name: &str, price: i64, stock: u32) -> Product {
    let created_at = Utc
        .timestamp_opt(1_700_000_000 + i64::try_from(id).unwrap_or(0) * 60, 0)
        .single()
        .unwrap_or_default();
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Decimal::new(price, 2),
        description: format!("{name} description"),
        stock,
        created_at,
        updated_at: created_at,
    }
}

impl MemoryCatalog {
    pub(crate) fn with_products(count: u64) -> Self {
        let products = (1..=count)
            .map(|id| product(id, &format!("Product {id:02}"), 100 * i64::try_from(id).unwrap_or(0), u32::try_from(id % 15).unwrap_or(0)))
            .collect();
        Self::from_products(products)
    }

    pub(crate) fn from_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                products,
                next_id,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn list_calls(&self) -> Vec<ListQuery> {
        self.lock().list_calls.clone()
    }

    pub(crate) fn write_calls(&self) -> usize {
        self.lock().write_calls
    }

    pub(crate) fn set_fail_list(&self, fail: bool) {
        self.lock().fail_list = fail;
    }

    pub(crate) fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Delays for upcoming list calls, consumed in call order.
    pub(crate) fn push_list_delay(&self, delay: Duration) {
        self.lock().list_delays.push_back(delay);
    }

    /// Delay applied to every quick search.
    pub(crate) fn set_lookup_delay(&self, delay: Duration) {
        self.lock().lookup_delay = Some(delay);
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().products.len()
    }

    fn server_error() -> RequestError {
        RequestError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "internal error".to_string(),
        }
    }

    fn not_found() -> RequestError {
        RequestError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        }
    }

    fn matching(products: &[Product], query: &ListQuery) -> Vec<Product> {
        let criteria = &query.criteria;
        let needle = criteria.search_text().map(str::to_lowercase);
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|p| {
                needle.as_ref().is_none_or(|n| {
                    p.name.to_lowercase().contains(n) || p.description.to_lowercase().contains(n)
                })
            })
            .filter(|p| criteria.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| criteria.max_price.is_none_or(|max| p.price <= max))
            .filter(|p| criteria.in_stock != Some(true) || p.stock > 0)
            .cloned()
            .collect();
        match criteria.sort_by {
            Some(SortBy::PriceAsc) => matching.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(SortBy::PriceDesc) => matching.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(SortBy::Newest) => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Some(SortBy::Name) | None => matching.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        matching
    }
}

impl ProductApi for MemoryCatalog {
    async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, RequestError> {
        let delay = {
            let mut inner = self.lock();
            inner.list_calls.push(query.clone());
            inner.list_delays.pop_front()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let inner = self.lock();
        if inner.fail_list {
            return Err(Self::server_error());
        }
        let matching = Self::matching(&inner.products, query);
        let filtered_count = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .collect();
        ProductPage::new(page, inner.products.len() as u64, filtered_count)
            .map_err(|err| RequestError::Decode(err.to_string()))
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, RequestError> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_product(&self, data: &CreateProductData) -> Result<Product, RequestError> {
        let mut inner = self.lock();
        inner.write_calls += 1;
        if inner.fail_writes {
            return Err(Self::server_error());
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let mut created = product(id, &data.name, 0, data.stock);
        created.price = data.price;
        created.description.clone_from(&data.description);
        inner.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        data: &UpdateProductData,
    ) -> Result<Product, RequestError> {
        let mut inner = self.lock();
        inner.write_calls += 1;
        if inner.fail_writes {
            return Err(Self::server_error());
        }
        let existing = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;
        if let Some(name) = &data.name {
            existing.name.clone_from(name);
        }
        if let Some(price) = data.price {
            existing.price = price;
        }
        if let Some(description) = &data.description {
            existing.description.clone_from(description);
        }
        if let Some(stock) = data.stock {
            existing.stock = stock;
        }
        Ok(existing.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RequestError> {
        let mut inner = self.lock();
        inner.write_calls += 1;
        if inner.fail_writes {
            return Err(Self::server_error());
        }
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        if inner.products.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn search_products(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<SearchResults, RequestError> {
        let delay = self.lock().lookup_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let inner = self.lock();
        let list = ListQuery {
            criteria: crate::domain::FilterCriteria {
                search: Some(query.to_string()),
                ..Default::default()
            },
            limit: limit.map_or(u64::MAX, u64::from),
            offset: 0,
        };
        let products: Vec<Product> = Self::matching(&inner.products, &list)
            .into_iter()
            .take(usize::try_from(list.limit).unwrap_or(usize::MAX))
            .collect();
        Ok(SearchResults {
            count: products.len() as u64,
            products,
            query: query.to_string(),
        })
    }

    async fn low_stock_products(
        &self,
        threshold: Option<u32>,
    ) -> Result<LowStockReport, RequestError> {
        let threshold = threshold.unwrap_or(10);
        let products: Vec<Product> = self
            .lock()
            .products
            .iter()
            .filter(|p| p.stock <= threshold)
            .cloned()
            .collect();
        Ok(LowStockReport {
            count: products.len() as u64,
            products,
            threshold,
        })
    }
}

/// Applies completions until nothing is in flight.
pub(crate) async fn settle<A: ProductApi>(
    coordinator: &mut ListCoordinator<A>,
    completions: &mut mpsc::UnboundedReceiver<Completion>,
) -> Vec<Applied> {
    let mut applied = Vec::new();
    while coordinator.in_flight() > 0 {
        let Some(completion) = completions.recv().await else {
            break;
        };
        applied.push(coordinator.apply(completion));
    }
    applied
}
