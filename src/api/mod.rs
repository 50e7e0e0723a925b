//! Product service client: the [`ProductApi`] capability set and its HTTP
//! implementation.
//!
//! Every call is a single-shot pass-through. Nothing is cached or retried;
//! failures come back as [`RequestError`] exactly as the transport or the
//! backend produced them.

pub mod client;
pub mod envelope;

use std::future::Future;

use crate::domain::{
    CreateProductData, ListQuery, LowStockReport, Product, ProductId, ProductPage, SearchResults,
    UpdateProductData,
};
use crate::error::RequestError;

pub use client::{HttpProductApi, REQUEST_ID_HEADER};

/// One operation per backend capability of the product service.
///
/// The list coordinator is generic over this trait so it can be driven by
/// [`HttpProductApi`] in production and by an in-memory catalog in tests.
/// Futures must be `Send` because calls run on spawned tasks.
pub trait ProductApi: Send + Sync + 'static {
    /// `GET /products` with filters and page window as query parameters.
    fn list_products(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<ProductPage, RequestError>> + Send;

    /// `GET /products/{id}`.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, RequestError>> + Send;

    /// `POST /products`.
    fn create_product(
        &self,
        data: &CreateProductData,
    ) -> impl Future<Output = Result<Product, RequestError>> + Send;

    /// `PATCH /products/{id}` with only the fields present in `data`.
    fn update_product(
        &self,
        id: ProductId,
        data: &UpdateProductData,
    ) -> impl Future<Output = Result<Product, RequestError>> + Send;

    /// `DELETE /products/{id}`.
    fn delete_product(&self, id: ProductId)
    -> impl Future<Output = Result<(), RequestError>> + Send;

    /// `GET /products/search?q=&limit=`.
    fn search_products(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<SearchResults, RequestError>> + Send;

    /// `GET /products/low_stock?threshold=`.
    fn low_stock_products(
        &self,
        threshold: Option<u32>,
    ) -> impl Future<Output = Result<LowStockReport, RequestError>> + Send;
}
