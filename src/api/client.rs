//! [`ProductApi`] over HTTP using `reqwest`.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::ProductApi;
use super::envelope::ProductEnvelope;
use crate::domain::{
    CreateProductData, ListQuery, LowStockReport, Product, ProductId, ProductPage, SearchResults,
    UpdateProductData,
};
use crate::error::RequestError;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the product service.
///
/// Cheap to clone: the inner [`Client`] shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    base_url: Url,
    http: Client,
}

impl HttpProductApi {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// `timeout` bounds each request from connect to the end of the body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the underlying client cannot
    /// be built (for example when no TLS backend is available).
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { base_url, http })
    }

    /// Appends `segments` to the base URL path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, so this only fails for URLs like
        // `mailto:` that the config layer already rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends `request` and returns the raw success body.
    async fn execute(&self, request: RequestBuilder, op: &'static str) -> Result<Vec<u8>, RequestError> {
        let request_id = uuid::Uuid::new_v4();
        let started = Instant::now();
        tracing::debug!(%request_id, op, "sending request");

        let response = request
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .inspect_err(|err| tracing::warn!(%request_id, op, error = %err, "request failed"))?;

        let status = response.status();
        let body = response.bytes().await?;
        let elapsed_ms = started.elapsed().as_millis();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).into_owned();
            tracing::warn!(%request_id, op, %status, elapsed_ms, "request rejected");
            return Err(RequestError::from_status(status, text));
        }

        tracing::debug!(%request_id, op, %status, elapsed_ms, "request completed");
        Ok(body.to_vec())
    }

    /// Sends `request` and decodes the JSON success body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &'static str,
    ) -> Result<T, RequestError> {
        let body = self.execute(request, op).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl ProductApi for HttpProductApi {
    async fn list_products(&self, query: &ListQuery) -> Result<ProductPage, RequestError> {
        let mut url = self.endpoint(&["products"]);
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        self.fetch(self.http.get(url), "list_products").await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, RequestError> {
        let url = self.endpoint(&["products", &id.to_string()]);
        self.fetch(self.http.get(url), "get_product").await
    }

    async fn create_product(&self, data: &CreateProductData) -> Result<Product, RequestError> {
        let url = self.endpoint(&["products"]);
        let request = self.http.post(url).json(&ProductEnvelope::new(data));
        self.fetch(request, "create_product").await
    }

    async fn update_product(
        &self,
        id: ProductId,
        data: &UpdateProductData,
    ) -> Result<Product, RequestError> {
        let url = self.endpoint(&["products", &id.to_string()]);
        let request = self.http.patch(url).json(&ProductEnvelope::new(data));
        self.fetch(request, "update_product").await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RequestError> {
        let url = self.endpoint(&["products", &id.to_string()]);
        self.execute(self.http.delete(url), "delete_product")
            .await
            .map(|_| ())
    }

    async fn search_products(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<SearchResults, RequestError> {
        let mut url = self.endpoint(&["products", "search"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        self.fetch(self.http.get(url), "search_products").await
    }

    async fn low_stock_products(
        &self,
        threshold: Option<u32>,
    ) -> Result<LowStockReport, RequestError> {
        let mut url = self.endpoint(&["products", "low_stock"]);
        if let Some(threshold) = threshold {
            url.query_pairs_mut()
                .append_pair("threshold", &threshold.to_string());
        }
        self.fetch(self.http.get(url), "low_stock_products").await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpProductApi {
        let Ok(url) = Url::parse(base) else {
            panic!("valid url");
        };
        let Ok(api) = HttpProductApi::new(url, Duration::from_secs(1)) else {
            panic!("client builds");
        };
        api
    }

    #[test]
    fn endpoint_appends_segments() {
        let api = client("http://localhost:3000");
        assert_eq!(
            api.endpoint(&["products", "7"]).as_str(),
            "http://localhost:3000/products/7"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = client("http://example.test/api/");
        assert_eq!(
            api.endpoint(&["products", "low_stock"]).as_str(),
            "http://example.test/api/products/low_stock"
        );
    }
}
