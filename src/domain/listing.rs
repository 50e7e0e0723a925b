//! List requests and the result shapes returned by the listing endpoints.

use serde::{Deserialize, Serialize};

use super::filter::FilterCriteria;
use super::product::Product;

/// Parameters for `GET /products`: the filters plus the page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Filters applied to the listing.
    pub criteria: FilterCriteria,
    /// Maximum number of products to return.
    pub limit: u64,
    /// Number of matching products to skip.
    pub offset: u64,
}

impl ListQuery {
    /// Encodes the query as `(name, value)` pairs.
    ///
    /// Unset filters and blank search text are left out entirely; `limit`
    /// and `offset` are always present.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let criteria = &self.criteria;
        let mut pairs = Vec::with_capacity(7);
        if let Some(search) = criteria.search_text() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(min) = criteria.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = criteria.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(in_stock) = criteria.in_stock {
            pairs.push(("in_stock", in_stock.to_string()));
        }
        if let Some(sort_by) = criteria.sort_by {
            pairs.push(("sort_by", sort_by.as_str().to_string()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }
}

/// Error raised when a listing reports more matches than products exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("filtered_count {filtered_count} exceeds total_count {total_count}")]
pub struct InconsistentCounts {
    /// Reported total.
    pub total_count: u64,
    /// Reported filtered count.
    pub filtered_count: u64,
}

/// One page of the product listing.
///
/// `filtered_count <= total_count` holds for every value of this type;
/// decoding a body that violates it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProductPage")]
pub struct ProductPage {
    products: Vec<Product>,
    total_count: u64,
    filtered_count: u64,
}

#[derive(Deserialize)]
struct RawProductPage {
    products: Vec<Product>,
    total_count: u64,
    filtered_count: u64,
}

impl TryFrom<RawProductPage> for ProductPage {
    type Error = InconsistentCounts;

    fn try_from(raw: RawProductPage) -> Result<Self, Self::Error> {
        Self::new(raw.products, raw.total_count, raw.filtered_count)
    }
}

impl ProductPage {
    /// Builds a page, checking the count invariant.
    ///
    /// # Errors
    ///
    /// Returns [`InconsistentCounts`] if `filtered_count > total_count`.
    pub fn new(
        products: Vec<Product>,
        total_count: u64,
        filtered_count: u64,
    ) -> Result<Self, InconsistentCounts> {
        if filtered_count > total_count {
            return Err(InconsistentCounts {
                total_count,
                filtered_count,
            });
        }
        Ok(Self {
            products,
            total_count,
            filtered_count,
        })
    }

    /// Products on this page, in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog, ignoring filters.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of products matching the filters, ignoring pagination.
    #[must_use]
    pub const fn filtered_count(&self) -> u64 {
        self.filtered_count
    }

    /// Splits the page into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Product>, u64, u64) {
        (self.products, self.total_count, self.filtered_count)
    }
}

/// Response of `GET /products/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching products.
    pub products: Vec<Product>,
    /// Query echoed by the backend.
    pub query: String,
    /// Number of matches returned.
    pub count: u64,
}

/// Response of `GET /products/low_stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockReport {
    /// Products at or below the threshold.
    pub products: Vec<Product>,
    /// Threshold the backend applied.
    pub threshold: u32,
    /// Number of products reported.
    pub count: u64,
}
