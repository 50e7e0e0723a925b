//! Domain layer: products, filter criteria, pagination and list results.
//!
//! These are plain data types shared by the API client, the list
//! coordinator and the presentation layer. None of them perform I/O.

pub mod filter;
pub mod listing;
pub mod pagination;
pub mod product;

pub use filter::{FilterCriteria, SortBy, UnknownSortKey};
pub use listing::{InconsistentCounts, ListQuery, LowStockReport, ProductPage, SearchResults};
pub use pagination::{PAGE_WINDOW, Pagination};
pub use product::{CreateProductData, Product, ProductId, StockLevel, UpdateProductData};
