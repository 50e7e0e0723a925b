//! # catalog-admin
//!
//! Terminal client for administering a product catalog served over a
//! JSON REST API.
//!
//! The client lists products page by page, narrows the list with
//! debounced filters, and creates, edits or deletes products. After every
//! successful write the current page is re-fetched rather than patched
//! locally, so the backend stays the single source of truth.
//!
//! ## Architecture
//!
//! ```text
//! stdin commands
//!     │
//!     ├── Intents, form (ui/)
//!     ├── Session loop (app/)
//!     │
//!     ├── FilterState + Debouncer (filters/)
//!     ├── ListCoordinator + ListState (coordinator/)
//!     │
//!     ├── ProductApi / HttpProductApi (api/)
//!     │
//!     └── Catalog REST backend
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod filters;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
