//! Client configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Unset or unparsable numeric values fall back to their
//! defaults; only a broken base URL or a zero page size is fatal.

use std::time::Duration;

use reqwest::Url;

use crate::filters::DEFAULT_DEBOUNCE;

/// Default backend address.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// How diagnostics are written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Reasons the configuration cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `CATALOG_API_URL` is not an absolute http(s) URL.
    #[error("invalid CATALOG_API_URL {value:?}: {reason}")]
    InvalidApiUrl {
        /// Value as given.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
    /// `CATALOG_PAGE_SIZE` is zero.
    #[error("CATALOG_PAGE_SIZE must be at least 1")]
    ZeroPageSize,
}

/// Top-level client configuration.
///
/// Loaded once at startup via [`AdminConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the catalog backend.
    pub api_url: Url,

    /// Products per page.
    pub page_size: u64,

    /// Quiet period before filter edits trigger a fetch.
    pub debounce: Duration,

    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,

    /// Result cap for quick searches; backend default when `None`.
    pub search_limit: Option<u32>,

    /// Low-stock threshold; backend default when `None`.
    pub low_stock_threshold: Option<u32>,

    /// Diagnostic output format.
    pub log_format: LogFormat,
}

impl AdminConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// See [`AdminConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if `CATALOG_API_URL` does
    /// not parse as an http(s) URL, and [`ConfigError::ZeroPageSize`] if
    /// `CATALOG_PAGE_SIZE` is `0`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;

        let page_size = parse_or(&lookup, "CATALOG_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        let debounce_ms = parse_or(
            &lookup,
            "CATALOG_DEBOUNCE_MS",
            u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(300),
        );
        let timeout_secs = parse_or(
            &lookup,
            "CATALOG_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        );

        let log_format = match lookup("CATALOG_LOG_FORMAT").as_deref() {
            Some("json" | "JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            api_url,
            page_size,
            debounce: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            search_limit: parse_optional(&lookup, "CATALOG_SEARCH_LIMIT"),
            low_stock_threshold: parse_optional(&lookup, "CATALOG_LOW_STOCK_THRESHOLD"),
            log_format,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    Ok(url)
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    parse_optional(lookup, key).unwrap_or(default)
}

fn parse_optional<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
