//! Filter criteria for the product listing.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sort order understood by `GET /products?sort_by=`.
///
/// When absent the backend sorts by name ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Alphabetical by name.
    Name,
    /// Most recently created first.
    Newest,
}

impl SortBy {
    /// All sort keys in the order the filter panel lists them.
    pub const ALL: [Self; 4] = [Self::PriceAsc, Self::PriceDesc, Self::Name, Self::Newest];

    /// Wire value for the `sort_by` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Name => "name",
            Self::Newest => "newest",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Name => "Name A-Z",
            Self::Newest => "Newest First",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known [`SortBy`] value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortBy {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// User-controlled listing filters.
///
/// Every field is optional; `None` means "not filtered". `min_price` and
/// `max_price` are independent, the backend decides what an inverted range
/// means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search over name and description.
    pub search: Option<String>,
    /// Lower price bound.
    pub min_price: Option<Decimal>,
    /// Upper price bound.
    pub max_price: Option<Decimal>,
    /// Only list products with stock left.
    pub in_stock: Option<bool>,
    /// Sort order.
    pub sort_by: Option<SortBy>,
}

impl FilterCriteria {
    /// Returns the search text if it is not blank.
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Returns `true` if any filter would narrow or reorder the listing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.search_text().is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.in_stock.is_some()
            || self.sort_by.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_parses_wire_values() {
        for key in SortBy::ALL {
            assert_eq!(key.as_str().parse::<SortBy>().ok(), Some(key));
        }
        assert!("cheapest".parse::<SortBy>().is_err());
    }

    #[test]
    fn blank_search_is_not_active() {
        let criteria = FilterCriteria {
            search: Some("   ".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.search_text(), None);
        assert!(!criteria.is_active());
    }

    #[test]
    fn any_field_activates() {
        let criteria = FilterCriteria {
            in_stock: Some(true),
            ..FilterCriteria::default()
        };
        assert!(criteria.is_active());
        assert!(!FilterCriteria::default().is_active());
    }
}
