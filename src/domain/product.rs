//! Product records and the payloads used to create or modify them.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned product identifier.
///
/// Wraps the integer key used in `/products/{id}` paths. Immutable once
/// assigned, so it is the only field of a [`Product`] that updates never
/// carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a `ProductId` from its raw integer value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A product record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price, never negative.
    #[serde(deserialize_with = "non_negative_price")]
    pub price: Decimal,
    /// Free-form description.
    pub description: String,
    /// Units in stock.
    pub stock: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Classifies the current stock into a [`StockLevel`].
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }
}

fn non_negative_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let price = <Decimal as Deserialize>::deserialize(deserializer)?;
    if price < Decimal::ZERO {
        return Err(serde::de::Error::custom(format!("negative price {price}")));
    }
    Ok(price)
}

/// Coarse stock classification shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// More than [`StockLevel::LOW_STOCK_LIMIT`] units.
    InStock,
    /// Between one and [`StockLevel::LOW_STOCK_LIMIT`] units.
    Low,
    /// No units left.
    OutOfStock,
}

impl StockLevel {
    /// Highest stock count still considered low.
    pub const LOW_STOCK_LIMIT: u32 = 10;

    /// Classifies a raw stock count.
    #[must_use]
    pub const fn of(stock: u32) -> Self {
        if stock > Self::LOW_STOCK_LIMIT {
            Self::InStock
        } else if stock > 0 {
            Self::Low
        } else {
            Self::OutOfStock
        }
    }
}

/// Payload for `POST /products`. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductData {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Free-form description.
    pub description: String,
    /// Units in stock.
    pub stock: u32,
}

/// Payload for `PATCH /products/{id}`.
///
/// Partial: only the fields that are `Some` are serialized, so the backend
/// leaves the others untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductData {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New stock count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl UpdateProductData {
    /// Returns `true` if the update carries no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.stock.is_none()
    }
}
