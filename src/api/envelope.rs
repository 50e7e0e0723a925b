//! Request bodies wrapping product payloads.

use serde::Serialize;

/// Body shape for create and update: `{ "product": { ... } }`.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope<'a, T> {
    /// Wrapped payload.
    pub product: &'a T,
}

impl<'a, T: Serialize> ProductEnvelope<'a, T> {
    /// Wraps `product`.
    #[must_use]
    pub const fn new(product: &'a T) -> Self {
        Self { product }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{CreateProductData, UpdateProductData};

    #[test]
    fn create_body_is_wrapped() {
        let data = CreateProductData {
            name: "Lamp".to_string(),
            price: Decimal::new(2500, 2),
            description: "Desk lamp".to_string(),
            stock: 4,
        };
        let body = serde_json::to_value(ProductEnvelope::new(&data)).ok();
        assert_eq!(
            body,
            Some(serde_json::json!({
                "product": {
                    "name": "Lamp",
                    "price": "25.00",
                    "description": "Desk lamp",
                    "stock": 4
                }
            }))
        );
    }

    #[test]
    fn update_body_only_carries_changes() {
        let data = UpdateProductData {
            name: Some("Lamp XL".to_string()),
            ..UpdateProductData::default()
        };
        let body = serde_json::to_value(ProductEnvelope::new(&data)).ok();
        assert_eq!(
            body,
            Some(serde_json::json!({ "product": { "name": "Lamp XL" } }))
        );
    }
}
