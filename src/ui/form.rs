//! Create/edit form state.
//!
//! The form is UI-local: it lives in the session, not in the coordinator,
//! and only hands a validated payload over on submit.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{CreateProductData, Product, ProductId, UpdateProductData};

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Product name.
    Name,
    /// Unit price.
    Price,
    /// Description.
    Description,
    /// Stock count.
    Stock,
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "description" | "desc" => Ok(Self::Description),
            "stock" => Ok(Self::Stock),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Description => "description",
            Self::Stock => "stock",
        })
    }
}

/// Reasons a form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Name is empty or whitespace.
    #[error("Name is required.")]
    MissingName,
    /// Price is not a decimal number.
    #[error("Price must be a number, got {0:?}.")]
    InvalidPrice(String),
    /// Price is below zero.
    #[error("Price cannot be negative.")]
    NegativePrice,
    /// Stock is not a non-negative integer.
    #[error("Stock must be a whole number of at least 0, got {0:?}.")]
    InvalidStock(String),
    /// An edit changed nothing.
    #[error("No changes to save.")]
    NothingChanged,
    /// `set` named a field the form does not have.
    #[error("Unknown field {0:?}; expected name, price, description or stock.")]
    UnknownField(String),
}

/// Validated form contents, ready for the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Store a new product.
    Create(CreateProductData),
    /// Patch an existing product with the changed fields.
    Update(ProductId, UpdateProductData),
}

/// Draft of a product being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    editing: Option<Product>,
    name: String,
    price: String,
    description: String,
    stock: String,
    error: Option<String>,
}

impl ProductForm {
    /// Empty form for a new product.
    #[must_use]
    pub fn create() -> Self {
        Self {
            editing: None,
            name: String::new(),
            price: String::new(),
            description: String::new(),
            stock: "0".to_string(),
            error: None,
        }
    }

    /// Form pre-filled from `product`.
    #[must_use]
    pub fn edit(product: Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            stock: product.stock.to_string(),
            editing: Some(product),
            error: None,
        }
    }

    /// Product being edited, `None` when creating.
    #[must_use]
    pub const fn editing(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    /// Heading for the form.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Product"
        } else {
            "Add New Product"
        }
    }

    /// Current raw text of `field`.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Price => &self.price,
            FormField::Description => &self.description,
            FormField::Stock => &self.stock,
        }
    }

    /// Validation message from the last failed submit.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the raw text of `field`.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Price => self.price = value,
            FormField::Description => self.description = value,
            FormField::Stock => self.stock = value,
        }
        self.error = None;
    }

    /// Validates the draft and builds the payload.
    ///
    /// On failure the message is also kept for display.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] describing the first invalid field, or
    /// [`FormError::NothingChanged`] for an edit without changes.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let result = self.validate();
        self.error = result.as_ref().err().map(ToString::to_string);
        result
    }

    fn validate(&self) -> Result<Submission, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let price = Decimal::from_str(self.price.trim())
            .map_err(|_| FormError::InvalidPrice(self.price.clone()))?;
        if price < Decimal::ZERO {
            return Err(FormError::NegativePrice);
        }
        let stock: u32 = self
            .stock
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidStock(self.stock.clone()))?;
        let description = self.description.trim().to_string();

        let Some(original) = &self.editing else {
            return Ok(Submission::Create(CreateProductData {
                name: name.to_string(),
                price,
                description,
                stock,
            }));
        };

        let update = UpdateProductData {
            name: (name != original.name).then(|| name.to_string()),
            price: (price != original.price).then_some(price),
            description: (description != original.description).then_some(description),
            stock: (stock != original.stock).then_some(stock),
        };
        if update.is_empty() {
            return Err(FormError::NothingChanged);
        }
        Ok(Submission::Update(original.id, update))
    }
}
