//! Product Models
//!
//! Read-only projections of the upstream catalog. Nothing in this system
//! ever writes a product.

use crate::domain::money::Money;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub handle: String,
    /// Lowest variant price, used for listing display and client-side sort.
    pub min_price: Money,
    pub images: Vec<ProductImage>,
    pub variants: Vec<Variant>,
}

impl Product {
    /// The variant a product-level "add to cart" acts on.
    ///
    /// Always the first variant; variant selection UX is deliberately out
    /// of scope.
    #[must_use]
    pub fn first_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }
}

/// Product Image Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub url: String,
    pub alt_text: Option<String>,
}

/// Variant Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: String,
    pub title: Option<String>,
    pub price: Option<Money>,
    pub compare_at_price: Option<Money>,
}
