//! Cart Models

use std::fmt;

use crate::domain::money::Money;

/// Opaque token naming one remote cart.
///
/// The value is issued by the upstream store; nothing here inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartId(String);

impl CartId {
    /// Wrap an identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CartId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The normalized upstream cart.
///
/// Callers never see the raw upstream envelope; every action is unwrapped
/// into this shape before anything else happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub checkout_url: Option<String>,
    pub lines: Vec<CartLine>,
    pub total_cost: Money,
}

impl Cart {
    /// Sum of line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

/// One (merchandise, quantity) entry within a cart.
///
/// Quantity is always at least 1 while the line exists; a zero-quantity
/// request is translated into removal by the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    pub merchandise_id: String,
    pub product_title: String,
    pub variant_title: String,
    pub unit_image: Option<String>,
    pub line_cost: Money,
}

/// A line to add to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    pub merchandise_id: String,
    pub quantity: u32,
}

/// A quantity change for an existing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    pub id: String,
    pub quantity: u32,
}
