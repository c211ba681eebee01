//! Storefront domain concerns.

pub mod carts;
pub mod money;
pub mod products;
