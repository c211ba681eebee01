//! Shopify Storefront API client.

mod client;
pub mod operations;

pub use client::*;
