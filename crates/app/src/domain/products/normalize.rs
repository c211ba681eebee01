//! Catalog payload normalization.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{
        money::Money,
        products::{
            errors::ProductsServiceError,
            models::{Product, ProductImage, Variant},
        },
    },
    shopify::StoreClientError,
};

/// Parse the `products` connection out of a list response.
pub(crate) fn products_from_value(value: &Value) -> Result<Vec<Product>, ProductsServiceError> {
    let raw: RawConnection<RawProduct> = serde_json::from_value(value.clone()).map_err(|error| {
        StoreClientError::Protocol(format!("malformed products payload: {error}"))
    })?;

    Ok(raw.edges.into_iter().map(|edge| edge.node.into()).collect())
}

/// Parse one product node.
pub(crate) fn product_from_value(value: &Value) -> Result<Product, ProductsServiceError> {
    let raw: RawProduct = serde_json::from_value(value.clone()).map_err(|error| {
        StoreClientError::Protocol(format!("malformed product payload: {error}"))
    })?;

    Ok(raw.into())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    handle: String,
    price_range: RawPriceRange,
    #[serde(default)]
    images: RawConnection<RawImage>,
    #[serde(default)]
    variants: RawConnection<RawVariant>,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            handle: raw.handle,
            min_price: raw.price_range.min_variant_price.into(),
            images: raw
                .images
                .edges
                .into_iter()
                .map(|edge| ProductImage {
                    url: edge.node.url,
                    alt_text: edge.node.alt_text,
                })
                .collect(),
            variants: raw
                .variants
                .edges
                .into_iter()
                .map(|edge| Variant {
                    id: edge.node.id,
                    title: edge.node.title,
                    price: edge.node.price.map(Into::into),
                    compare_at_price: edge.node.compare_at_price.map(Into::into),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConnection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<RawEdge<T>>,
}

impl<T> Default for RawConnection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
struct RawEdge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPriceRange {
    min_variant_price: RawMoney,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawImage {
    url: String,
    #[serde(default)]
    alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVariant {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    price: Option<RawMoney>,
    #[serde(default)]
    compare_at_price: Option<RawMoney>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMoney {
    amount: String,
    currency_code: String,
}

impl From<RawMoney> for Money {
    fn from(raw: RawMoney) -> Self {
        Self {
            amount: raw.amount,
            currency_code: raw.currency_code,
        }
    }
}
