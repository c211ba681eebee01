//! Upstream envelope normalization.
//!
//! The upstream wraps carts in heterogeneous envelopes
//! (`{data: {<action>: {cart, userErrors}}}` or an already-unwrapped
//! payload). This module is the only place that knows about those shapes;
//! everything downstream works with the canonical [`Cart`].

use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartId, CartLine},
        },
        money::Money,
    },
    shopify::{GraphQlEnvelope, StoreClientError},
};

/// Unwrap a mutation envelope into the canonical cart.
///
/// `action` names the mutation's root field, e.g. `cartLinesAdd`. Payloads
/// that arrive without the `{data: {<action>: ...}}` nesting are tolerated.
pub(crate) fn unwrap_mutation(
    envelope: GraphQlEnvelope,
    action: &str,
) -> Result<Option<Cart>, CartsServiceError> {
    if let Some(errors) = envelope.error_values() {
        return Err(CartsServiceError::MutationRejected {
            details: errors.to_vec(),
        });
    }

    let data = envelope.data.unwrap_or(Value::Null);
    let payload = data.get(action).unwrap_or(&data);

    if let Some(user_errors) = payload.get("userErrors").and_then(Value::as_array) {
        if !user_errors.is_empty() {
            return Err(CartsServiceError::MutationRejected {
                details: user_errors.clone(),
            });
        }
    }

    match payload.get("cart") {
        None | Some(Value::Null) => Ok(None),
        Some(cart) => cart_from_value(cart).map(Some),
    }
}

/// Unwrap a cart read envelope.
///
/// An expired or unknown cart surfaces upstream as an error list or a null
/// node; both mean "no cart yet" here, never a failure.
pub(crate) fn unwrap_read(envelope: GraphQlEnvelope) -> Result<Option<Cart>, CartsServiceError> {
    if envelope.error_values().is_some() {
        return Ok(None);
    }

    let Some(data) = envelope.data else {
        return Ok(None);
    };

    match data.get("cart") {
        None | Some(Value::Null) => Ok(None),
        Some(cart) => cart_from_value(cart).map(Some),
    }
}

fn cart_from_value(value: &Value) -> Result<Cart, CartsServiceError> {
    let raw: RawCart = serde_json::from_value(value.clone())
        .map_err(|error| StoreClientError::Protocol(format!("malformed cart payload: {error}")))?;

    Ok(raw.into())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCart {
    id: String,
    #[serde(default)]
    checkout_url: Option<String>,
    cost: RawCost,
    #[serde(default)]
    lines: RawConnection<RawLine>,
}

impl From<RawCart> for Cart {
    fn from(raw: RawCart) -> Self {
        Self {
            id: CartId::new(raw.id),
            checkout_url: raw.checkout_url,
            lines: raw
                .lines
                .edges
                .into_iter()
                .map(|edge| edge.node.into())
                .collect(),
            total_cost: raw.cost.total_amount.into(),
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
struct RawLine {
    id: String,
    quantity: u32,
    merchandise: RawMerchandise,
    cost: RawCost,
}

impl From<RawLine> for CartLine {
    fn from(raw: RawLine) -> Self {
        Self {
            id: raw.id,
            quantity: raw.quantity,
            merchandise_id: raw.merchandise.id,
            product_title: raw.merchandise.product.map(|p| p.title).unwrap_or_default(),
            variant_title: raw.merchandise.title,
            unit_image: raw.merchandise.image.and_then(|image| image.url),
            line_cost: raw.cost.total_amount.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMerchandise {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image: Option<RawImage>,
    #[serde(default)]
    product: Option<RawProductRef>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProductRef {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCost {
    total_amount: RawMoney,
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
