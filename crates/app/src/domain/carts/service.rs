//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::{Value, json};

use crate::{
    domain::carts::{
        errors::CartsServiceError,
        models::{Cart, CartId, LineChange, NewLine},
        normalize,
    },
    shopify::{StoreClientError, StoreGateway, operations},
};

/// Cart mutation gateway backed by the Shopify Storefront API.
///
/// One remote operation per action; multi-step flows have no compensating
/// rollback, the upstream store is the only serialization point.
#[derive(Clone)]
pub struct ShopifyCartsService {
    gateway: Arc<dyn StoreGateway>,
}

impl ShopifyCartsService {
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>) -> Self {
        Self { gateway }
    }

    async fn mutate(
        &self,
        document: &'static str,
        action: &str,
        variables: Value,
    ) -> Result<Cart, CartsServiceError> {
        let envelope = self.gateway.send(document, variables).await?;

        normalize::unwrap_mutation(envelope, action)?.ok_or_else(|| {
            StoreClientError::Protocol(format!("{action} returned no cart")).into()
        })
    }
}

#[async_trait]
impl CartsService for ShopifyCartsService {
    async fn create_cart(&self) -> Result<Cart, CartsServiceError> {
        self.mutate(operations::CART_CREATE, "cartCreate", json!({ "input": {} }))
            .await
    }

    async fn add_lines(
        &self,
        cart: CartId,
        lines: Vec<NewLine>,
    ) -> Result<Cart, CartsServiceError> {
        if lines.is_empty() || lines.iter().any(|line| line.quantity == 0) {
            return Err(CartsServiceError::InvalidLines);
        }

        let lines: Vec<Value> = lines
            .iter()
            .map(|line| {
                json!({
                    "merchandiseId": line.merchandise_id,
                    "quantity": line.quantity,
                })
            })
            .collect();

        self.mutate(
            operations::CART_LINES_ADD,
            "cartLinesAdd",
            json!({ "cartId": cart.as_str(), "lines": lines }),
        )
        .await
    }

    async fn update_lines(
        &self,
        cart: CartId,
        changes: Vec<LineChange>,
    ) -> Result<Cart, CartsServiceError> {
        if changes.is_empty() {
            return Err(CartsServiceError::InvalidLines);
        }

        // The upstream handles zero-quantity updates inconsistently, so a
        // request to set a line to zero is translated into removal.
        let (removals, updates): (Vec<LineChange>, Vec<LineChange>) =
            changes.into_iter().partition(|change| change.quantity == 0);

        let mut latest = None;

        if !updates.is_empty() {
            let lines: Vec<Value> = updates
                .iter()
                .map(|change| json!({ "id": change.id, "quantity": change.quantity }))
                .collect();

            latest = Some(
                self.mutate(
                    operations::CART_LINES_UPDATE,
                    "cartLinesUpdate",
                    json!({ "cartId": cart.as_str(), "lines": lines }),
                )
                .await?,
            );
        }

        if !removals.is_empty() {
            let line_ids: Vec<&str> = removals.iter().map(|change| change.id.as_str()).collect();

            latest = Some(
                self.mutate(
                    operations::CART_LINES_REMOVE,
                    "cartLinesRemove",
                    json!({ "cartId": cart.as_str(), "lineIds": line_ids }),
                )
                .await?,
            );
        }

        latest.ok_or(CartsServiceError::InvalidLines)
    }

    async fn remove_lines(
        &self,
        cart: CartId,
        line_ids: Vec<String>,
    ) -> Result<Cart, CartsServiceError> {
        if line_ids.is_empty() {
            return Err(CartsServiceError::InvalidLines);
        }

        self.mutate(
            operations::CART_LINES_REMOVE,
            "cartLinesRemove",
            json!({ "cartId": cart.as_str(), "lineIds": line_ids }),
        )
        .await
    }

    async fn read_cart(&self, cart: CartId) -> Result<Option<Cart>, CartsServiceError> {
        let envelope = self
            .gateway
            .send(operations::CART_QUERY, json!({ "cartId": cart.as_str() }))
            .await?;

        normalize::unwrap_read(envelope)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Create a new empty cart upstream.
    ///
    /// # Errors
    ///
    /// `MutationRejected` when the upstream reports validation errors.
    async fn create_cart(&self) -> Result<Cart, CartsServiceError>;

    /// Add lines to an existing cart.
    ///
    /// # Errors
    ///
    /// `InvalidLines` for an empty list or a zero quantity, otherwise the
    /// upstream mapping errors.
    async fn add_lines(&self, cart: CartId, lines: Vec<NewLine>)
    -> Result<Cart, CartsServiceError>;

    /// Update line quantities; zero-quantity changes become removals.
    ///
    /// # Errors
    ///
    /// `InvalidLines` for an empty list, otherwise the upstream mapping
    /// errors.
    async fn update_lines(
        &self,
        cart: CartId,
        changes: Vec<LineChange>,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove lines by line identifier.
    ///
    /// # Errors
    ///
    /// `InvalidLines` for an empty list, otherwise the upstream mapping
    /// errors.
    async fn remove_lines(
        &self,
        cart: CartId,
        line_ids: Vec<String>,
    ) -> Result<Cart, CartsServiceError>;

    /// Read a cart; an expired or unknown cart is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Transport and protocol failures only.
    async fn read_cart(&self, cart: CartId) -> Result<Option<Cart>, CartsServiceError>;
}
