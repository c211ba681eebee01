//! Client cart state synchronizer.
//!
//! Keeps the visible cart state (badge count, per-product "in cart" flags)
//! consistent with the server cart across UI surfaces that hold no direct
//! reference to each other: every surface subscribes to one shared badge
//! channel, and every successful mutation triggers a fresh read that is
//! republished to all of them.
//!
//! Known gaps, deliberately left open rather than silently patched:
//! the local identifier copy and the server session cookie are never
//! reconciled with each other, and the lazy create-then-add bootstrap is
//! two remote calls with no atomicity — an interruption in between leaves
//! an empty orphaned cart upstream.

mod store;

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tokio::sync::watch;
use tracing::warn;

use crate::domain::carts::{
    CartsService, CartsServiceError,
    models::{Cart, CartId, LineChange, NewLine},
};

pub use store::*;

/// What every UI surface needs to render cart affordances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartBadge {
    /// Sum of line quantities in the current cart.
    pub item_count: u32,

    /// Merchandise ids present in the current cart's lines. Derived, never
    /// persisted; recomputed from every fresh read.
    pub in_cart: FxHashSet<String>,
}

impl CartBadge {
    fn from_cart(cart: &Cart) -> Self {
        Self {
            item_count: cart.item_count(),
            in_cart: cart
                .lines
                .iter()
                .map(|line| line.merchandise_id.clone())
                .collect(),
        }
    }
}

/// Synchronizes visible cart state with the remote cart.
#[derive(Clone)]
pub struct CartSync {
    carts: Arc<dyn CartsService>,
    ids: Arc<dyn CartIdStore>,
    badge: Arc<watch::Sender<CartBadge>>,
}

impl CartSync {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>, ids: Arc<dyn CartIdStore>) -> Self {
        let (badge, _) = watch::channel(CartBadge::default());

        Self {
            carts,
            ids,
            badge: Arc::new(badge),
        }
    }

    /// Subscribe a UI surface to badge updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartBadge> {
        self.badge.subscribe()
    }

    /// The currently published badge.
    #[must_use]
    pub fn badge(&self) -> CartBadge {
        self.badge.borrow().clone()
    }

    /// The locally persisted cart identifier, if any.
    #[must_use]
    pub fn cart_id(&self) -> Option<CartId> {
        self.ids.load()
    }

    /// Re-read the cart and republish the badge to every subscriber.
    ///
    /// No stored identifier, or a cart the upstream no longer knows, both
    /// publish an empty badge. A failed read leaves the previous badge in
    /// place.
    ///
    /// # Errors
    ///
    /// Transport and protocol failures from the read.
    pub async fn refresh(&self) -> Result<CartBadge, CartsServiceError> {
        let badge = match self.ids.load() {
            None => CartBadge::default(),
            Some(id) => match self.carts.read_cart(id).await? {
                None => CartBadge::default(),
                Some(cart) => CartBadge::from_cart(&cart),
            },
        };

        self.badge.send_replace(badge.clone());

        Ok(badge)
    }

    /// Add a variant to the cart, creating the cart first if none exists.
    ///
    /// A zero quantity is treated as 1, matching the gateway default.
    ///
    /// # Errors
    ///
    /// Errors from create or add; a failure between the two leaves the
    /// badge and the stored identifier untouched.
    pub async fn add_to_cart(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let cart_id = match self.ids.load() {
            Some(id) => id,
            None => {
                let created = self.carts.create_cart().await?;

                self.ids.save(&created.id);

                created.id
            }
        };

        let cart = self
            .carts
            .add_lines(
                cart_id,
                vec![NewLine {
                    merchandise_id: variant_id.to_owned(),
                    quantity: quantity.max(1),
                }],
            )
            .await?;

        self.republish().await;

        Ok(cart)
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// `MissingIdentifier` when no cart identifier is stored, otherwise
    /// the mutation's errors.
    pub async fn set_line_quantity(
        &self,
        line_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let cart_id = self.ids.load().ok_or(CartsServiceError::MissingIdentifier)?;

        let cart = if quantity == 0 {
            self.carts.remove_lines(cart_id, vec![line_id.to_owned()]).await?
        } else {
            self.carts
                .update_lines(
                    cart_id,
                    vec![LineChange {
                        id: line_id.to_owned(),
                        quantity,
                    }],
                )
                .await?
        };

        self.republish().await;

        Ok(cart)
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// `MissingIdentifier` when no cart identifier is stored, otherwise
    /// the mutation's errors.
    pub async fn remove_line(&self, line_id: &str) -> Result<Cart, CartsServiceError> {
        let cart_id = self.ids.load().ok_or(CartsServiceError::MissingIdentifier)?;

        let cart = self.carts.remove_lines(cart_id, vec![line_id.to_owned()]).await?;

        self.republish().await;

        Ok(cart)
    }

    // A refresh failure after a successful mutation is reported but must
    // not fail the mutation; the next refresh resolves the stale badge.
    async fn republish(&self) {
        if let Err(error) = self.refresh().await {
            warn!("failed to refresh cart badge after mutation: {error}");
        }
    }
}
