//! App Context

use std::sync::Arc;

use crate::{
    domain::{
        carts::{CartsService, ShopifyCartsService},
        products::{ProductsService, ShopifyProductsService},
    },
    shopify::{StoreGateway, StorefrontClient, StorefrontConfig},
};

/// Shared service handles for the HTTP layer.
#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub products: Arc<dyn ProductsService>,
}

impl AppContext {
    /// Build the application context against a live storefront.
    #[must_use]
    pub fn from_storefront_config(config: StorefrontConfig) -> Self {
        Self::from_gateway(Arc::new(StorefrontClient::new(config)))
    }

    /// Build the application context on top of an arbitrary store gateway.
    #[must_use]
    pub fn from_gateway(gateway: Arc<dyn StoreGateway>) -> Self {
        Self {
            carts: Arc::new(ShopifyCartsService::new(Arc::clone(&gateway))),
            products: Arc::new(ShopifyProductsService::new(gateway)),
        }
    }

    /// Assemble a context from pre-built services.
    #[must_use]
    pub fn from_services(
        carts: Arc<dyn CartsService>,
        products: Arc<dyn ProductsService>,
    ) -> Self {
        Self { carts, products }
    }
}
