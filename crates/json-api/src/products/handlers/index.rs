//! List Products Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::models::Product;

use crate::{
    products::{errors, handlers::get::ProductResponse},
    state::State,
};

/// Product listing envelope.
///
/// Mirrors the store's connection shape so listing clients can walk
/// `products.edges[].node` the same way they would against the store
/// directly.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsEnvelope {
    pub products: ProductConnectionResponse,
}

/// Product Connection Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductConnectionResponse {
    pub edges: Vec<ProductEdgeResponse>,
}

/// Product Edge Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEdgeResponse {
    pub node: ProductResponse,
}

impl From<Vec<Product>> for ProductsEnvelope {
    fn from(products: Vec<Product>) -> Self {
        Self {
            products: ProductConnectionResponse {
                edges: products
                    .into_iter()
                    .map(|product| ProductEdgeResponse {
                        node: product.into(),
                    })
                    .collect(),
            },
        }
    }
}

/// List Products Handler
///
/// Returns the newest-first product listing.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Product listing"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Store rejected the listing query"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(StatusError::internal_server_error());

        return;
    };

    match state.app.products.list_products().await {
        Ok(products) => res.render(Json(ProductsEnvelope::from(products))),
        Err(error) => errors::render(error, res),
    }
}
