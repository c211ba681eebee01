//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use storefront_app::domain::products::{
    ProductsServiceError,
    models::{Product, ProductImage, Variant},
};

use crate::{carts::get::MoneyResponse, state::State};

/// Product envelope returned by the product detail endpoint.
///
/// Always delivered with HTTP 200. Failures are reported inside the body
/// so the storefront page can render its own error state instead of the
/// framework error page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub product: Option<ProductResponse>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProductEnvelope {
    fn found(product: Product) -> Self {
        Self {
            product: Some(product.into()),
            error: None,
            details: None,
            message: None,
        }
    }

    fn missing() -> Self {
        Self {
            product: None,
            error: None,
            details: None,
            message: None,
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub handle: String,
    pub price_range: PriceRangeResponse,
    pub images: ImageConnectionResponse,
    pub variants: VariantConnectionResponse,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            handle: product.handle,
            price_range: PriceRangeResponse {
                min_variant_price: product.min_price.into(),
            },
            images: ImageConnectionResponse {
                edges: product
                    .images
                    .into_iter()
                    .map(|image| ImageEdgeResponse { node: image.into() })
                    .collect(),
            },
            variants: VariantConnectionResponse {
                edges: product
                    .variants
                    .into_iter()
                    .map(|variant| VariantEdgeResponse {
                        node: variant.into(),
                    })
                    .collect(),
            },
        }
    }
}

/// Price Range Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceRangeResponse {
    pub min_variant_price: MoneyResponse,
}

/// Image Connection Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageConnectionResponse {
    pub edges: Vec<ImageEdgeResponse>,
}

/// Image Edge Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageEdgeResponse {
    pub node: ImageResponse,
}

/// Image Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageResponse {
    pub url: String,
    pub alt_text: Option<String>,
}

impl From<ProductImage> for ImageResponse {
    fn from(image: ProductImage) -> Self {
        Self {
            url: image.url,
            alt_text: image.alt_text,
        }
    }
}

/// Variant Connection Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantConnectionResponse {
    pub edges: Vec<VariantEdgeResponse>,
}

/// Variant Edge Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantEdgeResponse {
    pub node: VariantResponse,
}

/// Variant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantResponse {
    pub id: String,
    pub title: Option<String>,
    pub price: Option<MoneyResponse>,
    pub compare_at_price: Option<MoneyResponse>,
}

impl From<Variant> for VariantResponse {
    fn from(variant: Variant) -> Self {
        Self {
            id: variant.id,
            title: variant.title,
            price: variant.price.map(Into::into),
            compare_at_price: variant.compare_at_price.map(Into::into),
        }
    }
}

/// Get Product Handler
///
/// Returns one product by its store identifier.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product, null product, or embedded error"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(id: PathParam<String>, depot: &mut Depot, res: &mut Response) {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(StatusError::internal_server_error());

        return;
    };

    let envelope = match state.app.products.get_product(id.into_inner()).await {
        Ok(Some(product)) => ProductEnvelope::found(product),
        Ok(None) => ProductEnvelope::missing(),
        Err(ProductsServiceError::Upstream { details }) => {
            error!("store returned GraphQL errors for product detail: {details:?}");

            ProductEnvelope {
                product: None,
                error: Some("Failed to fetch product".to_owned()),
                details: Some(details),
                message: None,
            }
        }
        Err(ProductsServiceError::Store(store_error)) => {
            error!("product detail request failed: {store_error}");

            ProductEnvelope {
                product: None,
                error: Some("Failed to fetch product".to_owned()),
                details: None,
                message: Some(store_error.to_string()),
            }
        }
    };

    res.render(Json(envelope));
}
