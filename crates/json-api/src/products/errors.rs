//! Product error responses

use salvo::{http::StatusCode, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

/// JSON error body returned by the product listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

/// Maps a catalog error onto an HTTP status and JSON body.
pub(crate) fn render(err: ProductsServiceError, res: &mut Response) {
    match err {
        ProductsServiceError::Upstream { details } => {
            error!("store returned GraphQL errors for product listing: {details:?}");

            res.status_code(StatusCode::BAD_GATEWAY);
            res.render(Json(ErrorBody {
                error: "Failed to fetch products".to_owned(),
                details: Some(details),
                message: None,
            }));
        }
        ProductsServiceError::Store(store_error) => {
            error!("product listing request failed: {store_error}");

            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorBody {
                error: "Failed to fetch products".to_owned(),
                details: None,
                message: Some(store_error.to_string()),
            }));
        }
    }
}
