//! Cart error responses

use salvo::{http::StatusCode, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use storefront_app::{domain::carts::CartsServiceError, shopify::StoreClientError};

/// JSON error body returned by the cart endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,

    /// Structured rejection details passed through from the store, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

impl ErrorBody {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_owned(),
            details: None,
            message: None,
        }
    }
}

/// Maps a cart service error onto an HTTP status and JSON body.
///
/// Client mistakes are 400s, store rejections and malformed upstream
/// responses are 502s, and transport failures are 500s.
pub(crate) fn render(err: CartsServiceError, res: &mut Response) {
    match err {
        CartsServiceError::MissingIdentifier => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorBody::new("Missing cartId or variantId")));
        }
        CartsServiceError::InvalidLines => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorBody::new("Missing or invalid lines")));
        }
        CartsServiceError::MutationRejected { details } => {
            error!("cart mutation rejected by store: {details:?}");

            res.status_code(StatusCode::BAD_GATEWAY);
            res.render(Json(ErrorBody {
                error: "Cart mutation rejected".to_owned(),
                details: Some(details),
                message: None,
            }));
        }
        CartsServiceError::Store(store_error @ StoreClientError::Transport(_)) => {
            error!("cart request failed in transit: {store_error}");

            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorBody {
                error: "Failed to process cart".to_owned(),
                details: None,
                message: Some(store_error.to_string()),
            }));
        }
        CartsServiceError::Store(store_error @ StoreClientError::Protocol(_)) => {
            error!("store returned an unusable cart response: {store_error}");

            res.status_code(StatusCode::BAD_GATEWAY);
            res.render(Json(ErrorBody {
                error: "Unexpected store response".to_owned(),
                details: None,
                message: Some(store_error.to_string()),
            }));
        }
    }
}
