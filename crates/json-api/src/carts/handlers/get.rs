//! Read Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    carts::{
        identity,
        models::{Cart, CartLine},
    },
    money::Money,
};

use crate::{
    carts::{cookie, errors},
    state::State,
};

/// Cart envelope returned by every cart endpoint.
///
/// `cart` is `null` when no cart identifier could be resolved or the
/// identified cart no longer exists upstream.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    pub cart: Option<CartResponse>,
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The store-issued cart identifier
    pub id: String,

    /// Hosted checkout URL for this cart
    pub checkout_url: Option<String>,

    /// The lines in the cart
    pub lines: Vec<CartLineResponse>,

    /// Total cost across all lines
    pub total_cost: MoneyResponse,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id.to_string(),
            checkout_url: cart.checkout_url,
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            total_cost: cart.total_cost.into(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    /// The line identifier used for updates and removals
    pub id: String,

    pub quantity: u32,

    /// The merchandise (product variant) identifier
    pub merchandise_id: String,

    pub product_title: String,

    pub variant_title: String,

    pub unit_image: Option<String>,

    /// Cost of this line
    pub line_cost: MoneyResponse,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            quantity: line.quantity,
            merchandise_id: line.merchandise_id,
            product_title: line.product_title,
            variant_title: line.variant_title,
            unit_image: line.unit_image,
            line_cost: line.line_cost.into(),
        }
    }
}

/// Money Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MoneyResponse {
    pub amount: String,
    pub currency_code: String,
}

impl From<Money> for MoneyResponse {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount,
            currency_code: money.currency_code,
        }
    }
}

/// Read Cart Handler
///
/// Resolves the cart identifier from the `cartId` query parameter or the
/// `cartId` cookie and returns the cart, or `{"cart": null}` when neither
/// yields a live cart.
#[endpoint(
    tags("cart"),
    summary = "Read Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart, or null when absent"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Unusable store response"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(StatusError::internal_server_error());

        return;
    };

    let explicit = req.query::<String>("cartId");
    let from_cookie = cookie::read(req);

    let Some(cart_id) = identity::resolve(explicit.as_deref(), from_cookie.as_deref()) else {
        res.render(Json(CartEnvelope { cart: None }));

        return;
    };

    match state.app.carts.read_cart(cart_id).await {
        Ok(cart) => res.render(Json(CartEnvelope {
            cart: cart.map(CartResponse::from),
        })),
        Err(error) => errors::render(error, res),
    }
}
