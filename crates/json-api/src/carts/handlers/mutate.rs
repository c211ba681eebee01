//! Mutate Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::{
    CartsServiceError, identity,
    models::{Cart, LineChange, NewLine},
};

use crate::{
    carts::{
        cookie, errors,
        get::{CartEnvelope, CartResponse},
    },
    state::State,
};

/// Cart Mutation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartActionRequest {
    pub action: CartAction,

    /// Explicit cart identifier; falls back to the `cartId` cookie
    #[serde(default)]
    pub cart_id: Option<String>,

    /// Variant to add (`add` only)
    #[serde(default)]
    pub variant_id: Option<String>,

    /// Quantity to add (`add` only); absent or zero means one
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Line quantity changes (`update` only)
    #[serde(default)]
    pub lines: Option<Vec<LineChangeRequest>>,

    /// Line identifiers to drop (`remove` only)
    #[serde(default)]
    pub line_ids: Option<Vec<String>>,
}

/// Requested cart mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CartAction {
    Create,
    Add,
    Update,
    Remove,
}

/// Line Change Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineChangeRequest {
    pub id: String,
    pub quantity: u32,
}

impl From<LineChangeRequest> for LineChange {
    fn from(request: LineChangeRequest) -> Self {
        LineChange {
            id: request.id,
            quantity: request.quantity,
        }
    }
}

/// Mutate Cart Handler
///
/// Dispatches `create`, `add`, `update` and `remove` against the store and
/// returns the mutated cart. `create` and `add` refresh the `cartId` cookie
/// so later requests can omit the explicit identifier.
#[endpoint(
    tags("cart"),
    summary = "Mutate Cart",
    responses(
        (status_code = StatusCode::OK, description = "Mutated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing identifier or lines"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Store rejected the mutation"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartActionRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(StatusError::internal_server_error());

        return;
    };

    let request = json.into_inner();

    let from_cookie = cookie::read(req);
    let resolved = identity::resolve(request.cart_id.as_deref(), from_cookie.as_deref());

    let outcome = match request.action {
        CartAction::Create => state.app.carts.create_cart().await,
        CartAction::Add => {
            let Some(cart_id) = resolved else {
                errors::render(CartsServiceError::MissingIdentifier, res);

                return;
            };

            let Some(variant_id) = request
                .variant_id
                .filter(|variant| !variant.trim().is_empty())
            else {
                errors::render(CartsServiceError::MissingIdentifier, res);

                return;
            };

            // Absent and zero quantities both mean "add one".
            let quantity = request.quantity.filter(|quantity| *quantity > 0).unwrap_or(1);

            state
                .app
                .carts
                .add_lines(
                    cart_id,
                    vec![NewLine {
                        merchandise_id: variant_id,
                        quantity,
                    }],
                )
                .await
        }
        CartAction::Update => {
            let Some(cart_id) = resolved else {
                errors::render(CartsServiceError::MissingIdentifier, res);

                return;
            };

            let changes = request
                .lines
                .unwrap_or_default()
                .into_iter()
                .map(LineChange::from)
                .collect();

            state.app.carts.update_lines(cart_id, changes).await
        }
        CartAction::Remove => {
            let Some(cart_id) = resolved else {
                errors::render(CartsServiceError::MissingIdentifier, res);

                return;
            };

            state
                .app
                .carts
                .remove_lines(cart_id, request.line_ids.unwrap_or_default())
                .await
        }
    };

    let refresh_cookie = matches!(request.action, CartAction::Create | CartAction::Add);

    match outcome {
        Ok(cart) => render_cart(cart, refresh_cookie, state.secure_cookies, res),
        Err(error) => errors::render(error, res),
    }
}

fn render_cart(cart: Cart, refresh_cookie: bool, secure: bool, res: &mut Response) {
    if refresh_cookie {
        res.add_cookie(cookie::build(&cart.id, secure));
    }

    res.render(Json(CartEnvelope {
        cart: Some(CartResponse::from(cart)),
    }));
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::carts::MockCartsService;

    use crate::{
        carts::errors::ErrorBody,
        test_helpers::{carts_service, make_cart},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").post(handler))
    }

    #[tokio::test]
    async fn test_create_returns_cart_and_sets_cookie() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart("gid://shopify/Cart/new");

        carts.expect_create_cart().once().return_once(move || Ok(cart));
        carts.expect_add_lines().never();

        let mut res = TestClient::post("http://example.com/cart")
            .json(&json!({ "action": "create" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let session = res.cookie("cartId").map(|cookie| cookie.value().to_owned());

        assert_eq!(session, Some("gid://shopify/Cart/new".to_owned()));

        let envelope: CartEnvelope = res.take_json().await?;

        assert_eq!(
            envelope.cart.map(|cart| cart.id),
            Some("gid://shopify/Cart/new".to_owned())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_add_uses_cookie_identifier_and_refreshes_cookie() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart("gid://shopify/Cart/7");

        carts
            .expect_add_lines()
            .once()
            .withf(|id, lines| {
                id.as_str() == "gid://shopify/Cart/7"
                    && lines
                        == &[NewLine {
                            merchandise_id: "gid://shopify/ProductVariant/1".to_owned(),
                            quantity: 2,
                        }]
            })
            .return_once(move |_, _| Ok(cart));
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .add_header("cookie", "cartId=gid://shopify/Cart/7", true)
            .json(&json!({
                "action": "add",
                "variantId": "gid://shopify/ProductVariant/1",
                "quantity": 2,
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let session = res.cookie("cartId").map(|cookie| cookie.value().to_owned());

        assert_eq!(session, Some("gid://shopify/Cart/7".to_owned()));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_explicit_identifier_wins_over_cookie() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart("gid://shopify/Cart/explicit");

        carts
            .expect_add_lines()
            .once()
            .withf(|id, _| id.as_str() == "gid://shopify/Cart/explicit")
            .return_once(move |_, _| Ok(cart));
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .add_header("cookie", "cartId=gid://shopify/Cart/stale", true)
            .json(&json!({
                "action": "add",
                "cartId": "gid://shopify/Cart/explicit",
                "variantId": "gid://shopify/ProductVariant/1",
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_without_identifier_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_lines().never();
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({
                "action": "add",
                "variantId": "gid://shopify/ProductVariant/1",
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_without_variant_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_lines().never();
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({
                "action": "add",
                "cartId": "gid://shopify/Cart/7",
                "variantId": "   ",
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_defaults_missing_quantity_to_one() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart("gid://shopify/Cart/7");

        carts
            .expect_add_lines()
            .once()
            .withf(|_, lines| lines.first().is_some_and(|line| line.quantity == 1))
            .return_once(move |_, _| Ok(cart));
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({
                "action": "add",
                "cartId": "gid://shopify/Cart/7",
                "variantId": "gid://shopify/ProductVariant/1",
                "quantity": 0,
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_does_not_refresh_cookie() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart("gid://shopify/Cart/7");

        carts
            .expect_update_lines()
            .once()
            .withf(|id, changes| {
                id.as_str() == "gid://shopify/Cart/7"
                    && changes
                        == &[LineChange {
                            id: "line-1".to_owned(),
                            quantity: 3,
                        }]
            })
            .return_once(move |_, _| Ok(cart));
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({
                "action": "update",
                "cartId": "gid://shopify/Cart/7",
                "lines": [{ "id": "line-1", "quantity": 3 }],
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            res.cookie("cartId").is_none(),
            "update should not rewrite the session cookie"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_empty_lines_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_lines()
            .once()
            .withf(|_, changes| changes.is_empty())
            .return_once(|_, _| Err(CartsServiceError::InvalidLines));
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({
                "action": "update",
                "cartId": "gid://shopify/Cart/7",
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_forwards_line_ids() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart("gid://shopify/Cart/7");

        carts
            .expect_remove_lines()
            .once()
            .withf(|id, line_ids| {
                id.as_str() == "gid://shopify/Cart/7" && line_ids == &["line-1".to_owned()]
            })
            .return_once(move |_, _| Ok(cart));
        carts.expect_create_cart().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({
                "action": "remove",
                "cartId": "gid://shopify/Cart/7",
                "lineIds": ["line-1"],
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_mutation_returns_502_with_details() -> TestResult {
        let mut carts = MockCartsService::new();
        let details = vec![json!({ "code": "INVALID", "message": "unknown merchandise" })];
        let rejected = details.clone();

        carts
            .expect_add_lines()
            .once()
            .return_once(move |_, _| Err(CartsServiceError::MutationRejected { details: rejected }));
        carts.expect_create_cart().never();

        let mut res = TestClient::post("http://example.com/cart")
            .json(&json!({
                "action": "add",
                "cartId": "gid://shopify/Cart/7",
                "variantId": "gid://shopify/ProductVariant/1",
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));
        assert!(
            res.cookie("cartId").is_none(),
            "failed mutations should not touch the session cookie"
        );

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(body.error, "Cart mutation rejected");
        assert_eq!(body.details, Some(details));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_create_cart().never();
        carts.expect_add_lines().never();
        carts.expect_update_lines().never();
        carts.expect_remove_lines().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "action": "merge" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
