//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartId, CartLine},
        },
        money::Money,
        products::{
            MockProductsService,
            models::{Product, ProductImage, Variant},
        },
    },
};

use crate::state::State;

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_create_cart().never();
    carts.expect_add_lines().never();
    carts.expect_update_lines().never();
    carts.expect_remove_lines().never();
    carts.expect_read_cart().never();

    carts
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();

    products
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    State::shared(
        AppContext::from_services(Arc::new(carts), Arc::new(strict_products_mock())),
        false,
    )
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    State::shared(
        AppContext::from_services(Arc::new(strict_carts_mock()), Arc::new(products)),
        false,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_carts(carts))).push(route))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn make_cart(id: &str) -> Cart {
    Cart {
        id: CartId::new(id),
        checkout_url: Some("https://shop.example/checkout".to_owned()),
        lines: vec![CartLine {
            id: "line-1".to_owned(),
            quantity: 1,
            merchandise_id: "gid://shopify/ProductVariant/1".to_owned(),
            product_title: "Chair".to_owned(),
            variant_title: "Default".to_owned(),
            unit_image: None,
            line_cost: Money::new("39.00", "EUR"),
        }],
        total_cost: Money::new("39.00", "EUR"),
    }
}

pub(crate) fn make_product(id: &str) -> Product {
    Product {
        id: id.to_owned(),
        title: "Chair".to_owned(),
        description: "A chair.".to_owned(),
        handle: "chair".to_owned(),
        min_price: Money::new("39.00", "EUR"),
        images: vec![ProductImage {
            url: "https://cdn.example/chair.jpg".to_owned(),
            alt_text: None,
        }],
        variants: vec![Variant {
            id: "gid://shopify/ProductVariant/1".to_owned(),
            title: Some("Default".to_owned()),
            price: Some(Money::new("39.00", "EUR")),
            compare_at_price: None,
        }],
    }
}
