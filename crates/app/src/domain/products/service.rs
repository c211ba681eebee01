//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::{Value, json};

use crate::{
    domain::products::{errors::ProductsServiceError, models::Product, normalize},
    shopify::{StoreGateway, operations},
};

/// Catalog reads backed by the Shopify Storefront API.
#[derive(Clone)]
pub struct ShopifyProductsService {
    gateway: Arc<dyn StoreGateway>,
}

impl ShopifyProductsService {
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ProductsService for ShopifyProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let envelope = self
            .gateway
            .send(operations::PRODUCTS_QUERY, Value::Null)
            .await?;

        if let Some(errors) = envelope.error_values() {
            return Err(ProductsServiceError::Upstream {
                details: errors.to_vec(),
            });
        }

        let data = envelope.data.unwrap_or(Value::Null);

        match data.get("products") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(products) => normalize::products_from_value(products),
        }
    }

    async fn get_product(&self, id: String) -> Result<Option<Product>, ProductsServiceError> {
        let envelope = self
            .gateway
            .send(operations::PRODUCT_BY_ID_QUERY, json!({ "id": id }))
            .await?;

        if let Some(errors) = envelope.error_values() {
            return Err(ProductsServiceError::Upstream {
                details: errors.to_vec(),
            });
        }

        let data = envelope.data.unwrap_or(Value::Null);

        match data.get("node") {
            None | Some(Value::Null) => Ok(None),
            Some(node) => normalize::product_from_value(node).map(Some),
        }
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List the catalog, newest first.
    ///
    /// # Errors
    ///
    /// `Upstream` when the store reports `GraphQL` errors, otherwise
    /// transport and protocol failures.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Read one product by its global id; an unknown id is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ProductsService::list_products`].
    async fn get_product(&self, id: String) -> Result<Option<Product>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::shopify::{GraphQlEnvelope, MockStoreGateway};

    use super::*;

    fn service(gateway: MockStoreGateway) -> ShopifyProductsService {
        ShopifyProductsService::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_list_products_unwraps_connection() -> TestResult {
        let mut gateway = MockStoreGateway::new();

        gateway
            .expect_send()
            .once()
            .withf(|query, _| query == operations::PRODUCTS_QUERY)
            .return_once(|_, _| {
                Ok(GraphQlEnvelope {
                    data: Some(json!({
                        "products": {
                            "edges": [{
                                "node": {
                                    "id": "gid://shopify/Product/1",
                                    "title": "Chair",
                                    "description": "",
                                    "handle": "chair",
                                    "priceRange": {
                                        "minVariantPrice": {
                                            "amount": "49.00",
                                            "currencyCode": "EUR"
                                        }
                                    },
                                }
                            }]
                        }
                    })),
                    errors: None,
                })
            });

        let products = service(gateway).list_products().await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.title.as_str()), Some("Chair"));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_null_connection_is_empty() -> TestResult {
        let mut gateway = MockStoreGateway::new();

        gateway.expect_send().once().return_once(|_, _| {
            Ok(GraphQlEnvelope {
                data: Some(json!({ "products": null })),
                errors: None,
            })
        });

        assert!(service(gateway).list_products().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_products_surfaces_graphql_errors() {
        let mut gateway = MockStoreGateway::new();

        gateway.expect_send().once().return_once(|_, _| {
            Ok(GraphQlEnvelope {
                data: None,
                errors: Some(vec![json!({ "message": "throttled" })]),
            })
        });

        let result = service(gateway).list_products().await;

        assert!(matches!(
            result,
            Err(ProductsServiceError::Upstream { details }) if details.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_get_product_missing_node_is_none() -> TestResult {
        let mut gateway = MockStoreGateway::new();

        gateway
            .expect_send()
            .once()
            .withf(|query, variables| {
                query == operations::PRODUCT_BY_ID_QUERY
                    && variables.get("id") == Some(&json!("gid://shopify/Product/404"))
            })
            .return_once(|_, _| {
                Ok(GraphQlEnvelope {
                    data: Some(json!({ "node": null })),
                    errors: None,
                })
            });

        let product = service(gateway)
            .get_product("gid://shopify/Product/404".to_owned())
            .await?;

        assert!(product.is_none());

        Ok(())
    }
}
