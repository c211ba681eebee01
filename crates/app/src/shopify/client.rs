//! HTTP client for the Shopify Storefront `GraphQL` endpoint.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Configuration for connecting to a Shopify storefront.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop domain, e.g. `"my-shop.myshopify.com"`. A scheme prefix and
    /// trailing slash are tolerated and stripped.
    pub shop_domain: String,

    /// Storefront API access token.
    pub access_token: String,

    /// Storefront API version, e.g. `"2024-10"`.
    pub api_version: String,
}

/// HTTP client for the upstream store.
///
/// Stateless beyond the connection pool; safe to share across requests.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    config: StorefrontConfig,
    endpoint: String,
    http: Client,
}

impl StorefrontClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let domain = normalize_domain(&config.shop_domain);
        let endpoint = format!(
            "https://{domain}/api/{version}/graphql.json",
            version = config.api_version
        );

        Self {
            config,
            endpoint,
            http: Client::new(),
        }
    }

    /// The resolved `GraphQL` endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StoreGateway for StorefrontClient {
    async fn send(
        &self,
        query: &'static str,
        variables: Value,
    ) -> Result<GraphQlEnvelope, StoreClientError> {
        debug!("sending storefront request to {}", self.endpoint);

        let body = serde_json::json!({ "query": query, "variables": variables });

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Storefront-Access-Token", &self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(StoreClientError::Transport)?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(StoreClientError::Protocol(format!(
                "request failed with status {status}: {text}"
            )));
        }

        response
            .json::<GraphQlEnvelope>()
            .await
            .map_err(|error| StoreClientError::Protocol(format!("invalid JSON response: {error}")))
    }
}

/// Transport seam for the upstream store.
///
/// The only implementation outside of tests is [`StorefrontClient`]; services
/// depend on this trait so mutations can be exercised without a network.
#[automock]
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Issue one `GraphQL` operation and return the response envelope as-is.
    ///
    /// A well-formed envelope that itself carries `errors` or `userErrors`
    /// is not an error at this layer; callers inspect the envelope.
    ///
    /// # Errors
    ///
    /// [`StoreClientError::Transport`] when the store is unreachable,
    /// [`StoreClientError::Protocol`] on a non-2xx status or unparseable body.
    async fn send(
        &self,
        query: &'static str,
        variables: Value,
    ) -> Result<GraphQlEnvelope, StoreClientError>;
}

/// Raw `GraphQL` response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlEnvelope {
    /// The `data` payload, when present.
    pub data: Option<Value>,

    /// Top-level `GraphQL` errors, passed through verbatim.
    pub errors: Option<Vec<Value>>,
}

impl GraphQlEnvelope {
    /// Top-level error values, when the envelope carries any.
    #[must_use]
    pub fn error_values(&self) -> Option<&[Value]> {
        self.errors.as_deref().filter(|errors| !errors.is_empty())
    }
}

/// Errors raised by the upstream store client itself.
///
/// Fail-fast: nothing here is retried.
#[derive(Debug, Error)]
pub enum StoreClientError {
    /// Network-level failure reaching the store (DNS, connect, timeout).
    #[error("failed to reach the upstream store: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx response or a body that is not the expected envelope.
    #[error("unexpected response from the upstream store: {0}")]
    Protocol(String),
}

fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();

    let without_scheme = ["https://", "http://"]
        .iter()
        .find_map(|scheme| strip_prefix_ignore_case(trimmed, scheme))
        .unwrap_or(trimmed);

    without_scheme.trim_end_matches('/').to_owned()
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;

    head.eq_ignore_ascii_case(prefix)
        .then(|| value.get(prefix.len()..))
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client(domain: &str) -> StorefrontClient {
        StorefrontClient::new(StorefrontConfig {
            shop_domain: domain.to_owned(),
            access_token: "token".to_owned(),
            api_version: "2024-10".to_owned(),
        })
    }

    #[test]
    fn test_endpoint_from_bare_domain() {
        let client = make_client("my-shop.myshopify.com");

        assert_eq!(
            client.endpoint(),
            "https://my-shop.myshopify.com/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_strips_scheme_and_trailing_slash() {
        let client = make_client("HTTPS://my-shop.myshopify.com/");

        assert_eq!(
            client.endpoint(),
            "https://my-shop.myshopify.com/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_strips_http_scheme() {
        let client = make_client(" http://my-shop.myshopify.com ");

        assert_eq!(
            client.endpoint(),
            "https://my-shop.myshopify.com/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn test_envelope_error_values_ignores_empty_list() {
        let envelope = GraphQlEnvelope {
            data: None,
            errors: Some(vec![]),
        };

        assert!(envelope.error_values().is_none());
    }

    #[test]
    fn test_envelope_error_values_surfaces_errors() {
        let envelope = GraphQlEnvelope {
            data: None,
            errors: Some(vec![serde_json::json!({ "message": "boom" })]),
        };

        assert_eq!(envelope.error_values().map(<[Value]>::len), Some(1));
    }
}
