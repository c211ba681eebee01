//! Server configuration module

use clap::Parser;
use storefront_app::shopify::StorefrontConfig;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Shopify shop domain, e.g. `my-shop.myshopify.com`
    #[arg(long, env = "SHOPIFY_STORE_DOMAIN")]
    pub shop_domain: String,

    /// Shopify Storefront API access token
    #[arg(long, env = "SHOPIFY_STOREFRONT_ACCESS_TOKEN", hide_env_values = true)]
    pub storefront_token: String,

    /// Shopify Storefront API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = "2024-10")]
    pub api_version: String,

    /// Mark the cart cookie `Secure` (enable behind HTTPS)
    #[arg(long, env = "SECURE_COOKIES")]
    pub secure_cookies: bool,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upstream store configuration for the storefront client
    #[must_use]
    pub fn storefront_config(&self) -> StorefrontConfig {
        StorefrontConfig {
            shop_domain: self.shop_domain.clone(),
            access_token: self.storefront_token.clone(),
            api_version: self.api_version.clone(),
        }
    }
}
