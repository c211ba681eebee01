//! Product service errors.

use serde_json::Value;
use thiserror::Error;

use crate::shopify::StoreClientError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// The upstream answered but reported `GraphQL` errors.
    ///
    /// `details` carries the upstream error values verbatim.
    #[error("upstream store reported errors")]
    Upstream { details: Vec<Value> },

    /// Transport or protocol failure in the store client.
    #[error(transparent)]
    Store(#[from] StoreClientError),
}
