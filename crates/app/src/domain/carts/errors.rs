//! Cart service errors.

use serde_json::Value;
use thiserror::Error;

use crate::shopify::StoreClientError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// No cart identifier could be resolved for a mutating action.
    #[error("no cart identifier was resolved")]
    MissingIdentifier,

    /// The supplied line list was empty or malformed.
    #[error("cart lines are empty or malformed")]
    InvalidLines,

    /// The upstream store rejected an otherwise successful call.
    ///
    /// `details` carries the upstream error values verbatim.
    #[error("upstream store rejected the mutation")]
    MutationRejected { details: Vec<Value> },

    /// Transport or protocol failure in the store client.
    #[error(transparent)]
    Store(#[from] StoreClientError),
}
