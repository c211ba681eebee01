//! Cart identity resolution.
//!
//! One precedence rule, used uniformly by every entry point: an identifier
//! supplied explicitly with the request wins over the session cookie, and
//! no identifier at all is a normal outcome (no cart yet), not an error.
//! The client-held local copy is consulted one layer up, before the
//! explicit identifier is ever set.

use crate::domain::carts::models::CartId;

/// Resolve the authoritative cart identifier for a request.
///
/// Blank values count as absent.
#[must_use]
pub fn resolve(explicit: Option<&str>, cookie: Option<&str>) -> Option<CartId> {
    present(explicit).or_else(|| present(cookie))
}

fn present(value: Option<&str>) -> Option<CartId> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(CartId::new)
}
