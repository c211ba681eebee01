//! Shared storefront domain modules.
//!
//! Everything that is not HTTP plumbing lives here: the upstream store
//! client, the cart and product domain services, and the cart state
//! synchronizer that keeps independently mounted UI surfaces consistent.

pub mod context;
pub mod domain;
pub mod shopify;
pub mod sync;
