//! Carts

pub mod errors;
pub mod identity;
pub mod models;
mod normalize;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
