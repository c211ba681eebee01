//! Products

pub mod errors;
pub mod models;
mod normalize;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
