//! Cart endpoints and session cookie plumbing

pub(crate) mod cookie;
pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
