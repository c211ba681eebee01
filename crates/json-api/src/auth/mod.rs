//! Mock auth endpoints
//!
//! Stateless stand-ins for a future account system. Requests are
//! validated and acknowledged; nothing is stored and no session is
//! issued.

mod handlers;

pub(crate) use handlers::*;
