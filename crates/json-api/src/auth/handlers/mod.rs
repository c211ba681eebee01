pub(crate) mod login;
pub(crate) mod signup;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Validation failure response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthMessage {
    pub message: String,
}

/// Acknowledgement response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthAck {
    pub ok: bool,
}
