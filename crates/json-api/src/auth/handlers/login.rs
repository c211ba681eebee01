//! Login Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthAck, AuthMessage};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Login Handler
///
/// Validates the credentials shape and acknowledges. No account lookup
/// happens and no session is issued.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Acknowledged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing email or password"),
    ),
)]
pub(crate) async fn handler(json: JsonBody<LoginRequest>, res: &mut Response) {
    let request = json.into_inner();

    if request.email.trim().is_empty() || request.password.trim().is_empty() {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(AuthMessage {
            message: "Email and password are required".to_owned(),
        }));

        return;
    }

    res.render(Json(AuthAck { ok: true }));
}
