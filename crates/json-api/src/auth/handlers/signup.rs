//! Signup Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthAck, AuthMessage};

/// Signup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Signup Handler
///
/// Validates the registration shape and acknowledges. No account is
/// created.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::OK, description = "Acknowledged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing name, email or password"),
    ),
)]
pub(crate) async fn handler(json: JsonBody<SignupRequest>, res: &mut Response) {
    let request = json.into_inner();

    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.trim().is_empty()
    {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(AuthMessage {
            message: "Name, email and password are required".to_owned(),
        }));

        return;
    }

    res.render(Json(AuthAck { ok: true }));
}
