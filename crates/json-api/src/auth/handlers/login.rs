//! Login Handler

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, SameSite, time::Duration},
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bakehouse_app::auth::Credentials;

use crate::{
    auth::{
        errors::into_status_error,
        handlers::{AuthResponse, UserResponse},
    },
    extensions::*,
    state::State,
};

/// Session cookie lifetime.
const SESSION_TTL: Duration = Duration::hours(1);

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
/// Stores the access token in an HTTP-only session cookie.
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing email or password"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(Credentials {
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(into_status_error)?;

    res.add_cookie(
        Cookie::build((SESSION_COOKIE, session.access_token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(SESSION_TTL)
            .build(),
    );

    Ok(Json(AuthResponse {
        success: true,
        user: Some(UserResponse::from(session.user)),
    }))
}
