//! Auth Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakehouse_app::auth::AuthUser;

/// Signed-in or newly registered user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// Provider user ID
    pub id: Uuid,

    /// Email address, when the provider returns one
    pub email: Option<String>,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Outcome of an auth request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthResponse {
    /// Always true on success
    pub success: bool,

    /// Affected user, absent for logout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}
