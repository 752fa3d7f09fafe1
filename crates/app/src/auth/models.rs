//! Auth data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthServiceError;

/// Sign-up request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Registration {
    pub(crate) fn validated(self) -> Result<Self, AuthServiceError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();

        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(AuthServiceError::MissingFields(
                "Name, email and password are required",
            ));
        }

        Ok(Self {
            name,
            email,
            password: self.password,
        })
    }
}

/// Sign-in request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub(crate) fn validated(self) -> Result<Self, AuthServiceError> {
        let email = self.email.trim().to_string();

        if email.is_empty() || self.password.is_empty() {
            return Err(AuthServiceError::MissingFields(
                "Email and password are required",
            ));
        }

        Ok(Self {
            email,
            password: self.password,
        })
    }
}

/// A user known to the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub user: AuthUser,
}

/// Locally stored profile of a registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
