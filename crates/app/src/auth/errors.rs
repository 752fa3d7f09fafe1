//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::AuthProviderError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("{0}")]
    MissingFields(&'static str),

    /// The provider refused a sign-up, e.g. because the email is taken.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("auth provider error")]
    Provider(#[source] AuthProviderError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
