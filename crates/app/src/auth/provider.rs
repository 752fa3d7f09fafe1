//! Hosted auth provider client.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{AuthUser, Credentials, Registration, Session};

/// Configuration for connecting to the auth provider.
#[derive(Debug, Clone)]
pub struct AuthProviderConfig {
    /// Provider base URL, e.g. `"https://project.example.co"`.
    pub url: String,

    /// Public API key sent with every request.
    pub api_key: String,
}

/// HTTP client for password sign-up and sign-in.
#[derive(Debug, Clone)]
pub struct AuthProviderClient {
    config: AuthProviderConfig,
    http: Client,
}

impl AuthProviderClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: AuthProviderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Register a new user, storing `name` in the user metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::Rejected`] when the provider refuses the sign-up.
    pub async fn sign_up(&self, registration: &Registration) -> Result<AuthUser, AuthProviderError> {
        let body = SignUpRequest {
            email: &registration.email,
            password: &registration.password,
            data: SignUpData {
                name: &registration.name,
            },
        };

        let response = self
            .http
            .post(format!("{}/auth/v1/signup", self.base_url()))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: SignUpResponse = checked(response).await?.json().await?;

        Ok(match parsed {
            SignUpResponse::Session { user } | SignUpResponse::User(user) => user,
        })
    }

    /// Exchange an email and password for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::Rejected`] for invalid credentials.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthProviderError> {
        let response = self
            .http
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url()
            ))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&SignInRequest {
                email: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await?;

        Ok(checked(response).await?.json().await?)
    }

    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }
}

async fn checked(response: Response) -> Result<Response, AuthProviderError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    if status.is_client_error() {
        return Err(AuthProviderError::Rejected(provider_message(&text)));
    }

    Err(AuthProviderError::UnexpectedResponse(format!(
        "request failed with status {status}: {text}"
    )))
}

/// Pull the human-readable message out of a provider error body.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.error_description.or(error.msg).or(error.message))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpData<'a>,
}

#[derive(Debug, Serialize)]
struct SignUpData<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Sign-up answers with a session when email confirmation is off, else with the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session { user: AuthUser },
    User(AuthUser),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

/// Errors that can occur when communicating with the auth provider.
#[derive(Debug, Error)]
pub enum AuthProviderError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider refused the request.
    #[error("{0}")]
    Rejected(String),

    /// The provider returned a server error or unexpected body.
    #[error("unexpected response from auth provider: {0}")]
    UnexpectedResponse(String),
}
