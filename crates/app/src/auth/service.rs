//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::auth::{
    AuthProviderClient, AuthProviderError, AuthServiceError, AuthUser, Credentials,
    PgProfilesRepository, Registration, Session, UserProfile,
};

#[derive(Debug, Clone)]
pub struct ProviderAuthService {
    provider: AuthProviderClient,
    profiles: PgProfilesRepository,
}

impl ProviderAuthService {
    #[must_use]
    pub fn new(pool: PgPool, provider: AuthProviderClient) -> Self {
        Self {
            provider,
            profiles: PgProfilesRepository::new(pool),
        }
    }
}

#[async_trait]
impl AuthService for ProviderAuthService {
    async fn register(&self, registration: Registration) -> Result<AuthUser, AuthServiceError> {
        let registration = registration.validated()?;

        let user = self
            .provider
            .sign_up(&registration)
            .await
            .map_err(|error| match error {
                AuthProviderError::Rejected(message) => AuthServiceError::Rejected(message),
                other => AuthServiceError::Provider(other),
            })?;

        self.profiles
            .insert_profile(&UserProfile {
                id: user.id,
                name: registration.name,
                email: registration.email,
            })
            .await?;

        info!(user = %user.id, "registered user");

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError> {
        let credentials = credentials.validated()?;

        self.provider
            .sign_in(&credentials)
            .await
            .map_err(|error| match error {
                AuthProviderError::Rejected(message) => AuthServiceError::InvalidCredentials(message),
                other => AuthServiceError::Provider(other),
            })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a user with the provider and store their profile.
    async fn register(&self, registration: Registration) -> Result<AuthUser, AuthServiceError>;

    /// Sign in with an email and password.
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::{AuthProviderConfig, PgProfilesRepository, UserProfile},
        test::TestContext,
    };

    use super::*;

    fn offline_service() -> ProviderAuthService {
        ProviderAuthService::new(
            PgPool::connect_lazy("postgres://localhost/unused").expect("lazy pool"),
            AuthProviderClient::new(AuthProviderConfig {
                url: "http://127.0.0.1:9".to_string(),
                api_key: "key".to_string(),
            }),
        )
    }

    #[tokio::test]
    async fn register_validates_before_calling_provider() {
        let result = offline_service()
            .register(Registration {
                name: String::new(),
                email: "baker@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(AuthServiceError::MissingFields("Name, email and password are required"))
        ));
    }

    #[tokio::test]
    async fn login_validates_before_calling_provider() {
        let result = offline_service()
            .login(Credentials {
                email: String::new(),
                password: String::new(),
            })
            .await;

        assert!(matches!(
            result,
            Err(AuthServiceError::MissingFields("Email and password are required"))
        ));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_provider_error() {
        let result = offline_service()
            .login(Credentials {
                email: "baker@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(AuthServiceError::Provider(AuthProviderError::Http(_)))
        ));
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn missing_profiles_table_is_tolerated() -> TestResult {
        let ctx = TestContext::new().await;
        let profiles = PgProfilesRepository::new(ctx.db.pool().clone());
        let profile = UserProfile {
            id: uuid::Uuid::now_v7(),
            name: "Baker".to_string(),
            email: "baker@example.com".to_string(),
        };

        assert!(profiles.insert_profile(&profile).await?);

        sqlx::query("DROP TABLE profiles")
            .execute(ctx.db.pool())
            .await?;

        assert!(!profiles.insert_profile(&profile).await?);

        Ok(())
    }
}
