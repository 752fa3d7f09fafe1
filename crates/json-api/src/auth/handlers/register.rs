//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bakehouse_app::auth::Registration;

use crate::{
    auth::{
        errors::into_status_error,
        handlers::{AuthResponse, UserResponse},
    },
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register Administrator",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields or sign-up rejected"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(AuthResponse {
        success: true,
        user: Some(UserResponse::from(user)),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use bakehouse_app::auth::{AuthServiceError, AuthUser, MockAuthService};

    use crate::test_helpers::auth_service;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("auth/register").post(handler))
    }

    #[tokio::test]
    async fn test_register_success_returns_201() -> TestResult {
        let id = Uuid::now_v7();

        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| {
                registration.name == "Baker" && registration.email == "baker@example.com"
            })
            .return_once(move |registration| {
                Ok(AuthUser {
                    id,
                    email: Some(registration.email),
                })
            });

        auth.expect_login().never();

        let mut res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "name": "Baker", "email": "baker@example.com", "password": "pw" }))
            .send(&make_service(auth))
            .await;

        let body: AuthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(body.success);
        assert_eq!(body.user.map(|user| user.id), Some(id));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_missing_fields_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register().once().return_once(|_| {
            Err(AuthServiceError::MissingFields(
                "Name, email and password are required",
            ))
        });

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "email": "baker@example.com" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejected_by_provider_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::Rejected("User already registered".into())));

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "name": "Baker", "email": "baker@example.com", "password": "pw" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
