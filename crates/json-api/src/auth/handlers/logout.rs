//! Logout Handler

use salvo::{
    http::cookie::{Cookie, time::Duration},
    prelude::*,
};

use crate::{auth::handlers::AuthResponse, extensions::*};

/// Logout Handler
///
/// Expires the session cookie.
#[endpoint(tags("auth"), summary = "Sign Out")]
pub(crate) async fn handler(res: &mut Response) -> Json<AuthResponse> {
    res.add_cookie(
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .max_age(Duration::ZERO)
            .build(),
    );

    Json(AuthResponse {
        success: true,
        user: None,
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_logout_expires_cookie() -> TestResult {
        let service = Service::new(Router::with_path("auth/logout").post(handler));

        let mut res = TestClient::post("http://example.com/auth/logout")
            .send(&service)
            .await;

        let cookie = res
            .cookie(SESSION_COOKIE)
            .cloned()
            .ok_or("missing session cookie")?;
        let body: AuthResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));

        Ok(())
    }
}
