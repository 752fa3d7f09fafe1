//! Session cookie access.

use salvo::{Request, http::cookie::Cookie};

/// Cookie carrying the access token of a signed-in administrator.
pub(crate) const SESSION_COOKIE: &str = "sb-access-token";

pub(crate) trait SessionExt {
    /// The non-empty session token, if the request carries one.
    fn session_token(&self) -> Option<&str>;
}

impl SessionExt for Request {
    fn session_token(&self) -> Option<&str> {
        self.cookie(SESSION_COOKIE)
            .map(Cookie::value)
            .filter(|token| !token.is_empty())
    }
}
