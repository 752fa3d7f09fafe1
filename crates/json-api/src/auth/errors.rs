//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use bakehouse_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::MissingFields(brief) => StatusError::bad_request().brief(brief),
        AuthServiceError::Rejected(message) => StatusError::bad_request().brief(message),
        AuthServiceError::InvalidCredentials(message) => {
            StatusError::unauthorized().brief(message)
        }
        AuthServiceError::Provider(source) => {
            error!("auth provider request failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to store user profile: {source}");

            StatusError::internal_server_error()
        }
    }
}
