//! Logging setup and request tracing middleware.

use thiserror::Error;

mod init;
mod request;

pub(crate) use init::init_logging;
pub(crate) use request::{RequestLogging, request_id};

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
