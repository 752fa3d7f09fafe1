//! Server configuration module

use clap::Parser;

use crate::config::{
    backend::BackendSettings, db::DatabaseConfig, logging::LoggingConfig,
    server::ListenConfig, store::StoreConfig,
};

pub(crate) mod backend;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod store;

pub(crate) use logging::LogFormat;

/// Bakehouse JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "bakehouse-json", about = "Bakehouse JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Hosted auth and storage backend settings.
    #[command(flatten)]
    pub backend: BackendSettings,

    /// Shop settings used for order messages.
    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_required_arguments_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "bakehouse-json",
            "--database-url",
            "postgres://localhost/bakehouse",
            "--backend-url",
            "https://backend.example",
            "--backend-api-key",
            "anon",
            "--whatsapp-number",
            "60123456789",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:4080");
        assert_eq!(config.backend.storage_bucket, "upload");
        assert_eq!(config.store.currency()?.iso_alpha_code, "MYR");

        Ok(())
    }
}
