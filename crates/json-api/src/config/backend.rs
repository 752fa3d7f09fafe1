//! Backend Config

use clap::Args;

use bakehouse_app::context::BackendConfig;

/// Hosted backend providing authentication and image storage.
#[derive(Debug, Args)]
pub struct BackendSettings {
    /// Backend base URL
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: String,

    /// Backend API key
    #[arg(long, env = "BACKEND_API_KEY", hide_env_values = true)]
    pub backend_api_key: String,

    /// Bucket holding product images
    #[arg(long, env = "STORAGE_BUCKET", default_value = "upload")]
    pub storage_bucket: String,
}

impl From<BackendSettings> for BackendConfig {
    fn from(settings: BackendSettings) -> Self {
        Self {
            url: settings.backend_url,
            api_key: settings.backend_api_key,
            bucket: settings.storage_bucket,
        }
    }
}
