//! Object storage client for a hosted bucket API.

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::{ImageStorage, ImageStorageError, ImageUpload, object_path_from_url};

/// Configuration for the storage backend.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Backend base URL, e.g. `"https://project.example.co"`.
    pub url: String,

    /// API key sent with every request.
    pub api_key: String,

    /// Bucket holding product images.
    pub bucket: String,
}

/// HTTP client for bucket uploads and removals.
#[derive(Debug, Clone)]
pub struct BucketStorageClient {
    config: StorageConfig,
    http: Client,
}

impl BucketStorageClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Public URL for an object path in the configured bucket.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url(),
            self.config.bucket
        )
    }

    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{path}",
            self.base_url(),
            self.config.bucket
        )
    }
}

#[async_trait]
impl ImageStorage for BucketStorageClient {
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageStorageError> {
        let path = image.object_path(Uuid::new_v4());

        let content_type = image
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let response = self
            .http
            .post(self.object_url(&path))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header(CONTENT_TYPE, content_type)
            .body(image.bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ImageStorageError::UnexpectedResponse(format!(
                "upload of {path} failed with status {status}: {text}"
            )));
        }

        debug!(%path, "uploaded image");

        Ok(self.public_url(&path))
    }

    async fn remove(&self, url: &str) -> Result<bool, ImageStorageError> {
        let Some(path) = object_path_from_url(url, &self.config.bucket) else {
            warn!(%url, "image url is outside the storage bucket; skipping removal");

            return Ok(false);
        };

        let response = self
            .http
            .delete(format!(
                "{}/storage/v1/object/{}",
                self.base_url(),
                self.config.bucket
            ))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({ "prefixes": [path] }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ImageStorageError::UnexpectedResponse(format!(
                "removal of {path} failed with status {status}: {text}"
            )));
        }

        debug!(%path, "removed image");

        Ok(true)
    }
}
