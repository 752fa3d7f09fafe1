//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthProviderClient, AuthProviderConfig, AuthService, ProviderAuthService},
    database::{self, Db},
    domain::{
        products::{PgProductsService, ProductsService},
        promotions::{PgPromotionsService, PromotionsService},
    },
    storage::{BucketStorageClient, ImageStorage, StorageConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Hosted backend providing authentication and object storage.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub bucket: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL and backend settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn connect(database_url: &str, backend: BackendConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let images: Arc<dyn ImageStorage> = Arc::new(BucketStorageClient::new(StorageConfig {
            url: backend.url.clone(),
            api_key: backend.api_key.clone(),
            bucket: backend.bucket,
        }));

        let provider = AuthProviderClient::new(AuthProviderConfig {
            url: backend.url,
            api_key: backend.api_key,
        });

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone(), images)),
            promotions: Arc::new(PgPromotionsService::new(db)),
            auth: Arc::new(ProviderAuthService::new(pool, provider)),
        })
    }
}
