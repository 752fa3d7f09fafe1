//! Catalog client
//!
//! Reads products and promotion banners from the JSON API.

use async_trait::async_trait;
use bakehouse::{catalog::CatalogQuery, products::Product};
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A storefront-wide banner message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Banner {
    pub message: String,
}

#[automock]
#[async_trait]
pub(crate) trait Catalog: Send + Sync {
    /// Products matching `query`, in display order.
    async fn products(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError>;

    /// A single product, `None` when it does not exist.
    async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError>;

    /// Banners that are switched on and not yet expired.
    async fn banners(&self) -> Result<Vec<Banner>, CatalogError>;
}

/// Catalog backed by the JSON API.
#[derive(Debug, Clone)]
pub(crate) struct HttpCatalog {
    http: Client,
    base_url: String,
}

impl HttpCatalog {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CatalogError> {
        let body: Value = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        list_or_empty(path, body)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn products(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError> {
        let mut params = Vec::new();

        if let Some(category) = query.category.as_deref() {
            params.push(("category", category));
        }

        if let Some(search) = query.search.as_deref() {
            params.push(("search", search));
        }

        self.fetch_list("products", &params).await
    }

    async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        let response = self.http.get(self.url(&format!("products/{id}"))).send().await?;

        // Identifiers that are not UUIDs are rejected by the router before lookup.
        if matches!(response.status(), StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST) {
            return Ok(None);
        }

        Ok(Some(response.error_for_status()?.json().await?))
    }

    async fn banners(&self) -> Result<Vec<Banner>, CatalogError> {
        self.fetch_list("promotions", &[("active", "true")]).await
    }
}

/// Anything other than a JSON array is treated as an empty list.
fn list_or_empty<T: DeserializeOwned>(path: &str, body: Value) -> Result<Vec<T>, CatalogError> {
    if body.is_array() {
        return Ok(serde_json::from_value(body)?);
    }

    warn!(path, "expected a list from the catalog, showing nothing");

    Ok(Vec::new())
}
