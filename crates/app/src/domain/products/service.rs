//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductDetails, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
    storage::{ImageStorage, ImageUpload},
};

#[derive(Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    images: Arc<dyn ImageStorage>,
}

impl std::fmt::Debug for PgProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, images: Arc<dyn ImageStorage>) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            images,
        }
    }

    async fn upload(&self, image: Option<ImageUpload>) -> Result<Option<String>, ProductsServiceError> {
        match image {
            Some(image) => Ok(Some(self.images.upload(image).await?)),
            None => Ok(None),
        }
    }

    /// Remove an image whose product row is gone or was never written.
    async fn discard_image(&self, url: &str) {
        if let Err(error) = self.images.remove(url).await {
            warn!(%url, %error, "failed to remove product image");
        }
    }

    async fn insert(
        &self,
        product: ProductUuid,
        details: &ProductDetails,
        image: Option<&str>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product, details, image)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn replace(
        &self,
        product: ProductUuid,
        details: &ProductDetails,
        image: Option<&str>,
    ) -> Result<(ProductRecord, Option<String>), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let previous = self.repository.get_product(&mut tx, product).await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, details, image)
            .await?;

        tx.commit().await?;

        Ok((updated, previous.image))
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, ProductsServiceError> {
        let details = product.details.normalized()?;
        let image = self.upload(product.image).await?;

        let result = self.insert(product.uuid, &details, image.as_deref()).await;

        match (&result, &image) {
            (Ok(created), _) => info!(product = %created.uuid, "created product"),
            (Err(_), Some(url)) => self.discard_image(url).await,
            (Err(_), None) => {}
        }

        result
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let details = update.details.normalized()?;
        let image = self.upload(update.image).await?;

        match self.replace(product, &details, image.as_deref()).await {
            Ok((updated, previous)) => {
                if let Some(previous) = previous
                    && image.is_some()
                    && updated.image.as_deref() != Some(previous.as_str())
                {
                    self.discard_image(&previous).await;
                }

                Ok(updated)
            }
            Err(error) => {
                if let Some(url) = &image {
                    self.discard_image(url).await;
                }

                Err(error)
            }
        }
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(image) = self.repository.delete_product(&mut tx, product).await? else {
            return Err(ProductsServiceError::NotFound);
        };

        tx.commit().await?;

        if let Some(url) = image {
            self.discard_image(&url).await;
        }

        info!(%product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product, uploading its image first.
    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, ProductsServiceError>;

    /// Updates a product; the stored image is kept when the update carries none.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product and its stored image.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use bakehouse::products::{VariationCategory, VariationOption};
    use rust_decimal::dec;
    use testresult::TestResult;

    use crate::{storage::MockImageStorage, test::TestContext};

    use super::*;

    fn details(title: &str) -> ProductDetails {
        ProductDetails {
            title: title.to_string(),
            description: "Freshly baked".to_string(),
            category: "Bread".to_string(),
            price: Some(dec!(12.5)),
            ..ProductDetails::default()
        }
    }

    fn image() -> ImageUpload {
        ImageUpload::from_file_name("loaf.png", Some("image/png".to_string()), vec![0x89])
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn create_product_persists_details() -> TestResult {
        let ctx = TestContext::new().await;
        let products = ctx.products(MockImageStorage::new());
        let uuid = ProductUuid::new();

        let created = products
            .create_product(NewProduct {
                uuid,
                details: details("Sourdough"),
                image: None,
            })
            .await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.price, Some(dec!(12.5)));
        assert!(created.image.is_none());

        let fetched = products.get_product(uuid).await?;

        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn create_product_with_variations_drops_price() -> TestResult {
        let ctx = TestContext::new().await;
        let products = ctx.products(MockImageStorage::new());

        let created = products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: ProductDetails {
                    variation_categories: vec![VariationCategory::new(
                        "Size",
                        [
                            VariationOption::new("Small", dec!(10)),
                            VariationOption::new("Large", dec!(15)),
                        ],
                    )],
                    ..details("Celebration Cake")
                },
                image: None,
            })
            .await?;

        assert_eq!(created.price, None);
        assert_eq!(created.variation_categories.len(), 1);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn list_products_returns_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let products = ctx.products(MockImageStorage::new());

        for title in ["First", "Second", "Third"] {
            products
                .create_product(NewProduct {
                    uuid: ProductUuid::new(),
                    details: details(title),
                    image: None,
                })
                .await?;
        }

        let titles: Vec<_> = products
            .list_products()
            .await?
            .into_iter()
            .map(|product| product.title)
            .collect();

        assert_eq!(titles, ["Third", "Second", "First"]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn update_without_image_keeps_existing_image() -> TestResult {
        let ctx = TestContext::new().await;

        let mut images = MockImageStorage::new();
        images
            .expect_upload()
            .once()
            .return_once(|_| Ok("https://store.example/upload/events/loaf.png".to_string()));
        images.expect_remove().never();

        let products = ctx.products(images);
        let uuid = ProductUuid::new();

        products
            .create_product(NewProduct {
                uuid,
                details: details("Loaf"),
                image: Some(image()),
            })
            .await?;

        let updated = products
            .update_product(
                uuid,
                ProductUpdate {
                    details: details("Country Loaf"),
                    image: None,
                },
            )
            .await?;

        assert_eq!(updated.title, "Country Loaf");
        assert_eq!(
            updated.image.as_deref(),
            Some("https://store.example/upload/events/loaf.png")
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn update_unknown_product_discards_uploaded_image() {
        let ctx = TestContext::new().await;

        let mut images = MockImageStorage::new();
        images
            .expect_upload()
            .once()
            .return_once(|_| Ok("https://store.example/upload/events/new.png".to_string()));
        images
            .expect_remove()
            .once()
            .withf(|url| url.ends_with("/events/new.png"))
            .return_once(|_| Ok(true));

        let result = ctx
            .products(images)
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    details: details("Ghost"),
                    image: Some(image()),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn delete_product_removes_row_and_image() -> TestResult {
        let ctx = TestContext::new().await;

        let mut images = MockImageStorage::new();
        images
            .expect_upload()
            .once()
            .return_once(|_| Ok("https://store.example/upload/events/tart.png".to_string()));
        images
            .expect_remove()
            .once()
            .withf(|url| url.ends_with("/events/tart.png"))
            .return_once(|_| Ok(true));

        let products = ctx.products(images);
        let uuid = ProductUuid::new();

        products
            .create_product(NewProduct {
                uuid,
                details: details("Tart"),
                image: Some(image()),
            })
            .await?;

        products.delete_product(uuid).await?;

        let result = products.get_product(uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn delete_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products(MockImageStorage::new())
            .delete_product(ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_details_never_touch_storage() {
        let service = PgProductsService::new(
            Db::new(sqlx::PgPool::connect_lazy("postgres://localhost/unused").expect("lazy pool")),
            Arc::new({
                let mut images = MockImageStorage::new();
                images.expect_upload().never();
                images
            }),
        );

        let result = service
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: ProductDetails::default(),
                image: Some(image()),
            })
            .await;

        assert!(matches!(result, Err(ProductsServiceError::MissingRequiredData)));
    }
}
