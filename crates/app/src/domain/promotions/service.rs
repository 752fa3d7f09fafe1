//! Promotions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::promotions::{
        data::{NewPromotion, PromotionUpdate},
        errors::PromotionsServiceError,
        records::{PromotionRecord, PromotionUuid},
        repository::PgPromotionsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    async fn list_promotions(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotions = self.repository.list_promotions(&mut tx).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    async fn list_active(
        &self,
        now: Timestamp,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotions = self.repository.list_active_promotions(&mut tx, now).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let promotion = promotion.validated()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_promotion(&mut tx, &promotion).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_promotion(
        &self,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let update = update.validated()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_promotion(&mut tx, promotion, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_promotion(&self, promotion: PromotionUuid) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_promotion(&mut tx, promotion).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Retrieves all promotions, newest first.
    async fn list_promotions(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    /// Retrieves promotions that are active and unexpired at `now`, newest first.
    async fn list_active(
        &self,
        now: Timestamp,
    ) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    /// Creates a promotion.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Applies a partial update.
    async fn update_promotion(
        &self,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Deletes a promotion.
    async fn delete_promotion(&self, promotion: PromotionUuid) -> Result<(), PromotionsServiceError>;
}
