//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::{products::PgProductsService, promotions::PgPromotionsService},
    storage::MockImageStorage,
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub promotions: PgPromotionsService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let db = TestDb::new().await;

        Self {
            promotions: PgPromotionsService::new(Db::new(db.pool().clone())),
            db,
        }
    }

    /// A products service backed by this database and the given image storage mock.
    pub(crate) fn products(&self, images: MockImageStorage) -> PgProductsService {
        PgProductsService::new(Db::new(self.db.pool().clone()), Arc::new(images))
    }
}
