//! List Promotions Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, handlers::PromotionResponse},
    state::State,
};

/// List Promotions Handler
///
/// With `active=true` only banners that are switched on and not yet expired are returned.
#[endpoint(
    tags("promotions"),
    summary = "List Promotions",
    responses(
        (status_code = StatusCode::OK, description = "Promotions, newest first"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    active: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<PromotionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let promotions = &state.app.promotions;

    let records = if active.into_inner().unwrap_or_default() {
        promotions.list_active(Timestamp::now()).await
    } else {
        promotions.list_promotions().await
    }
    .map_err(into_status_error)?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bakehouse_app::domain::promotions::MockPromotionsService;

    use crate::test_helpers::{make_promotion, promotions_service};

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        promotions_service(promotions, Router::with_path("promotions").get(handler))
    }

    #[tokio::test]
    async fn test_list_all_promotions() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_list_active().never();
        promotions.expect_list_promotions().once().return_once(|| {
            Ok(vec![
                make_promotion("Free delivery", true),
                make_promotion("Closed Monday", false),
            ])
        });

        let mut res = TestClient::get("http://example.com/promotions")
            .send(&make_service(promotions))
            .await;

        let body: Vec<PromotionResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_active_promotions_uses_current_time() -> TestResult {
        let before = Timestamp::now();

        let mut promotions = MockPromotionsService::new();

        promotions.expect_list_promotions().never();
        promotions
            .expect_list_active()
            .once()
            .withf(move |now| *now >= before)
            .return_once(|_| Ok(vec![make_promotion("Free delivery", true)]));

        let mut res = TestClient::get("http://example.com/promotions?active=true")
            .send(&make_service(promotions))
            .await;

        let body: Vec<PromotionResponse> = res.take_json().await?;

        assert_eq!(
            body.first().map(|promotion| promotion.message.as_str()),
            Some("Free delivery")
        );

        Ok(())
    }
}
