//! Create Promotion Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bakehouse_app::domain::promotions::data::NewPromotion;

use crate::{
    extensions::*,
    promotions::handlers::{PromotionResponse, parse_expiry},
    promotions::errors::into_status_error,
    state::State,
};

/// Create Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePromotionRequest {
    /// Banner text
    #[serde(default)]
    pub message: String,

    /// Defaults to true
    pub active: Option<bool>,

    /// Optional expiry time, RFC 3339
    pub expires_at: Option<String>,
}

impl TryFrom<CreatePromotionRequest> for NewPromotion {
    type Error = StatusError;

    fn try_from(request: CreatePromotionRequest) -> Result<Self, Self::Error> {
        Ok(NewPromotion {
            active: request.active.unwrap_or(true),
            expires_at: parse_expiry(request.expires_at)?,
            ..NewPromotion::new(request.message)
        })
    }
}

/// Create Promotion Handler
#[endpoint(
    tags("promotions"),
    summary = "Create Promotion",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Promotion created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Message is required"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotion = state
        .app
        .promotions
        .create_promotion(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/promotions/{}", promotion.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(promotion.into()))
}
