//! Update Promotion Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use bakehouse_app::domain::promotions::data::PromotionUpdate;

use crate::{
    extensions::*,
    promotions::errors::into_status_error,
    promotions::handlers::{PromotionResponse, parse_expiry},
    state::State,
};

/// Update Promotion Request
///
/// Omitted fields are left unchanged; `"expiresAt": null` clears the expiry.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePromotionRequest {
    pub message: Option<String>,

    pub active: Option<bool>,

    #[serde(default, deserialize_with = "present")]
    #[salvo(schema(value_type = Option<String>))]
    pub expires_at: Option<Option<String>>,
}

/// Distinguish an explicit `null` from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl TryFrom<UpdatePromotionRequest> for PromotionUpdate {
    type Error = StatusError;

    fn try_from(request: UpdatePromotionRequest) -> Result<Self, Self::Error> {
        Ok(PromotionUpdate {
            message: request.message,
            active: request.active,
            expires_at: request.expires_at.map(parse_expiry).transpose()?,
        })
    }
}

/// Update Promotion Handler
#[endpoint(
    tags("promotions"),
    summary = "Update Promotion",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    json: JsonBody<UpdatePromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotion = state
        .app
        .promotions
        .update_promotion(promotion.into_inner().into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
