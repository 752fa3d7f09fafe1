//! Promotion Handlers

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakehouse_app::domain::promotions::records::PromotionRecord;

use crate::extensions::*;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

/// Promotion Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionResponse {
    pub uuid: Uuid,

    /// Banner text
    pub message: String,

    pub active: bool,

    /// Expiry time, RFC 3339
    pub expires_at: Option<String>,

    pub created_at: String,
}

impl From<PromotionRecord> for PromotionResponse {
    fn from(promotion: PromotionRecord) -> Self {
        Self {
            uuid: promotion.uuid.into(),
            message: promotion.message,
            active: promotion.active,
            expires_at: promotion.expires_at.map(|at| at.to_string()),
            created_at: promotion.created_at.to_string(),
        }
    }
}

pub(super) fn parse_expiry(expires_at: Option<String>) -> Result<Option<Timestamp>, StatusError> {
    expires_at
        .filter(|at| !at.trim().is_empty())
        .map(|at| at.trim().parse::<Timestamp>())
        .transpose()
        .or_400("Invalid expiry time")
}
