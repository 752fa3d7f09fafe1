//! Promotions Records

use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// A storefront-wide banner message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    pub message: String,
    pub active: bool,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl PromotionRecord {
    /// Whether the banner should be shown at `now`.
    pub fn is_visible(&self, now: Timestamp) -> bool {
        self.active && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}
