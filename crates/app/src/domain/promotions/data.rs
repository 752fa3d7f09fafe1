//! Promotions Data

use jiff::Timestamp;

use crate::domain::promotions::{PromotionsServiceError, records::PromotionUuid};

/// New Promotion Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub message: String,
    pub active: bool,
    pub expires_at: Option<Timestamp>,
}

impl NewPromotion {
    /// An active promotion with no expiry.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            uuid: PromotionUuid::new(),
            message: message.into(),
            active: true,
            expires_at: None,
        }
    }

    pub(crate) fn validated(mut self) -> Result<Self, PromotionsServiceError> {
        self.message = required_message(&self.message)?;

        Ok(self)
    }
}

/// Promotion Update Data
///
/// Absent fields are left unchanged; `expires_at: Some(None)` clears the expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionUpdate {
    pub message: Option<String>,
    pub active: Option<bool>,
    pub expires_at: Option<Option<Timestamp>>,
}

impl PromotionUpdate {
    pub(crate) fn validated(mut self) -> Result<Self, PromotionsServiceError> {
        if let Some(message) = &self.message {
            self.message = Some(required_message(message)?);
        }

        Ok(self)
    }
}

fn required_message(message: &str) -> Result<String, PromotionsServiceError> {
    let message = message.trim();

    if message.is_empty() {
        return Err(PromotionsServiceError::MissingMessage);
    }

    Ok(message.to_string())
}
