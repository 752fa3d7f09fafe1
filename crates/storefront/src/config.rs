//! Storefront Config

use std::path::PathBuf;

use clap::Args;
use rusty_money::{Findable, iso::Currency};

use crate::errors::StorefrontError;

/// Storefront settings.
#[derive(Debug, Args)]
pub(crate) struct StorefrontConfig {
    /// Base URL of the catalog API
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:4080")]
    pub api_url: String,

    /// Directory holding the persisted cart
    #[arg(long, env = "CART_DIR", default_value = ".bakehouse")]
    pub cart_dir: PathBuf,

    /// WhatsApp number receiving orders, digits only
    #[arg(long, env = "WHATSAPP_NUMBER", default_value = "")]
    pub whatsapp_number: String,

    /// ISO 4217 code used for prices
    #[arg(long, env = "STORE_CURRENCY", default_value = "MYR")]
    pub store_currency: String,
}

impl StorefrontConfig {
    /// Resolve the configured currency.
    pub(crate) fn currency(&self) -> Result<&'static Currency, StorefrontError> {
        Currency::find(&self.store_currency.trim().to_ascii_uppercase())
            .ok_or_else(|| StorefrontError::UnknownCurrency(self.store_currency.clone()))
    }
}
