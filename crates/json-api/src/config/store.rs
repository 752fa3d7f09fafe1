//! Store Config

use clap::Args;
use rusty_money::{Findable, iso::Currency};
use thiserror::Error;

/// Shop settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// ISO 4217 code used in order messages
    #[arg(long, env = "STORE_CURRENCY", default_value = "MYR")]
    pub store_currency: String,

    /// WhatsApp number receiving orders, digits only
    #[arg(long, env = "WHATSAPP_NUMBER")]
    pub whatsapp_number: String,
}

#[derive(Debug, Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(String);

impl StoreConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error when the code is not an ISO 4217 currency.
    pub fn currency(&self) -> Result<&'static Currency, UnknownCurrency> {
        Currency::find(&self.store_currency.trim().to_ascii_uppercase())
            .ok_or_else(|| UnknownCurrency(self.store_currency.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(code: &str) -> StoreConfig {
        StoreConfig {
            store_currency: code.to_string(),
            whatsapp_number: "60123456789".to_string(),
        }
    }

    #[test]
    fn resolves_codes_case_insensitively() {
        assert_eq!(
            store(" usd ").currency().map(|currency| currency.iso_alpha_code).ok(),
            Some("USD")
        );
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(store("XYZ1").currency().is_err());
    }
}
