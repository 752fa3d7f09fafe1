//! Storefront Errors

use bakehouse::{cart::CartStoreError, orders::CheckoutError};
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub(crate) enum StorefrontError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartStoreError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("No product with id \"{0}\"")]
    UnknownProduct(String),

    #[error("No line {0} in the cart")]
    InvalidLine(usize),

    #[error("\"{product}\" has no option \"{label}\" for {key}")]
    UnknownOption {
        product: String,
        key: String,
        label: String,
    },

    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("WHATSAPP_NUMBER is required to check out")]
    MissingDestination,
}
