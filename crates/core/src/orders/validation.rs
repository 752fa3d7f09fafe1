//! Order validation

use thiserror::Error;

use crate::{cart::Cart, selections};

/// Reasons a cart is not ready to be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    /// Customer name or phone is blank.
    #[error("Please fill in name and phone to continue")]
    MissingContact,

    /// A product with legacy types has no type chosen.
    #[error("Please select a type for \"{product}\"")]
    MissingType {
        /// Product title.
        product: String,
    },

    /// A product with variation categories has nothing chosen.
    #[error("Please select variations for \"{product}\"")]
    MissingVariations {
        /// Product title.
        product: String,
    },

    /// A product with variation categories has some left unchosen.
    #[error("Please select all variations for \"{product}\"")]
    IncompleteVariations {
        /// Product title.
        product: String,
        /// Unselected category names, in declaration order.
        missing: Vec<String>,
    },
}

/// Check that the contact details are present and every line has its selections made.
///
/// The first failure found is returned, in cart order. Within a line a missing legacy type
/// is reported before any variation check.
///
/// # Errors
///
/// Returns the first reason the cart cannot be ordered.
pub fn validate(cart: &Cart, name: &str, phone: &str) -> Result<(), OrderValidationError> {
    if name.trim().is_empty() || phone.trim().is_empty() {
        return Err(OrderValidationError::MissingContact);
    }

    for line in cart.lines() {
        let product = || line.product.title.clone();

        if line.product.has_legacy_types() && !line.has_selection() {
            return Err(OrderValidationError::MissingType { product: product() });
        }

        if line.product.variation_categories.is_empty() {
            continue;
        }

        if line.selected_variations.is_empty() {
            return Err(OrderValidationError::MissingVariations { product: product() });
        }

        let missing = selections::missing_categories(line);

        if !missing.is_empty() {
            return Err(OrderValidationError::IncompleteVariations {
                product: product(),
                missing,
            });
        }
    }

    Ok(())
}
