//! Bakehouse prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CART_KEY, Cart, CartEvent, CartLine, CartStorage, CartStore, CartStoreError, FileStorage,
        MemoryStorage, SelectedVariation, StorageError,
    },
    catalog::{
        ALL_PRODUCTS, CatalogQuery, CategoryGroup, UNCATEGORIZED, arrange, categories,
        category_counts, filter,
    },
    orders::{
        Checkout, CheckoutError, DEFAULT_CURRENCY, DeferredOpener, LinkOpener,
        OrderValidationError, SubmittedOrder, render_message, validate, whatsapp_link,
    },
    pricing::{cart_total, format_amount, has_promotion, line_total, unit_price},
    products::{PriceDisplay, PricingScheme, Product, VariationCategory, VariationOption},
    selections::{LEGACY_TYPE_KEY, SelectionKey, select_option, selected_labels},
};
