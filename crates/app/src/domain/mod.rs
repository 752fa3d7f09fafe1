//! Storefront domain: catalog products and promotion banners.

pub mod products;
pub mod promotions;
