//! Bakehouse
//!
//! Cart pricing, variation selection and order composition for a small bakery storefront.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod selections;
