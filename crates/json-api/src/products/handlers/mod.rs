//! Product Handlers

use bakehouse::products::{Product, VariationCategory, VariationOption};
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use bakehouse_app::domain::products::records::ProductRecord;

pub(crate) mod catalog;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// A selectable option with its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationOptionResponse {
    pub label: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
}

impl From<VariationOption> for VariationOptionResponse {
    fn from(option: VariationOption) -> Self {
        Self {
            label: option.label,
            price: option.price,
        }
    }
}

/// A named group of options, one of which is chosen per cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationCategoryResponse {
    pub name: String,
    pub options: Vec<VariationOptionResponse>,
}

impl From<VariationCategory> for VariationCategoryResponse {
    fn from(category: VariationCategory) -> Self {
        Self {
            name: category.name,
            options: category.options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Product Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// Product identifier
    pub id: String,

    pub title: String,

    pub description: String,

    /// Base price; absent for products priced by variation
    #[serde(with = "rust_decimal::serde::float_option")]
    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Decimal>,

    /// Promotional price
    #[serde(with = "rust_decimal::serde::float_option")]
    #[salvo(schema(value_type = Option<f64>))]
    pub sale: Option<Decimal>,

    pub category: String,

    /// Public image URL
    pub image: Option<String>,

    pub variation_categories: Vec<VariationCategoryResponse>,

    /// Legacy single-choice options
    pub types: Vec<VariationOptionResponse>,

    /// Creation time, RFC 3339
    pub created_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            sale: product.sale,
            category: product.category,
            image: product.image,
            variation_categories: product
                .variation_categories
                .into_iter()
                .map(Into::into)
                .collect(),
            types: product.types.into_iter().map(Into::into).collect(),
            created_at: product.created_at.map(|at| at.to_string()),
        }
    }
}

impl From<ProductRecord> for ProductResponse {
    fn from(record: ProductRecord) -> Self {
        Product::from(record).into()
    }
}
