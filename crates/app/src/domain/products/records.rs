//! Product Records

use bakehouse::products::{Product, VariationCategory, VariationOption};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Option<Decimal>,
    pub sale: Option<Decimal>,
    pub image: Option<String>,
    pub variation_categories: Vec<VariationCategory>,
    pub types: Vec<VariationOption>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.uuid.to_string(),
            title: record.title,
            description: record.description,
            price: record.price,
            sale: record.sale,
            category: record.category,
            image: record.image,
            variation_categories: record.variation_categories,
            types: record.types,
            created_at: Some(record.created_at),
        }
    }
}
