//! Products Data

use bakehouse::products::{VariationCategory, VariationOption};
use rust_decimal::Decimal;

use crate::{
    domain::products::{ProductsServiceError, records::ProductUuid},
    storage::ImageUpload,
};

/// Editable product fields, shared by creation and updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetails {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Option<Decimal>,
    pub sale: Option<Decimal>,
    pub variation_categories: Vec<VariationCategory>,
    pub types: Vec<VariationOption>,
}

impl ProductDetails {
    /// Trim and validate the fields.
    ///
    /// Title, description and category must be non-blank. Variation categories without a
    /// name or without any labelled option are dropped, and the base price is discarded
    /// whenever variation categories remain.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::MissingRequiredData`] for blank required fields and
    /// [`ProductsServiceError::InvalidData`] for negative prices.
    pub fn normalized(self) -> Result<Self, ProductsServiceError> {
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let category = self.category.trim().to_string();

        if title.is_empty() || description.is_empty() || category.is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let negative = [self.price, self.sale]
            .into_iter()
            .flatten()
            .chain(self.types.iter().map(|option| option.price))
            .chain(
                self.variation_categories
                    .iter()
                    .flat_map(|category| &category.options)
                    .map(|option| option.price),
            )
            .any(|price| price.is_sign_negative());

        if negative {
            return Err(ProductsServiceError::InvalidData);
        }

        let variation_categories = normalize_variations(self.variation_categories);

        let price = if variation_categories.is_empty() {
            self.price
        } else {
            None
        };

        let types = self
            .types
            .into_iter()
            .filter(|option| !option.label.trim().is_empty())
            .collect();

        Ok(Self {
            title,
            description,
            category,
            price,
            sale: self.sale,
            variation_categories,
            types,
        })
    }
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
    pub image: Option<ImageUpload>,
}

/// Product Update Data
///
/// Without an image the stored image is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub details: ProductDetails,
    pub image: Option<ImageUpload>,
}

fn normalize_variations(categories: Vec<VariationCategory>) -> Vec<VariationCategory> {
    let mut normalized: Vec<VariationCategory> = Vec::with_capacity(categories.len());

    for category in categories {
        let name = category.name.trim();

        if name.is_empty() || normalized.iter().any(|existing| existing.name == name) {
            continue;
        }

        let options: Vec<_> = category
            .options
            .into_iter()
            .filter(|option| !option.label.trim().is_empty())
            .map(|option| VariationOption::new(option.label.trim(), option.price))
            .collect();

        if !options.is_empty() {
            normalized.push(VariationCategory::new(name, options));
        }
    }

    normalized
}
