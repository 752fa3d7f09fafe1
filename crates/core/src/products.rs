//! Products

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

/// A selectable choice: an option within a variation category, or a legacy product type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationOption {
    /// Display label, e.g. "Large" or "Gluten Free".
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,

    /// Absolute unit price of the line when this option is selected.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::arbitrary_precision::serialize",
        deserialize_with = "lenient_price"
    )]
    pub price: Decimal,
}

impl VariationOption {
    /// Create a new option with the given label and price.
    pub fn new(label: impl Into<String>, price: Decimal) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }
}

/// A named dimension of product customization, e.g. "Size".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationCategory {
    /// Category name, unique within a product.
    pub name: String,

    /// Mutually exclusive options, in display order.
    #[serde(default, deserialize_with = "nullable")]
    pub options: Vec<VariationOption>,
}

impl VariationCategory {
    /// Create a new variation category.
    pub fn new(name: impl Into<String>, options: impl Into<Vec<VariationOption>>) -> Self {
        Self {
            name: name.into(),
            options: options.into(),
        }
    }

    /// Find an option by its label.
    pub fn option(&self, label: &str) -> Option<&VariationOption> {
        self.options.iter().find(|option| option.label == label)
    }

    fn cheapest(&self) -> Option<Decimal> {
        self.options.iter().map(|option| option.price).min()
    }
}

/// Catalog product, as read from the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Display description.
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,

    /// Base unit price; absent for variation-priced or weight-priced products.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price: Option<Decimal>,

    /// Promotional unit price.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub sale: Option<Decimal>,

    /// Free-text category label used for grouping.
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,

    /// Public image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Variation categories, in declaration order.
    #[serde(
        default,
        alias = "variation_categories",
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub variation_categories: Vec<VariationCategory>,

    /// Legacy single-dimension types.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<VariationOption>,

    /// Creation time, used to order products newest-first.
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// How a product's line price is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingScheme<'a> {
    /// Priced from `price`/`sale` (or by weight when no price is set).
    Flat,

    /// Priced from one of the legacy types.
    LegacyTypes(&'a [VariationOption]),

    /// Priced from the sum of one option per variation category.
    Variations(&'a [VariationCategory]),
}

/// Price presentation for a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceDisplay {
    /// An active promotion.
    Promotional {
        /// Base price.
        price: Decimal,
        /// Promotional price.
        sale: Decimal,
        /// Whole-percent discount.
        percent_off: Decimal,
    },

    /// A plain base price.
    Fixed {
        /// Base price.
        price: Decimal,
    },

    /// Cheapest combination of variation options.
    FromVariations {
        /// Lowest possible line price.
        from: Decimal,
    },

    /// No price on record; sold by weight.
    ByWeight,
}

impl Product {
    /// Create a product with the given identifier, title and optional base price.
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Option<Decimal>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            sale: None,
            category: String::new(),
            image: None,
            variation_categories: Vec::new(),
            types: Vec::new(),
            created_at: None,
        }
    }

    /// Set the promotional price.
    #[must_use]
    pub fn with_sale(mut self, sale: Decimal) -> Self {
        self.sale = Some(sale);
        self
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the variation categories.
    #[must_use]
    pub fn with_variations(mut self, categories: impl Into<Vec<VariationCategory>>) -> Self {
        self.variation_categories = categories.into();
        self
    }

    /// Set the legacy types.
    #[must_use]
    pub fn with_types(mut self, types: impl Into<Vec<VariationOption>>) -> Self {
        self.types = types.into();
        self
    }

    /// Resolve the pricing scheme. Variation categories win over legacy types.
    pub fn pricing_scheme(&self) -> PricingScheme<'_> {
        if !self.variation_categories.is_empty() {
            PricingScheme::Variations(&self.variation_categories)
        } else if !self.types.is_empty() {
            PricingScheme::LegacyTypes(&self.types)
        } else {
            PricingScheme::Flat
        }
    }

    /// Whether the product declares legacy types.
    pub fn has_legacy_types(&self) -> bool {
        !self.types.is_empty()
    }

    /// Find a declared variation category by name.
    pub fn variation_category(&self, name: &str) -> Option<&VariationCategory> {
        self.variation_categories
            .iter()
            .find(|category| category.name == name)
    }

    /// Find a legacy type by label.
    pub fn legacy_type(&self, label: &str) -> Option<&VariationOption> {
        self.types.iter().find(|option| option.label == label)
    }

    /// The promotional price, when a promotion is active.
    ///
    /// A promotion is active when `sale` is positive and strictly below a present `price`.
    pub fn promotional_price(&self) -> Option<Decimal> {
        match (self.price, self.sale) {
            (Some(price), Some(sale)) if sale > Decimal::ZERO && sale < price => Some(sale),
            _ => None,
        }
    }

    /// Whether the product has an active promotion.
    pub fn has_active_promotion(&self) -> bool {
        self.promotional_price().is_some()
    }

    /// How the product's price should be presented.
    pub fn price_display(&self) -> PriceDisplay {
        match self.pricing_scheme() {
            PricingScheme::Variations(categories) => PriceDisplay::FromVariations {
                from: categories
                    .iter()
                    .filter_map(VariationCategory::cheapest)
                    .sum(),
            },
            PricingScheme::LegacyTypes(types) => PriceDisplay::FromVariations {
                from: types
                    .iter()
                    .map(|option| option.price)
                    .min()
                    .unwrap_or_default(),
            },
            PricingScheme::Flat => match (self.price, self.promotional_price()) {
                (Some(price), Some(sale)) => PriceDisplay::Promotional {
                    price,
                    sale,
                    percent_off: ((price - sale) / price * Decimal::ONE_HUNDRED)
                        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
                },
                (Some(price), None) if price > Decimal::ZERO => PriceDisplay::Fixed { price },
                _ => PriceDisplay::ByWeight,
            },
        }
    }
}

/// Deserialize a value, treating `null` as the type's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Prices may be numbers, numeric strings or null; null counts as zero.
fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(rust_decimal::serde::arbitrary_precision_option::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    fn sizes() -> VariationCategory {
        VariationCategory::new(
            "Size",
            [
                VariationOption::new("Small", dec!(10)),
                VariationOption::new("Large", dec!(15)),
            ],
        )
    }

    #[test]
    fn promotion_requires_sale_below_price() {
        let on_sale = Product::new("1", "Brownie", Some(dec!(20))).with_sale(dec!(15));
        let equal = Product::new("2", "Cookie", Some(dec!(20))).with_sale(dec!(20));
        let zero = Product::new("3", "Tart", Some(dec!(20))).with_sale(Decimal::ZERO);
        let no_price = Product::new("4", "Bread", None).with_sale(dec!(5));

        assert_eq!(on_sale.promotional_price(), Some(dec!(15)));
        assert_eq!(equal.promotional_price(), None);
        assert_eq!(zero.promotional_price(), None);
        assert_eq!(no_price.promotional_price(), None);
    }

    #[test]
    fn variations_win_over_legacy_types() {
        let product = Product::new("1", "Cake", None)
            .with_types([VariationOption::new("Normal", dec!(30))])
            .with_variations([sizes()]);

        assert!(matches!(
            product.pricing_scheme(),
            PricingScheme::Variations(categories) if categories.len() == 1
        ));
    }

    #[test]
    fn flat_product_has_flat_scheme() {
        let product = Product::new("1", "Loaf", Some(dec!(8)));

        assert_eq!(product.pricing_scheme(), PricingScheme::Flat);
    }

    #[test]
    fn price_display_variants() {
        let promo = Product::new("1", "Brownie", Some(dec!(20))).with_sale(dec!(15));
        let fixed = Product::new("2", "Loaf", Some(dec!(8)));
        let by_weight = Product::new("3", "Sourdough", None);
        let sized = Product::new("4", "Cake", None).with_variations([
            sizes(),
            VariationCategory::new(
                "Flavor",
                [
                    VariationOption::new("Chocolate", dec!(2)),
                    VariationOption::new("Vanilla", dec!(1)),
                ],
            ),
        ]);

        assert_eq!(
            promo.price_display(),
            PriceDisplay::Promotional {
                price: dec!(20),
                sale: dec!(15),
                percent_off: dec!(25),
            }
        );
        assert_eq!(fixed.price_display(), PriceDisplay::Fixed { price: dec!(8) });
        assert_eq!(by_weight.price_display(), PriceDisplay::ByWeight);
        assert_eq!(
            sized.price_display(),
            PriceDisplay::FromVariations { from: dec!(11) }
        );
    }

    #[test]
    fn deserializes_catalog_record() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "b7c1",
                "title": "Layer Cake",
                "description": null,
                "price": null,
                "sale": 12.5,
                "category": "Cakes",
                "variation_categories": [
                    {"id": "x", "name": "Size", "options": [{"id": "y", "label": "Large", "price": "15.5"}]}
                ],
                "created_at": "2025-03-01T10:00:00Z"
            }"#,
        )?;

        assert_eq!(product.description, "");
        assert_eq!(product.price, None);
        assert_eq!(product.sale, Some(dec!(12.5)));
        assert_eq!(product.variation_categories.len(), 1);
        assert_eq!(
            product.variation_category("Size").and_then(|c| c.option("Large")),
            Some(&VariationOption::new("Large", dec!(15.5)))
        );
        assert!(product.created_at.is_some());

        Ok(())
    }

    #[test]
    fn null_option_price_counts_as_zero() -> TestResult {
        let option: VariationOption = serde_json::from_str(r#"{"label": "Plain", "price": null}"#)?;

        assert_eq!(option.price, Decimal::ZERO);

        Ok(())
    }
}
