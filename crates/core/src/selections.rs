//! Variation selection

use std::fmt;

use smallvec::SmallVec;

use crate::{
    cart::{CartLine, SelectedVariation},
    products::{PricingScheme, VariationOption},
};

/// Reserved category name addressing a product's legacy types.
pub const LEGACY_TYPE_KEY: &str = "type";

/// Which selection dimension of a line an option is chosen for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    /// The legacy single-type dimension.
    LegacyType,

    /// A named variation category.
    Category(String),
}

impl From<&str> for SelectionKey {
    fn from(name: &str) -> Self {
        if name == LEGACY_TYPE_KEY {
            Self::LegacyType
        } else {
            Self::Category(name.to_string())
        }
    }
}

impl From<String> for SelectionKey {
    fn from(name: String) -> Self {
        if name == LEGACY_TYPE_KEY {
            Self::LegacyType
        } else {
            Self::Category(name)
        }
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LegacyType => f.write_str(LEGACY_TYPE_KEY),
            Self::Category(name) => f.write_str(name),
        }
    }
}

/// Record a choice of `option` for `key` on the line.
///
/// The legacy type is replaced outright. A category already selected has its option replaced
/// in place, otherwise the selection is appended. Selections are never removed.
pub fn select_option(line: &mut CartLine, key: SelectionKey, option: VariationOption) {
    match key {
        SelectionKey::LegacyType => line.selected_type = Some(option),
        SelectionKey::Category(name) => {
            if let Some(existing) = line
                .selected_variations
                .iter_mut()
                .find(|selected| selected.category_name == name)
            {
                existing.option = option;
            } else {
                line.selected_variations
                    .push(SelectedVariation::new(name, option));
            }
        }
    }
}

/// Labels of the line's chosen options, variations taking precedence over the legacy type.
pub fn selected_labels(line: &CartLine) -> SmallVec<[&str; 4]> {
    if line.selected_variations.is_empty() {
        line.selected_type
            .iter()
            .map(|option| option.label.as_str())
            .collect()
    } else {
        line.selected_variations
            .iter()
            .map(|selected| selected.option.label.as_str())
            .collect()
    }
}

/// Declared variation categories the line has no selection for, in declaration order.
pub fn missing_categories(line: &CartLine) -> Vec<String> {
    match line.product.pricing_scheme() {
        PricingScheme::Variations(categories) => categories
            .iter()
            .filter(|category| line.selection_for(&category.name).is_none())
            .map(|category| category.name.clone())
            .collect(),
        PricingScheme::LegacyTypes(_) | PricingScheme::Flat => Vec::new(),
    }
}
