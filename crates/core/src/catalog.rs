//! Catalog presentation

use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Pseudo-category selecting every product.
pub const ALL_PRODUCTS: &str = "All Products";

/// Group name for products without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Category and free-text search applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Category to show; `None` or [`ALL_PRODUCTS`] shows everything.
    #[serde(default)]
    pub category: Option<String>,

    /// Case-insensitive search text.
    #[serde(default)]
    pub search: Option<String>,
}

impl CatalogQuery {
    /// The selected category, or [`ALL_PRODUCTS`].
    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(ALL_PRODUCTS)
    }

    /// Whether `product` passes the category and search filters.
    pub fn matches(&self, product: &Product) -> bool {
        let category = self.category();
        let in_category = category == ALL_PRODUCTS || product.category == category;

        in_category && self.search.as_deref().is_none_or(|search| matches_search(product, search))
    }
}

/// A named group of products for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    /// Group heading.
    pub name: String,

    /// Products in display order.
    pub products: Vec<Product>,
}

/// [`ALL_PRODUCTS`] followed by every distinct non-empty category, in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_PRODUCTS.to_string()];

    for product in products {
        if !product.category.is_empty() && !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }

    categories
}

/// Number of products per category; uncategorized products count under [`UNCATEGORIZED`].
pub fn category_counts(products: &[Product]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for product in products {
        *counts.entry(group_name(product).to_string()).or_default() += 1;
    }

    counts
}

/// Products matching `query`, in catalog order.
pub fn filter<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| query.matches(product))
        .collect()
}

/// Arrange products for display.
///
/// Under [`ALL_PRODUCTS`] products are grouped by category with groups in alphabetical
/// order. Any other category yields a single group. Within a group the newest products come
/// first, then the rest by title.
pub fn arrange(products: Vec<Product>, category: &str) -> Vec<CategoryGroup> {
    if category != ALL_PRODUCTS {
        let mut products = products;
        products.sort_by(display_order);

        return vec![CategoryGroup {
            name: category.to_string(),
            products,
        }];
    }

    let mut groups: BTreeMap<String, Vec<Product>> = BTreeMap::new();

    for product in products {
        groups
            .entry(group_name(&product).to_string())
            .or_default()
            .push(product);
    }

    groups
        .into_iter()
        .map(|(name, mut products)| {
            products.sort_by(display_order);
            CategoryGroup { name, products }
        })
        .collect()
}

fn group_name(product: &Product) -> &str {
    if product.category.is_empty() {
        UNCATEGORIZED
    } else {
        &product.category
    }
}

fn display_order(a: &Product, b: &Product) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(a_created), Some(b_created)) => b_created
            .cmp(&a_created)
            .then_with(|| compare_titles(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_titles(a, b),
    }
}

fn compare_titles(a: &Product, b: &Product) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

fn matches_search(product: &Product, search: &str) -> bool {
    let search = search.trim().to_lowercase();

    if search.is_empty() {
        return true;
    }

    let fields = [
        product.title.to_lowercase(),
        product.description.to_lowercase(),
        product.category.to_lowercase(),
    ];

    if fields.iter().any(|field| field.contains(&search)) {
        return true;
    }

    search.split_whitespace().any(|term| {
        fields
            .iter()
            .flat_map(|field| field.split_whitespace())
            .any(|word| word.contains(term))
    })
}
