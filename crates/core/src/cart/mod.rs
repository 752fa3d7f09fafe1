//! Cart

use serde::{Deserialize, Serialize};

use crate::{
    products::{Product, VariationOption},
    selections::{self, SelectionKey},
};

pub mod storage;
pub mod store;

pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CART_KEY, CartEvent, CartStore, CartStoreError};

/// A chosen option within a named variation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVariation {
    /// Name of the variation category.
    pub category_name: String,

    /// The chosen option.
    pub option: VariationOption,
}

impl SelectedVariation {
    /// Create a new selection.
    pub fn new(category_name: impl Into<String>, option: VariationOption) -> Self {
        Self {
            category_name: category_name.into(),
            option,
        }
    }
}

/// One product in the cart with its quantity and selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub product: Product,

    /// Number of units, at least one.
    pub quantity: u32,

    /// At most one entry per category name.
    #[serde(default)]
    pub selected_variations: Vec<SelectedVariation>,

    /// Legacy type selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_type: Option<VariationOption>,
}

impl CartLine {
    /// A fresh line: one unit, nothing selected.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
            selected_variations: Vec::new(),
            selected_type: None,
        }
    }

    /// Whether any variation or type has been chosen.
    pub fn has_selection(&self) -> bool {
        !self.selected_variations.is_empty() || self.selected_type.is_some()
    }

    /// The option selected for the named category.
    pub fn selection_for(&self, category_name: &str) -> Option<&VariationOption> {
        self.selected_variations
            .iter()
            .find(|selected| selected.category_name == category_name)
            .map(|selected| &selected.option)
    }
}

/// Ordered, index-addressed cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create a cart from existing lines.
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line at `index`.
    pub fn line(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Increment the line holding `product`, or append a new one.
    pub fn add_or_increment(&mut self, product: Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::new(product));
        }
    }

    /// Set a line's quantity. Quantities below one and unknown lines are ignored and
    /// return `false`.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity) else {
            return false;
        };

        if quantity < 1 {
            return false;
        }

        match self.lines.get_mut(index) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Select an option on a line. Returns `false` when the line does not exist.
    pub fn select_option(&mut self, index: usize, key: SelectionKey, option: VariationOption) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                selections::select_option(line, key, option);
                true
            }
            None => false,
        }
    }

    /// Remove a line, keeping the order of the rest.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn loaf() -> Product {
        Product::new("loaf", "Loaf", Some(dec!(8)))
    }

    #[test]
    fn adding_same_product_increments() {
        let mut cart = Cart::default();

        cart.add_or_increment(loaf());
        cart.add_or_increment(Product::new("bun", "Bun", Some(dec!(2))));
        cart.add_or_increment(loaf());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.line(0).map(|line| line.quantity), Some(2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn quantities_below_one_are_ignored() {
        let mut cart = Cart::default();
        cart.add_or_increment(loaf());

        assert!(!cart.set_quantity(0, 0));
        assert!(!cart.set_quantity(0, -1));
        assert!(!cart.set_quantity(3, 5));
        assert_eq!(cart.line(0).map(|line| line.quantity), Some(1));

        assert!(cart.set_quantity(0, 4));
        assert_eq!(cart.line(0).map(|line| line.quantity), Some(4));
    }

    #[test]
    fn remove_keeps_order() {
        let mut cart = Cart::default();
        for id in ["a", "b", "c"] {
            cart.add_or_increment(Product::new(id, id, None));
        }

        let removed = cart.remove_line(1);

        assert_eq!(removed.map(|line| line.product.id), Some("b".to_string()));
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(cart.remove_line(2).is_none());
    }

    #[test]
    fn serializes_as_array_of_camel_case_lines() -> TestResult {
        let mut cart = Cart::default();
        cart.add_or_increment(loaf());
        cart.select_option(0, "Size".into(), VariationOption::new("Large", dec!(15)));

        let json = serde_json::to_value(&cart)?;

        assert!(json.is_array());
        assert_eq!(json.pointer("/0/quantity"), Some(&json!(1)));
        assert_eq!(
            json.pointer("/0/selectedVariations/0/categoryName"),
            Some(&json!("Size"))
        );
        assert_eq!(
            json.pointer("/0/selectedVariations/0/option/price"),
            Some(&json!(15))
        );

        let back: Cart = serde_json::from_value(json)?;
        assert_eq!(back, cart);

        Ok(())
    }

    #[test]
    fn reads_lines_without_selections() -> TestResult {
        let cart: Cart = serde_json::from_str(
            r#"[{"product": {"id": "1", "title": "Bun", "price": 2}, "quantity": 3}]"#,
        )?;

        assert_eq!(cart.item_count(), 3);
        assert!(cart.line(0).is_some_and(|line| !line.has_selection()));

        Ok(())
    }
}
