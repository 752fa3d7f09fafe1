//! Pricing

use rust_decimal::{Decimal, RoundingStrategy};

use crate::cart::{Cart, CartLine};

/// Effective unit price of a cart line.
///
/// Selected variation options sum to the unit price, with no base price added. Without
/// variations a positively priced legacy type is used, and otherwise the promotional price
/// when a promotion is active, falling back to the base price or zero.
pub fn unit_price(line: &CartLine) -> Decimal {
    if !line.selected_variations.is_empty() {
        return line
            .selected_variations
            .iter()
            .map(|selected| selected.option.price)
            .sum();
    }

    if let Some(selected) = &line.selected_type
        && selected.price > Decimal::ZERO
    {
        return selected.price;
    }

    line.product
        .promotional_price()
        .or(line.product.price)
        .unwrap_or_default()
}

/// Whether the line is charged at the product's promotional price.
///
/// Promotions only apply to plain lines: any variation or type selection disables them.
pub fn has_promotion(line: &CartLine) -> bool {
    line.product.has_active_promotion() && !line.has_selection()
}

/// Unit price multiplied by quantity.
pub fn line_total(line: &CartLine) -> Decimal {
    unit_price(line) * Decimal::from(line.quantity)
}

/// Sum of all line totals. An empty cart totals zero.
pub fn cart_total(cart: &Cart) -> Decimal {
    cart.lines().iter().map(line_total).sum()
}

/// Round to two fraction digits for display.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{rounded:.2}")
}
