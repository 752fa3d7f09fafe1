//! Order message

use std::fmt::Write as _;

use rusty_money::iso::{self, Currency};

use crate::{
    cart::Cart,
    pricing::{cart_total, format_amount, has_promotion, line_total},
    selections::selected_labels,
};

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &Currency = iso::MYR;

/// Render the plain-text order summary sent to the shop.
pub fn render_message(cart: &Cart, name: &str, phone: &str, currency: &Currency) -> String {
    let code = currency.iso_alpha_code;
    let mut message = format!("*New Order*\n\nCustomer: {name}\nPhone: {phone}\n\n*Items:*\n");

    for line in cart.lines() {
        let labels = selected_labels(line);
        let variations = if labels.is_empty() {
            String::new()
        } else {
            format!(" ({})", labels.join(", "))
        };
        let sale = if has_promotion(line) { " (SALE)" } else { "" };

        // Writing to a String cannot fail.
        let _ignored = writeln!(
            message,
            "- {title}{variations}{sale} ({quantity}x) - {code} {total}",
            title = line.product.title,
            quantity = line.quantity,
            total = format_amount(line_total(line)),
        );
    }

    let _ignored = write!(
        message,
        "\n*Total: {code} {}*",
        format_amount(cart_total(cart))
    );

    message
}
