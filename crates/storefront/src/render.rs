//! Terminal rendering

use std::fmt::Write as _;

use bakehouse::{
    cart::{Cart, CartLine},
    catalog::CategoryGroup,
    pricing::{cart_total, format_amount, has_promotion, line_total, unit_price},
    products::{PriceDisplay, Product},
    selections::selected_labels,
};
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::catalog::Banner;

fn money(currency: &Currency, amount: Decimal) -> String {
    format!("{} {}", currency.iso_alpha_code, format_amount(amount))
}

/// Price column text for a product card.
pub(crate) fn price_label(product: &Product, currency: &Currency) -> String {
    match product.price_display() {
        PriceDisplay::Promotional {
            price,
            sale,
            percent_off,
        } => format!(
            "{} (was {}, {percent_off}% off)",
            money(currency, sale),
            money(currency, price)
        ),
        PriceDisplay::Fixed { price } => money(currency, price),
        PriceDisplay::FromVariations { from } => format!("from {}", money(currency, from)),
        PriceDisplay::ByWeight => "by weight".to_string(),
    }
}

fn options_label(product: &Product) -> String {
    if !product.variation_categories.is_empty() {
        return product
            .variation_categories
            .iter()
            .map(|category| {
                let labels: Vec<_> = category
                    .options
                    .iter()
                    .map(|option| option.label.as_str())
                    .collect();

                format!("{}: {}", category.name, labels.join("/"))
            })
            .collect::<Vec<_>>()
            .join("; ");
    }

    if product.has_legacy_types() {
        let labels: Vec<_> = product.types.iter().map(|option| option.label.as_str()).collect();

        return format!("type: {}", labels.join("/"));
    }

    String::new()
}

/// Products grouped under category headings.
pub(crate) fn catalog(groups: &[CategoryGroup], currency: &Currency) -> String {
    if groups.iter().all(|group| group.products.is_empty()) {
        return "No products found\n".to_string();
    }

    let mut out = String::new();

    for group in groups.iter().filter(|group| !group.products.is_empty()) {
        let mut builder = Builder::default();
        builder.push_record(["ID", "Product", "Price", "Options"]);

        for product in &group.products {
            builder.push_record([
                product.id.clone(),
                product.title.clone(),
                price_label(product, currency),
                options_label(product),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());

        let _ignored = writeln!(out, "{} ({})\n{table}\n", group.name, group.products.len());
    }

    out
}

fn line_options(line: &CartLine) -> String {
    let labels = selected_labels(line);

    if labels.is_empty() {
        "-".to_string()
    } else {
        labels.join(", ")
    }
}

/// Cart lines, numbered from one, with the total.
pub(crate) fn cart(cart: &Cart, currency: &Currency) -> String {
    if cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Item", "Options", "Qty", "Unit", "Total"]);

    for (index, line) in cart.lines().iter().enumerate() {
        let title = if has_promotion(line) {
            format!("{} (SALE)", line.product.title)
        } else {
            line.product.title.clone()
        };

        builder.push_record([
            (index + 1).to_string(),
            title,
            line_options(line),
            line.quantity.to_string(),
            money(currency, unit_price(line)),
            money(currency, line_total(line)),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::modern_rounded())
        .modify(Columns::new(3..6), Alignment::right());

    format!("{table}\nTotal: {}\n", money(currency, cart_total(cart)))
}

/// Active banners, one per line.
pub(crate) fn banners(banners: &[Banner]) -> String {
    banners
        .iter()
        .map(|banner| format!("* {}\n", banner.message))
        .collect()
}

/// Cart badge shown after every change.
pub(crate) fn badge(item_count: u64) -> String {
    format!("Cart ({item_count})\n")
}
