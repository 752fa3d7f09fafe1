//! Storefront commands
//!
//! Each command returns the text to print. Cart changes are followed by any notice the
//! change warrants and the cart badge.

use bakehouse::{
    cart::{CartEvent, CartStorage, CartStore},
    catalog::{CatalogQuery, arrange},
    orders::{Checkout, LinkOpener},
    selections::SelectionKey,
};
use rusty_money::iso::Currency;
use tokio::sync::broadcast::{Receiver, error::TryRecvError};
use tracing::debug;

use crate::{catalog::Catalog, errors::StorefrontError, render};

pub(crate) struct Storefront<C, S, O> {
    catalog: C,
    store: CartStore<S>,
    events: Receiver<CartEvent>,
    checkout: Checkout<O>,
    currency: &'static Currency,
}

impl<C, S, O> Storefront<C, S, O>
where
    C: Catalog,
    S: CartStorage,
    O: LinkOpener,
{
    pub(crate) fn new(
        catalog: C,
        store: CartStore<S>,
        checkout: Checkout<O>,
        currency: &'static Currency,
    ) -> Self {
        let events = store.subscribe();

        Self {
            catalog,
            store,
            events,
            checkout: checkout.with_currency(currency),
            currency,
        }
    }

    pub(crate) async fn catalog(&self, query: CatalogQuery) -> Result<String, StorefrontError> {
        let products = self.catalog.products(&query).await?;

        Ok(render::catalog(
            &arrange(products, query.category()),
            self.currency,
        ))
    }

    pub(crate) async fn banners(&self) -> Result<String, StorefrontError> {
        Ok(render::banners(&self.catalog.banners().await?))
    }

    pub(crate) async fn add(&mut self, product_id: &str) -> Result<String, StorefrontError> {
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or_else(|| StorefrontError::UnknownProduct(product_id.to_string()))?;

        self.store.add_or_increment(product)?;

        Ok(self.changes())
    }

    pub(crate) fn cart(&self) -> String {
        let cart = self.store.load();

        format!(
            "{}{}",
            render::cart(&cart, self.currency),
            render::badge(cart.item_count())
        )
    }

    pub(crate) fn set_quantity(&mut self, line: usize, quantity: i64) -> Result<String, StorefrontError> {
        let index = self.line_index(line)?;

        let cart = self.store.set_quantity(index, quantity)?;

        Ok(format!("{}{}", render::cart(&cart, self.currency), self.changes()))
    }

    pub(crate) fn select(
        &mut self,
        line: usize,
        key: &str,
        label: &str,
    ) -> Result<String, StorefrontError> {
        let index = self.line_index(line)?;
        let key = SelectionKey::from(key);

        let cart = self.store.load();
        let product = cart
            .line(index)
            .map(|line| &line.product)
            .ok_or(StorefrontError::InvalidLine(line))?;

        let option = match &key {
            SelectionKey::LegacyType => product.legacy_type(label),
            SelectionKey::Category(name) => product
                .variation_category(name)
                .and_then(|category| category.option(label)),
        }
        .cloned()
        .ok_or_else(|| StorefrontError::UnknownOption {
            product: product.title.clone(),
            key: key.to_string(),
            label: label.to_string(),
        })?;

        let cart = self.store.select_option(index, key, option)?;

        Ok(format!("{}{}", render::cart(&cart, self.currency), self.changes()))
    }

    pub(crate) fn remove(&mut self, line: usize) -> Result<String, StorefrontError> {
        let index = self.line_index(line)?;

        self.store
            .remove_line(index)?
            .ok_or(StorefrontError::InvalidLine(line))?;

        Ok(self.changes())
    }

    pub(crate) fn clear(&mut self) -> Result<String, StorefrontError> {
        self.store.clear()?;

        Ok(self.changes())
    }

    pub(crate) fn checkout(&mut self, name: &str, phone: &str) -> Result<String, StorefrontError> {
        if self.checkout.destination().trim().is_empty() {
            return Err(StorefrontError::MissingDestination);
        }

        let order = self.store.checkout(&self.checkout, name, phone)?;

        Ok(format!(
            "Order sent via WhatsApp!\n\n{}\n\n{}\n{}",
            order.message,
            order.url,
            self.changes()
        ))
    }

    /// Line numbers are 1-based and must exist in the cart.
    fn line_index(&self, line: usize) -> Result<usize, StorefrontError> {
        line.checked_sub(1)
            .filter(|index| *index < self.store.load().len())
            .ok_or(StorefrontError::InvalidLine(line))
    }

    /// Notices for the changes since the last call, then the badge.
    fn changes(&mut self) -> String {
        let mut out = String::new();

        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if let Some(notice) = event.notice() {
                        out.push_str(&notice);
                        out.push('\n');
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => debug!(skipped, "cart events lagged"),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        out.push_str(&render::badge(self.store.item_count()));
        out
    }
}
