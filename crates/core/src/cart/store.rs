//! Cart store

use std::fmt;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, CartLine, CartStorage, StorageError},
    orders::{Checkout, CheckoutError, LinkOpener, SubmittedOrder},
    products::{Product, VariationOption},
    selections::SelectionKey,
};

/// Key of the durable cart record.
pub const CART_KEY: &str = "cart";

const EVENT_BUFFER: usize = 64;

/// Errors raised while persisting the cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("failed to serialize cart")]
    Serialize(#[from] serde_json::Error),
}

/// Change notification broadcast after every effective mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added or its line incremented.
    Added {
        /// Product identifier.
        product_id: String,
        /// Product title.
        title: String,
    },

    /// A line's quantity was set.
    QuantityChanged {
        /// Line index.
        index: usize,
        /// New quantity.
        quantity: u32,
    },

    /// An option was selected on a line.
    OptionSelected {
        /// Line index.
        index: usize,
        /// Selection dimension.
        key: SelectionKey,
    },

    /// A line was removed.
    Removed {
        /// Former line index.
        index: usize,
        /// Title of the removed product.
        title: String,
    },

    /// The cart record was deleted.
    Cleared,
}

impl CartEvent {
    /// User-facing confirmation for the change, if it warrants one.
    pub fn notice(&self) -> Option<String> {
        match self {
            CartEvent::Added { title, .. } => Some(format!("{title} added to cart!")),
            CartEvent::Removed { .. } => Some("Item removed from cart".to_string()),
            CartEvent::QuantityChanged { .. }
            | CartEvent::OptionSelected { .. }
            | CartEvent::Cleared => None,
        }
    }
}

/// Cart backed by a durable record, broadcasting every change to subscribers.
pub struct CartStore<S> {
    storage: S,
    events: broadcast::Sender<CartEvent>,
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store over `storage`.
    pub fn new(storage: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        Self { storage, events }
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Receive change notifications. Receivers should re-load the cart on each event.
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Read the cart. Missing, unreadable or malformed records read as an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.read(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::default(),
            Err(err) => {
                warn!(error = %err, "failed to read cart record");
                return Cart::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(err) => {
                warn!(error = %err, "discarding malformed cart record");
                Cart::default()
            }
        }
    }

    /// Total units in the cart.
    pub fn item_count(&self) -> u64 {
        self.load().item_count()
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be persisted.
    pub fn add_or_increment(&self, product: Product) -> Result<Cart, CartStoreError> {
        let mut cart = self.load();
        let event = CartEvent::Added {
            product_id: product.id.clone(),
            title: product.title.clone(),
        };

        cart.add_or_increment(product);
        self.commit(&cart, event)?;

        Ok(cart)
    }

    /// Set the quantity of the line at `index`. Quantities below one are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be persisted.
    pub fn set_quantity(&self, index: usize, quantity: i64) -> Result<Cart, CartStoreError> {
        let mut cart = self.load();

        if cart.set_quantity(index, quantity) {
            let quantity = cart.line(index).map_or(1, |line| line.quantity);
            self.commit(&cart, CartEvent::QuantityChanged { index, quantity })?;
        } else {
            debug!(index, quantity, "ignoring quantity change");
        }

        Ok(cart)
    }

    /// Select `option` for `key` on the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be persisted.
    pub fn select_option(
        &self,
        index: usize,
        key: SelectionKey,
        option: VariationOption,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self.load();

        if cart.select_option(index, key.clone(), option) {
            self.commit(&cart, CartEvent::OptionSelected { index, key })?;
        } else {
            debug!(index, %key, "ignoring selection for unknown line");
        }

        Ok(cart)
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be persisted.
    pub fn remove_line(&self, index: usize) -> Result<Option<CartLine>, CartStoreError> {
        let mut cart = self.load();

        let Some(removed) = cart.remove_line(index) else {
            debug!(index, "ignoring removal of unknown line");
            return Ok(None);
        };

        self.commit(
            &cart,
            CartEvent::Removed {
                index,
                title: removed.product.title.clone(),
            },
        )?;

        info!(product = %removed.product.id, "Item removed from cart");

        Ok(Some(removed))
    }

    /// Delete the cart record.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be deleted.
    pub fn clear(&self) -> Result<(), CartStoreError> {
        self.storage.remove(CART_KEY)?;
        self.publish(CartEvent::Cleared);

        Ok(())
    }

    /// Submit the current cart, clearing it once the order link has been opened.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart fails validation or the link cannot be opened.
    pub fn checkout<O: LinkOpener>(
        &self,
        checkout: &Checkout<O>,
        name: &str,
        phone: &str,
    ) -> Result<SubmittedOrder, CheckoutError> {
        let cart = self.load();

        checkout.submit(&cart, name, phone, || {
            if let Err(err) = self.clear() {
                warn!(error = %err, "failed to clear cart after checkout");
            }
        })
    }

    fn commit(&self, cart: &Cart, event: CartEvent) -> Result<(), CartStoreError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.write(CART_KEY, &raw)?;
        self.publish(event);

        Ok(())
    }

    fn publish(&self, event: CartEvent) {
        if self.events.send(event).is_err() {
            debug!("no cart subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;
    use tokio::sync::broadcast::error::TryRecvError;

    use crate::{
        cart::{FileStorage, MemoryStorage},
        products::VariationCategory,
    };

    use super::*;

    fn brownie() -> Product {
        Product::new("brownie", "Brownie", Some(dec!(20))).with_sale(dec!(15))
    }

    fn cake() -> Product {
        Product::new("cake", "Cake", None).with_variations([VariationCategory::new(
            "Size",
            [
                VariationOption::new("Small", dec!(10)),
                VariationOption::new("Large", dec!(15)),
            ],
        )])
    }

    #[test]
    fn load_degrades_to_empty_cart() {
        for raw in ["not json", r#"{"product": 1}"#, "null", "[{\"quantity\": 1}]"] {
            let store = CartStore::new(MemoryStorage::with_record(CART_KEY, raw));

            assert!(store.load().is_empty(), "{raw} should load as empty");
        }

        assert!(CartStore::new(MemoryStorage::new()).load().is_empty());
    }

    #[test]
    fn mutations_persist_and_broadcast() -> TestResult {
        let store = CartStore::new(MemoryStorage::new());
        let mut events = store.subscribe();

        store.add_or_increment(brownie())?;
        store.add_or_increment(cake())?;
        store.set_quantity(0, 3)?;
        store.select_option(1, "Size".into(), VariationOption::new("Large", dec!(15)))?;

        let cart = store.load();
        assert_eq!(cart.item_count(), 4);
        assert_eq!(
            cart.line(1).and_then(|line| line.selection_for("Size")),
            Some(&VariationOption::new("Large", dec!(15)))
        );

        assert_eq!(
            events.try_recv()?,
            CartEvent::Added {
                product_id: "brownie".to_string(),
                title: "Brownie".to_string(),
            }
        );
        assert!(matches!(events.try_recv()?, CartEvent::Added { .. }));
        assert_eq!(
            events.try_recv()?,
            CartEvent::QuantityChanged {
                index: 0,
                quantity: 3
            }
        );
        assert_eq!(
            events.try_recv()?,
            CartEvent::OptionSelected {
                index: 1,
                key: SelectionKey::Category("Size".to_string()),
            }
        );

        Ok(())
    }

    #[test]
    fn ignored_operations_do_not_broadcast() -> TestResult {
        let store = CartStore::new(MemoryStorage::new());
        store.add_or_increment(brownie())?;
        let mut events = store.subscribe();

        store.set_quantity(0, 0)?;
        store.set_quantity(0, -1)?;
        store.set_quantity(5, 2)?;
        store.select_option(5, SelectionKey::LegacyType, VariationOption::new("Mini", dec!(1)))?;
        assert_eq!(store.remove_line(5)?, None);

        assert_eq!(store.item_count(), 1);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        Ok(())
    }

    #[test]
    fn remove_line_emits_confirmation() -> TestResult {
        let store = CartStore::new(MemoryStorage::new());
        store.add_or_increment(brownie())?;
        store.add_or_increment(cake())?;
        let mut events = store.subscribe();

        let removed = store.remove_line(0)?;

        assert_eq!(removed.map(|line| line.product.id), Some("brownie".to_string()));
        assert_eq!(store.load().len(), 1);
        assert_eq!(
            events.try_recv()?.notice().as_deref(),
            Some("Item removed from cart")
        );

        Ok(())
    }

    #[test]
    fn clear_deletes_record() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = CartStore::new(FileStorage::new(dir.path()));
        store.add_or_increment(brownie())?;
        assert!(dir.path().join("cart.json").exists());

        let mut events = store.subscribe();
        store.clear()?;

        assert!(!dir.path().join("cart.json").exists());
        assert!(store.load().is_empty());
        assert_eq!(events.try_recv()?, CartEvent::Cleared);

        Ok(())
    }

    #[test]
    fn file_backed_cart_survives_new_store() -> TestResult {
        let dir = tempfile::tempdir()?;

        CartStore::new(FileStorage::new(dir.path())).add_or_increment(brownie())?;
        let reopened = CartStore::new(FileStorage::new(dir.path()));

        assert_eq!(reopened.item_count(), 1);

        Ok(())
    }

    #[test]
    fn file_backed_cart_keeps_exact_prices() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = CartStore::new(FileStorage::new(dir.path()));
        let tart = Product::new("tart", "Tart", Some(dec!(1234567.123456789012)))
            .with_sale(dec!(0.1))
            .with_variations([VariationCategory::new(
                "Size",
                [VariationOption::new("Large", dec!(15.000000000000000001))],
            )]);

        store.add_or_increment(tart)?;
        let cart = store.select_option(
            0,
            "Size".into(),
            VariationOption::new("Large", dec!(15.000000000000000001)),
        )?;

        let loaded = CartStore::new(FileStorage::new(dir.path())).load();
        let line = loaded.line(0).ok_or("missing line")?;

        assert_eq!(loaded, cart);
        assert_eq!(
            line.product.price.map(|price| price.to_string()).as_deref(),
            Some("1234567.123456789012")
        );
        assert_eq!(
            line.selection_for("Size").map(|option| option.price.to_string()).as_deref(),
            Some("15.000000000000000001")
        );

        Ok(())
    }
}
