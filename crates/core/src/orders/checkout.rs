//! Order submission

use std::{fmt, io};

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::Cart,
    orders::{DEFAULT_CURRENCY, OrderValidationError, render_message, validate},
    pricing::cart_total,
};

/// Host of the messaging deep link.
pub const WHATSAPP_HOST: &str = "https://wa.me";

/// Errors raised while submitting an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart or contact details are incomplete.
    #[error(transparent)]
    Invalid(#[from] OrderValidationError),

    /// The deep link could not be opened.
    #[error("failed to open order link")]
    Open(#[source] io::Error),
}

/// Opens a deep link in a new browsing context.
pub trait LinkOpener {
    /// Open `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the link cannot be handed off.
    fn open(&self, url: &str) -> io::Result<()>;
}

impl<F> LinkOpener for F
where
    F: Fn(&str) -> io::Result<()>,
{
    fn open(&self, url: &str) -> io::Result<()> {
        self(url)
    }
}

/// Leaves the link for the caller to hand off, e.g. an HTTP client receiving it in a response.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredOpener;

impl LinkOpener for DeferredOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        debug!(url, "deferring order link to caller");

        Ok(())
    }
}

/// A composed order, ready to hand off or already handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedOrder {
    /// Rendered order message.
    pub message: String,

    /// Messaging deep link carrying the message.
    pub url: String,

    /// Cart total.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Build the messaging deep link for `destination` carrying `message`.
pub fn whatsapp_link(destination: &str, message: &str) -> String {
    format!(
        "{WHATSAPP_HOST}/{}?text={}",
        destination.trim(),
        urlencoding::encode(message)
    )
}

/// Validates, renders and hands off orders to a fixed destination number.
pub struct Checkout<O> {
    destination: String,
    currency: &'static Currency,
    opener: O,
}

impl<O> fmt::Debug for Checkout<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("destination", &self.destination)
            .field("currency", &self.currency.iso_alpha_code)
            .finish_non_exhaustive()
    }
}

impl<O: LinkOpener> Checkout<O> {
    /// Checkout sending orders to `destination` in the default currency.
    pub fn new(destination: impl Into<String>, opener: O) -> Self {
        Self {
            destination: destination.into(),
            currency: DEFAULT_CURRENCY,
            opener,
        }
    }

    /// Use `currency` for amounts in the message.
    #[must_use]
    pub fn with_currency(mut self, currency: &'static Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Destination phone number.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Validate the cart and compose the message and link without opening anything.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn compose(
        &self,
        cart: &Cart,
        name: &str,
        phone: &str,
    ) -> Result<SubmittedOrder, OrderValidationError> {
        validate(cart, name, phone)?;

        let message = render_message(cart, name, phone, self.currency);
        let url = whatsapp_link(&self.destination, &message);

        Ok(SubmittedOrder {
            message,
            url,
            total: cart_total(cart),
        })
    }

    /// Compose the order, open its link and run `on_success`.
    ///
    /// Nothing is opened and `on_success` is not called when validation fails.
    ///
    /// # Errors
    ///
    /// Returns the validation failure, or an error when the link cannot be opened.
    pub fn submit(
        &self,
        cart: &Cart,
        name: &str,
        phone: &str,
        on_success: impl FnOnce(),
    ) -> Result<SubmittedOrder, CheckoutError> {
        let order = self.compose(cart, name, phone)?;

        self.opener.open(&order.url).map_err(CheckoutError::Open)?;

        info!(lines = cart.len(), total = %order.total, "Order sent via WhatsApp!");

        on_success();

        Ok(order)
    }
}
