//! Orders

mod checkout;
mod message;
mod validation;

pub use checkout::{
    Checkout, CheckoutError, DeferredOpener, LinkOpener, SubmittedOrder, WHATSAPP_HOST, whatsapp_link,
};
pub use message::{DEFAULT_CURRENCY, render_message};
pub use validation::{OrderValidationError, validate};
