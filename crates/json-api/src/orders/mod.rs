//! Orders

pub(crate) mod checkout;
