//! Products

pub(crate) mod errors;
mod form;
mod handlers;

pub(crate) use handlers::*;
