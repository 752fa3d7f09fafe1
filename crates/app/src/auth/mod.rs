//! Authentication
//!
//! Administrators sign up and sign in against a hosted auth provider; a local profile row
//! mirrors each registered user.

mod errors;
mod models;
pub mod provider;
mod repository;
mod service;

pub use errors::*;
pub use models::*;
pub use provider::{AuthProviderClient, AuthProviderConfig, AuthProviderError};
pub use repository::PgProfilesRepository;
pub use service::*;
