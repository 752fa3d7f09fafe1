//! Bakehouse application services: persistence, authentication and image storage.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod storage;
pub mod uuids;

#[cfg(test)]
mod test;
