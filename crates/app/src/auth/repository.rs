//! Profiles repository.

use sqlx::{PgPool, query};
use tracing::warn;

use crate::auth::models::UserProfile;

const INSERT_PROFILE_SQL: &str = include_str!("sql/insert_profile.sql");

/// Postgres error code for a missing relation.
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Clone)]
pub struct PgProfilesRepository {
    pool: PgPool,
}

impl PgProfilesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a user profile.
    ///
    /// Returns `false` when the profiles table does not exist.
    ///
    /// # Errors
    ///
    /// Returns any other database error.
    pub async fn insert_profile(&self, profile: &UserProfile) -> Result<bool, sqlx::Error> {
        let result = query(INSERT_PROFILE_SQL)
            .bind(profile.id)
            .bind(&profile.name)
            .bind(&profile.email)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(error)) if error.code().as_deref() == Some(UNDEFINED_TABLE) => {
                warn!(user = %profile.id, "profiles table is missing; skipping profile");

                Ok(false)
            }
            Err(error) => Err(error),
        }
    }
}
