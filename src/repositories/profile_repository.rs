// src/repositories/profile_repository.rs
//
// Profile persistence - tier fallback lookup

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};

use crate::db::ConnectionPool;
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    /// Raw tier text stored for an identity, if any
    fn get_tier(&self, identity_id: &str) -> AppResult<Option<String>>;
    fn set_tier(&self, identity_id: &str, tier: &str) -> AppResult<()>;
}

pub struct SqliteProfileRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteProfileRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl ProfileRepository for SqliteProfileRepository {
    fn get_tier(&self, identity_id: &str) -> AppResult<Option<String>> {
        let conn = self.pool.get()?;
        let tier: Option<Option<String>> = conn
            .query_row(
                "SELECT tier FROM profiles WHERE id = ?1",
                params![identity_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(tier.flatten())
    }

    fn set_tier(&self, identity_id: &str, tier: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO profiles (id, tier) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET tier = excluded.tier",
            params![identity_id, tier],
        )?;

        Ok(())
    }
}
