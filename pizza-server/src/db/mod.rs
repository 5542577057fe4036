//! PostgreSQL repositories
//!
//! Free functions take a `&PgPool` (or a transaction); `PgStore` wires them
//! into the store traits the order service depends on.

pub mod catalog;
pub mod coupons;
pub mod orders;

use sqlx::PgPool;

pub use crate::error::BoxError;

/// Postgres-backed catalog, coupon and order store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
