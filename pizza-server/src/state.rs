//! Application state for pizza-server

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::PgStore;
use crate::error::BoxError;
use crate::orders::OrderService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool (menu listings)
    pub pool: PgPool,
    /// Order placement and coupon application
    pub orders: Arc<OrderService>,
    /// JWT secret for customer authentication
    pub jwt_secret: String,
}

impl AppState {
    /// Connect, run migrations and wire the Postgres-backed services
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let store = Arc::new(PgStore::new(pool.clone()));
        let orders = OrderService::new(store.clone(), store.clone(), store, config.tax_rate);

        Ok(Self::with_parts(pool, orders, config.jwt_secret.clone()))
    }

    pub fn with_parts(pool: PgPool, orders: OrderService, jwt_secret: String) -> Self {
        Self {
            pool,
            orders: Arc::new(orders),
            jwt_secret,
        }
    }
}
