//! Data models
//!
//! Shared between pizza-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGINT identity columns).

pub mod coupon;
pub mod menu;
pub mod order;

// Re-exports
pub use coupon::*;
pub use menu::*;
pub use order::*;
