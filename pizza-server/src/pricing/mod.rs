//! Order pricing engine
//!
//! Leaves first: catalog lookup, pizza composition, line aggregation, coupon
//! discount, totals decomposition. Pure except for catalog reads; nothing in
//! here persists.

pub mod catalog;
pub mod coupon;
pub mod lines;
pub mod money;
pub mod pizza;
pub mod totals;

pub use catalog::{CatalogKind, CatalogProvider, PricedEntity};
pub use lines::{PricedLine, price_lines};
pub use totals::{DEFAULT_TAX_RATE, OrderTotals};
