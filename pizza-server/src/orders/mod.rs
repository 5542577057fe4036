//! Order placement and coupon application

pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod memory;

pub use service::OrderService;
pub use store::{CouponStore, NewOrder, OrderStore};
