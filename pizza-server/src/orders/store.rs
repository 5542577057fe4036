//! Persistence seams used by the order service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Coupon, Order, OrderStatus};

use crate::error::ServiceResult;
use crate::pricing::{OrderTotals, PricedLine};

/// Coupon lookups
#[async_trait]
pub trait CouponStore: Send + Sync {
    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Coupon>>;
}

/// A fully priced order that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub order_datetime: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address_id: Option<i64>,
    pub coupon_id: Option<i64>,
    pub totals: OrderTotals,
    pub lines: Vec<PricedLine>,
}

/// Order aggregate storage
///
/// Reads are scoped to a customer: another customer's order is `None`.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Whether the address exists and belongs to the customer
    async fn address_belongs_to(&self, customer_id: i64, address_id: i64) -> ServiceResult<bool>;

    /// Store the order with every line, pizza and topping, or nothing
    async fn insert_order(&self, order: NewOrder) -> ServiceResult<Order>;

    async fn find_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<Option<Order>>;

    /// Newest first
    async fn list_orders(&self, customer_id: i64) -> ServiceResult<Vec<Order>>;

    /// Write status, coupon reference and amounts if `order.version` is still
    /// current; returns the stored order with the bumped version.
    ///
    /// Fails with `OrderVersionConflict` when the stored version moved on.
    /// `total_amount` and line items are never rewritten.
    async fn update_order(&self, order: &Order) -> ServiceResult<Order>;

    /// Remove the order and everything under it; `false` when no such order
    /// belongs to the customer
    async fn delete_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<bool>;
}
