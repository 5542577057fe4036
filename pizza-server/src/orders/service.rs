//! Order service
//!
//! Orchestrates the pricing engine over the catalog, coupon and order stores.
//! Everything a request can get wrong is checked before the single
//! `insert_order` call, and every totals change is one version-checked write.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{Coupon, CouponValidation, Order, OrderCreate, OrderStatus};

use super::store::{CouponStore, NewOrder, OrderStore};
use super::validation::normalize_coupon_code;
use crate::error::ServiceResult;
use crate::pricing::coupon::{apply_discount, is_valid};
use crate::pricing::{CatalogProvider, price_lines, totals};

#[derive(Clone)]
pub struct OrderService {
    catalog: Arc<dyn CatalogProvider>,
    coupons: Arc<dyn CouponStore>,
    orders: Arc<dyn OrderStore>,
    tax_rate: Decimal,
}

impl OrderService {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        coupons: Arc<dyn CouponStore>,
        orders: Arc<dyn OrderStore>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            catalog,
            coupons,
            orders,
            tax_rate,
        }
    }

    /// Price and store a new order
    ///
    /// An unknown coupon code fails the request. A known but invalid coupon is
    /// referenced on the order without granting a discount.
    pub async fn create_order(&self, customer_id: i64, req: OrderCreate) -> ServiceResult<Order> {
        let coupon_code = normalize_coupon_code(req.coupon_code.as_deref(), "coupon_code")?;

        if let Some(address_id) = req.delivery_address_id
            && !self.orders.address_belongs_to(customer_id, address_id).await?
        {
            return Err(AppError::new(ErrorCode::DeliveryAddressNotFound)
                .with_field("delivery_address_id")
                .with_detail("id", address_id)
                .into());
        }

        let priced = match price_lines(self.catalog.as_ref(), &req.items).await {
            Ok(priced) => priced,
            Err(e) => {
                tracing::debug!(customer_id, code = %e.code(), "Order rejected while pricing");
                return Err(e);
            }
        };

        let coupon = match coupon_code {
            Some(code) => Some(self.coupons.find_by_code(&code).await?.ok_or_else(|| {
                AppError::with_message(ErrorCode::ValidationFailed, "Invalid coupon code.")
                    .with_field("coupon_code")
            })?),
            None => None,
        };

        let now = Utc::now();
        let discount = match &coupon {
            Some(c) if is_valid(c, now) => apply_discount(c, priced.gross_total),
            _ => Decimal::ZERO,
        };
        let totals = totals::calculate(priced.gross_total, discount, self.tax_rate);

        let order = self
            .orders
            .insert_order(NewOrder {
                customer_id,
                order_datetime: now,
                status: OrderStatus::Pending,
                delivery_address_id: req.delivery_address_id,
                coupon_id: coupon.as_ref().map(|c| c.id),
                totals,
                lines: priced.lines,
            })
            .await?;

        tracing::info!(
            order_id = order.id,
            customer_id,
            items = order.items.len(),
            total = %order.total_amount,
            discount = %order.discount_amount,
            "Order created"
        );
        Ok(order)
    }

    pub async fn get_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<Order> {
        self.orders
            .find_order(customer_id, order_id)
            .await?
            .ok_or_else(|| order_not_found(order_id))
    }

    pub async fn list_orders(&self, customer_id: i64) -> ServiceResult<Vec<Order>> {
        self.orders.list_orders(customer_id).await
    }

    /// Attach a coupon to an order and recompute its totals
    ///
    /// Unknown codes fail with `CouponNotFound`. A coupon that exists but is
    /// not valid leaves the order as it was, without an error.
    pub async fn apply_coupon_to_order(
        &self,
        customer_id: i64,
        order_id: i64,
        coupon_code: Option<&str>,
    ) -> ServiceResult<Order> {
        let Some(code) = normalize_coupon_code(coupon_code, "coupon")? else {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "Coupon code not provided")
                    .with_field("coupon")
                    .into(),
            );
        };

        let order = self.get_order(customer_id, order_id).await?;
        let coupon = self
            .coupons
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CouponNotFound).with_field("coupon"))?;

        let mut updated = order.clone();
        updated.coupon_id = Some(coupon.id);
        if !totals::apply_coupon(&mut updated, Some(&coupon), Utc::now(), self.tax_rate) {
            tracing::info!(order_id, coupon = %coupon.code, "Coupon not valid, order left unchanged");
            return Ok(order);
        }

        let saved = self.orders.update_order(&updated).await?;
        tracing::info!(
            order_id,
            coupon = %coupon.code,
            discount = %saved.discount_amount,
            "Coupon applied"
        );
        Ok(saved)
    }

    /// Remove the coupon and its discount from an order
    pub async fn unapply_coupon(&self, customer_id: i64, order_id: i64) -> ServiceResult<Order> {
        let mut order = self.get_order(customer_id, order_id).await?;
        if order.coupon_id.is_none() && order.discount_amount.is_zero() {
            return Ok(order);
        }

        totals::unapply_coupon(&mut order, self.tax_rate);
        order.coupon_id = None;

        let saved = self.orders.update_order(&order).await?;
        tracing::info!(order_id, "Coupon removed");
        Ok(saved)
    }

    /// Move an order to a new status
    ///
    /// Delivered and cancelled orders are final.
    pub async fn update_order_status(
        &self,
        customer_id: i64,
        order_id: i64,
        status: OrderStatus,
    ) -> ServiceResult<Order> {
        let mut order = self.get_order(customer_id, order_id).await?;
        if order.status == status {
            return Ok(order);
        }
        if matches!(order.status, OrderStatus::Delivered | OrderStatus::Cancelled) {
            return Err(AppError::with_message(
                ErrorCode::OrderStatusFinal,
                format!("Order is already {}", order.status.as_str()),
            )
            .with_field("status")
            .into());
        }

        let previous = order.status;
        order.status = status;
        let saved = self.orders.update_order(&order).await?;
        tracing::info!(
            order_id,
            from = previous.as_str(),
            to = status.as_str(),
            "Order status updated"
        );
        Ok(saved)
    }

    /// Delete one of the customer's orders
    pub async fn delete_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<()> {
        if !self.orders.delete_order(customer_id, order_id).await? {
            return Err(order_not_found(order_id));
        }
        tracing::info!(order_id, customer_id, "Order deleted");
        Ok(())
    }

    /// Check a coupon code without touching any order
    pub async fn validate_coupon(&self, code: &str) -> ServiceResult<CouponValidation> {
        let Some(code) = normalize_coupon_code(Some(code), "code")? else {
            return Err(
                AppError::with_message(ErrorCode::RequiredField, "Coupon code not provided")
                    .with_field("code")
                    .into(),
            );
        };

        let coupon: Coupon = self.coupons.find_by_code(&code).await?.ok_or_else(|| {
            AppError::with_message(ErrorCode::ValidationFailed, "Invalid coupon code.")
                .with_field("code")
        })?;

        if !is_valid(&coupon, Utc::now()) {
            return Err(
                AppError::with_message(ErrorCode::CouponInvalid, "This coupon is not valid.")
                    .with_field("code")
                    .into(),
            );
        }

        Ok(CouponValidation {
            message: "Coupon is valid".to_string(),
            code: coupon.code,
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
        })
    }
}

fn order_not_found(order_id: i64) -> crate::error::ServiceError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
        .with_detail("id", order_id)
        .into()
}
