//! In-memory catalog, coupon and order stores for tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{Coupon, Order, OrderItem};

use super::store::{CouponStore, NewOrder, OrderStore};
use crate::error::ServiceResult;
use crate::pricing::{CatalogKind, CatalogProvider, PricedEntity};

#[derive(Default)]
struct Inner {
    catalog: HashMap<(CatalogKind, i64), Decimal>,
    coupons: Vec<Coupon>,
    addresses: HashSet<(i64, i64)>,
    orders: Vec<Order>,
    next_order_id: i64,
    next_item_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size, crust, sauce and cheese with id 1, all priced 0.00
    pub fn with_zero_priced_components() -> Self {
        let store = Self::new();
        for kind in [
            CatalogKind::PizzaSize,
            CatalogKind::Crust,
            CatalogKind::Sauce,
            CatalogKind::Cheese,
        ] {
            store.add_entity(kind, 1, Decimal::ZERO);
        }
        store
    }

    pub fn add_entity(&self, kind: CatalogKind, id: i64, price: Decimal) {
        self.inner.lock().unwrap().catalog.insert((kind, id), price);
    }

    pub fn add_menu_item(&self, id: i64, price: Decimal) {
        self.add_entity(CatalogKind::MenuItem, id, price);
    }

    pub fn add_topping(&self, id: i64, price: Decimal) {
        self.add_entity(CatalogKind::Topping, id, price);
    }

    pub fn add_coupon(&self, coupon: Coupon) {
        self.inner.lock().unwrap().coupons.push(coupon);
    }

    pub fn add_address(&self, customer_id: i64, address_id: i64) {
        self.inner
            .lock()
            .unwrap()
            .addresses
            .insert((customer_id, address_id));
    }

    pub fn order_count(&self) -> usize {
        self.inner.lock().unwrap().orders.len()
    }

    /// Stored copy of an order, bypassing customer scoping
    pub fn stored_order(&self, order_id: i64) -> Option<Order> {
        self.inner
            .lock()
            .unwrap()
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
    }
}

#[async_trait]
impl CatalogProvider for MemoryStore {
    async fn lookup(&self, kind: CatalogKind, id: i64) -> ServiceResult<Option<PricedEntity>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .catalog
            .get(&(kind, id))
            .map(|&price| PricedEntity { id, price }))
    }
}

#[async_trait]
impl CouponStore for MemoryStore {
    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Coupon>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.coupons.iter().find(|c| c.code == code).cloned())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn address_belongs_to(&self, customer_id: i64, address_id: i64) -> ServiceResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.addresses.contains(&(customer_id, address_id)))
    }

    async fn insert_order(&self, order: NewOrder) -> ServiceResult<Order> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_order_id += 1;
        let id = inner.next_order_id;

        let mut items = Vec::with_capacity(order.lines.len());
        for line in order.lines {
            inner.next_item_id += 1;
            items.push(OrderItem {
                id: inner.next_item_id,
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_price: line.total_price,
                is_pizza: line.is_pizza,
                instructions: line.instructions,
                pizza: line.pizza,
            });
        }

        let stored = Order {
            id,
            customer_id: order.customer_id,
            order_datetime: order.order_datetime,
            status: order.status,
            delivery_address_id: order.delivery_address_id,
            coupon_id: order.coupon_id,
            total_amount: order.totals.gross,
            discount_amount: order.totals.discount,
            tax_amount: order.totals.tax,
            netto_total: order.totals.net,
            version: 1,
            items,
        };
        inner.orders.push(stored.clone());
        Ok(stored)
    }

    async fn find_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<Option<Order>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .orders
            .iter()
            .find(|o| o.id == order_id && o.customer_id == customer_id)
            .cloned())
    }

    async fn list_orders(&self, customer_id: i64) -> ServiceResult<Vec<Order>> {
        let inner = self.inner.lock().unwrap();
        let mut orders: Vec<Order> = inner
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_datetime.cmp(&a.order_datetime).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn update_order(&self, order: &Order) -> ServiceResult<Order> {
        let mut inner = self.inner.lock().unwrap();
        let Some(stored) = inner
            .orders
            .iter_mut()
            .find(|o| o.id == order.id && o.customer_id == order.customer_id)
        else {
            return Err(AppError::new(ErrorCode::OrderNotFound).into());
        };
        if stored.version != order.version {
            return Err(AppError::new(ErrorCode::OrderVersionConflict).into());
        }
        stored.status = order.status;
        stored.coupon_id = order.coupon_id;
        stored.discount_amount = order.discount_amount;
        stored.netto_total = order.netto_total;
        stored.tax_amount = order.tax_amount;
        stored.version += 1;
        Ok(stored.clone())
    }

    async fn delete_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.orders.len();
        inner
            .orders
            .retain(|o| !(o.id == order_id && o.customer_id == customer_id));
        Ok(inner.orders.len() < before)
    }
}
