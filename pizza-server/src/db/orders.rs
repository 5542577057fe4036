//! Order aggregate database operations
//!
//! An order is stored across `orders`, `order_items`, `order_item_pizzas` and
//! `order_item_pizza_toppings`. Inserts run in one transaction; totals and
//! status updates are guarded by the `version` column.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Order, OrderItem, OrderItemPizza, OrderStatus, PizzaTopping, Portion, ToppingSide,
};
use sqlx::{PgPool, Postgres, Transaction};

use super::{BoxError, PgStore};
use crate::error::ServiceResult;
use crate::orders::{NewOrder, OrderStore};

// ── Rows ──

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    order_datetime: DateTime<Utc>,
    status: String,
    delivery_address_id: Option<i64>,
    coupon_id: Option<i64>,
    total_amount: Decimal,
    discount_amount: Decimal,
    tax_amount: Decimal,
    netto_total: Decimal,
    version: i64,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        let status = self.status.parse::<OrderStatus>().unwrap_or_else(|e| {
            tracing::warn!(order_id = self.id, error = %e, "Invalid order status, defaulting to Pending");
            OrderStatus::Pending
        });
        Order {
            id: self.id,
            customer_id: self.customer_id,
            order_datetime: self.order_datetime,
            status,
            delivery_address_id: self.delivery_address_id,
            coupon_id: self.coupon_id,
            total_amount: self.total_amount,
            discount_amount: self.discount_amount,
            tax_amount: self.tax_amount,
            netto_total: self.netto_total,
            version: self.version,
            items,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    order_id: i64,
    menu_item_id: i64,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
    is_pizza: bool,
    instructions: String,
    // order_item_pizzas (LEFT JOIN)
    size_id: Option<i64>,
    crust_type_id: Option<i64>,
    sauce_id: Option<i64>,
    cheese_id: Option<i64>,
    pizza_instructions: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ToppingRow {
    order_item_id: i64,
    topping_id: i64,
    portion: String,
    side: String,
}

impl ToppingRow {
    fn into_topping(self) -> PizzaTopping {
        let portion = self.portion.parse::<Portion>().unwrap_or_else(|e| {
            tracing::warn!(order_item_id = self.order_item_id, error = %e, "Invalid portion, defaulting to Normal");
            Portion::Normal
        });
        let side = self.side.parse::<ToppingSide>().unwrap_or_else(|e| {
            tracing::warn!(order_item_id = self.order_item_id, error = %e, "Invalid side, defaulting to Whole");
            ToppingSide::Whole
        });
        PizzaTopping {
            topping_id: self.topping_id,
            portion,
            side,
        }
    }
}

const ORDER_COLUMNS: &str = "id, customer_id, order_datetime, status, delivery_address_id, coupon_id, \
     total_amount, discount_amount, tax_amount, netto_total, version";

// ── Loading ──

/// Load items (with pizzas and toppings) for a set of orders, keyed by order id
async fn load_items(
    pool: &PgPool,
    order_ids: &[i64],
) -> Result<HashMap<i64, Vec<OrderItem>>, sqlx::Error> {
    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(by_order);
    }

    let rows = sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT i.id, i.order_id, i.menu_item_id, i.quantity, i.unit_price, i.total_price,
               i.is_pizza, i.instructions,
               p.size_id, p.crust_type_id, p.sauce_id, p.cheese_id,
               p.instructions AS pizza_instructions
        FROM order_items i
        LEFT JOIN order_item_pizzas p ON p.order_item_id = i.id
        WHERE i.order_id = ANY($1)
        ORDER BY i.order_id, i.position
        "#,
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;

    let item_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let topping_rows = sqlx::query_as::<_, ToppingRow>(
        r#"
        SELECT order_item_id, topping_id, portion, side
        FROM order_item_pizza_toppings
        WHERE order_item_id = ANY($1)
        ORDER BY order_item_id, position
        "#,
    )
    .bind(&item_ids)
    .fetch_all(pool)
    .await?;

    let mut toppings: HashMap<i64, Vec<PizzaTopping>> = HashMap::new();
    for row in topping_rows {
        toppings
            .entry(row.order_item_id)
            .or_default()
            .push(row.into_topping());
    }

    for row in rows {
        let pizza = match (row.size_id, row.crust_type_id, row.sauce_id, row.cheese_id) {
            (Some(size_id), Some(crust_type_id), Some(sauce_id), Some(cheese_id)) => {
                Some(OrderItemPizza {
                    size_id,
                    crust_type_id,
                    sauce_id,
                    cheese_id,
                    instructions: row.pizza_instructions.unwrap_or_default(),
                    toppings: toppings.remove(&row.id).unwrap_or_default(),
                })
            }
            _ => None,
        };
        by_order.entry(row.order_id).or_default().push(OrderItem {
            id: row.id,
            menu_item_id: row.menu_item_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_price: row.total_price,
            is_pizza: row.is_pizza,
            instructions: row.instructions,
            pizza,
        });
    }

    Ok(by_order)
}

pub async fn find_order(
    pool: &PgPool,
    customer_id: i64,
    order_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND customer_id = $2"
    ))
    .bind(order_id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut items = load_items(pool, &[row.id]).await?;
    let items = items.remove(&row.id).unwrap_or_default();
    Ok(Some(row.into_order(items)))
}

pub async fn list_orders(pool: &PgPool, customer_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY order_datetime DESC, id DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut items = load_items(pool, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let order_items = items.remove(&row.id).unwrap_or_default();
            row.into_order(order_items)
        })
        .collect())
}

pub async fn address_belongs_to(
    pool: &PgPool,
    customer_id: i64,
    address_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM addresses WHERE id = $1 AND customer_id = $2)",
    )
    .bind(address_id)
    .bind(customer_id)
    .fetch_one(pool)
    .await
}

// ── Writes ──

async fn insert_lines(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i64,
    order: &NewOrder,
) -> Result<(), sqlx::Error> {
    for (position, line) in order.lines.iter().enumerate() {
        let item_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO order_items (
                order_id, position, menu_item_id, quantity, unit_price, total_price,
                is_pizza, instructions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(order_id)
        .bind(position as i32)
        .bind(line.menu_item_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.total_price)
        .bind(line.is_pizza)
        .bind(&line.instructions)
        .fetch_one(&mut **tx)
        .await?;

        let Some(pizza) = &line.pizza else {
            continue;
        };
        sqlx::query(
            r#"
            INSERT INTO order_item_pizzas (
                order_item_id, size_id, crust_type_id, sauce_id, cheese_id, instructions
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item_id)
        .bind(pizza.size_id)
        .bind(pizza.crust_type_id)
        .bind(pizza.sauce_id)
        .bind(pizza.cheese_id)
        .bind(&pizza.instructions)
        .execute(&mut **tx)
        .await?;

        for (topping_position, topping) in pizza.toppings.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_item_pizza_toppings (
                    order_item_id, position, topping_id, portion, side
                )
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item_id)
            .bind(topping_position as i32)
            .bind(topping.topping_id)
            .bind(topping.portion.as_str())
            .bind(topping.side.as_str())
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}

/// Insert the order with all lines in one transaction
pub async fn insert_order(pool: &PgPool, order: &NewOrder) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let order_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO orders (
            customer_id, order_datetime, status, delivery_address_id, coupon_id,
            total_amount, discount_amount, tax_amount, netto_total, version
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 1)
        RETURNING id
        "#,
    )
    .bind(order.customer_id)
    .bind(order.order_datetime)
    .bind(order.status.as_str())
    .bind(order.delivery_address_id)
    .bind(order.coupon_id)
    .bind(order.totals.gross)
    .bind(order.totals.discount)
    .bind(order.totals.tax)
    .bind(order.totals.net)
    .fetch_one(&mut *tx)
    .await?;

    insert_lines(&mut tx, order_id, order).await?;

    tx.commit().await?;
    Ok(order_id)
}

/// Version-checked update of status, coupon reference and amounts
///
/// Returns the new version, or `None` when the row is gone or its version moved on.
pub async fn update_order(pool: &PgPool, order: &Order) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        UPDATE orders
        SET status = $1, coupon_id = $2, discount_amount = $3,
            netto_total = $4, tax_amount = $5, version = version + 1
        WHERE id = $6 AND customer_id = $7 AND version = $8
        RETURNING version
        "#,
    )
    .bind(order.status.as_str())
    .bind(order.coupon_id)
    .bind(order.discount_amount)
    .bind(order.netto_total)
    .bind(order.tax_amount)
    .bind(order.id)
    .bind(order.customer_id)
    .bind(order.version)
    .fetch_optional(pool)
    .await
}

/// Delete an order; items, pizzas and toppings go with it via `ON DELETE CASCADE`
pub async fn delete_order(
    pool: &PgPool,
    customer_id: i64,
    order_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND customer_id = $2")
        .bind(order_id)
        .bind(customer_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl OrderStore for PgStore {
    async fn address_belongs_to(&self, customer_id: i64, address_id: i64) -> ServiceResult<bool> {
        Ok(address_belongs_to(self.pool(), customer_id, address_id).await?)
    }

    async fn insert_order(&self, order: NewOrder) -> ServiceResult<Order> {
        let order_id = insert_order(self.pool(), &order).await?;
        let stored = find_order(self.pool(), order.customer_id, order_id)
            .await?
            .ok_or_else(|| -> BoxError { format!("order {order_id} missing after insert").into() })?;
        Ok(stored)
    }

    async fn find_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<Option<Order>> {
        Ok(find_order(self.pool(), customer_id, order_id).await?)
    }

    async fn list_orders(&self, customer_id: i64) -> ServiceResult<Vec<Order>> {
        Ok(list_orders(self.pool(), customer_id).await?)
    }

    async fn update_order(&self, order: &Order) -> ServiceResult<Order> {
        match update_order(self.pool(), order).await? {
            Some(version) => Ok(Order {
                version,
                ..order.clone()
            }),
            None => {
                tracing::warn!(
                    order_id = order.id,
                    version = order.version,
                    "Order version conflict"
                );
                Err(AppError::new(ErrorCode::OrderVersionConflict)
                    .with_detail("order_id", order.id)
                    .into())
            }
        }
    }

    async fn delete_order(&self, customer_id: i64, order_id: i64) -> ServiceResult<bool> {
        Ok(delete_order(self.pool(), customer_id, order_id).await?)
    }
}
