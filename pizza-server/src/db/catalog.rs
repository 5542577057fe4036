//! Catalog (menu) database operations

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{Category, Cheese, CrustType, MenuItem, PizzaSize, Sauce, Topping};
use sqlx::PgPool;

use super::{BoxError, PgStore};
use crate::error::ServiceResult;
use crate::pricing::{CatalogKind, CatalogProvider, PricedEntity};

// ── Price lookup ──

/// Price query per kind; menu items and toppings must be active to be ordered
fn price_query(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::MenuItem => "SELECT price FROM menu_items WHERE id = $1 AND is_active = TRUE",
        CatalogKind::PizzaSize => "SELECT base_price FROM pizza_sizes WHERE id = $1",
        CatalogKind::Crust => "SELECT price FROM crust_types WHERE id = $1",
        CatalogKind::Sauce => "SELECT price FROM sauces WHERE id = $1",
        CatalogKind::Cheese => "SELECT price FROM cheeses WHERE id = $1",
        CatalogKind::Topping => "SELECT price FROM toppings WHERE id = $1 AND is_active = TRUE",
    }
}

pub async fn find_price(
    pool: &PgPool,
    kind: CatalogKind,
    id: i64,
) -> Result<Option<Decimal>, sqlx::Error> {
    sqlx::query_scalar(price_query(kind))
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[async_trait]
impl CatalogProvider for PgStore {
    async fn lookup(&self, kind: CatalogKind, id: i64) -> ServiceResult<Option<PricedEntity>> {
        let price = find_price(self.pool(), kind, id).await?;
        Ok(price.map(|price| PricedEntity { id, price }))
    }
}

// ── Menu listing ──

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, BoxError> {
    let rows =
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn list_menu_items(pool: &PgPool) -> Result<Vec<MenuItem>, BoxError> {
    let rows = sqlx::query_as::<_, MenuItem>(
        r#"
        SELECT id, name, description, price, is_pizza, is_active, category_id
        FROM menu_items
        WHERE is_active = TRUE
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_pizza_sizes(pool: &PgPool) -> Result<Vec<PizzaSize>, BoxError> {
    let rows = sqlx::query_as::<_, PizzaSize>(
        "SELECT id, name, diameter, base_price FROM pizza_sizes ORDER BY diameter",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_crust_types(pool: &PgPool) -> Result<Vec<CrustType>, BoxError> {
    let rows = sqlx::query_as::<_, CrustType>("SELECT id, name, price FROM crust_types ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_sauces(pool: &PgPool) -> Result<Vec<Sauce>, BoxError> {
    let rows = sqlx::query_as::<_, Sauce>("SELECT id, name, price FROM sauces ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_cheeses(pool: &PgPool) -> Result<Vec<Cheese>, BoxError> {
    let rows = sqlx::query_as::<_, Cheese>("SELECT id, name, price FROM cheeses ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_toppings(pool: &PgPool) -> Result<Vec<Topping>, BoxError> {
    let rows = sqlx::query_as::<_, Topping>(
        r#"
        SELECT id, name, price, is_vegetarian, is_vegan, is_meat, is_active
        FROM toppings
        WHERE is_active = TRUE
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
