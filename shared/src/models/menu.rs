//! Menu (catalog) models
//!
//! Read-only from the pricing engine's perspective; rows are owned by the
//! catalog administration side.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Base unit price
    pub price: Decimal,
    /// Whether the item is a customizable pizza base
    pub is_pizza: bool,
    pub is_active: bool,
    pub category_id: Option<i64>,
}

/// Pizza size entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PizzaSize {
    pub id: i64,
    pub name: String,
    /// Diameter in inches
    pub diameter: Decimal,
    pub base_price: Decimal,
}

/// Crust type entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CrustType {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

/// Sauce entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Sauce {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

/// Cheese entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Cheese {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

/// Topping entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Topping {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_meat: bool,
    pub is_active: bool,
}
