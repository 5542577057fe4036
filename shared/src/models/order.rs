//! Order Model
//!
//! Persisted order aggregate plus the request payloads used to create and
//! mutate it. Prices never appear on the request types: unit and line totals
//! are always derived server-side from the catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    #[serde(rename = "Out for Delivery", alias = "OutForDelivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Preparing" => Ok(Self::Preparing),
            "Out for Delivery" | "OutForDelivery" => Ok(Self::OutForDelivery),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Topping quantity modifier (affects price)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Portion {
    #[default]
    Normal,
    /// Charged at 1.5x the topping price
    Extra,
}

impl Portion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Extra => "Extra",
        }
    }
}

impl std::str::FromStr for Portion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Self::Normal),
            "Extra" => Ok(Self::Extra),
            other => Err(format!("unknown portion: {other}")),
        }
    }
}

/// Where a topping goes on the pizza (presentation only, never priced)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ToppingSide {
    #[default]
    Whole,
    #[serde(rename = "Left Half", alias = "LeftHalf")]
    LeftHalf,
    #[serde(rename = "Right Half", alias = "RightHalf")]
    RightHalf,
}

impl ToppingSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whole => "Whole",
            Self::LeftHalf => "Left Half",
            Self::RightHalf => "Right Half",
        }
    }
}

impl std::str::FromStr for ToppingSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Whole" => Ok(Self::Whole),
            "Left Half" | "LeftHalf" => Ok(Self::LeftHalf),
            "Right Half" | "RightHalf" => Ok(Self::RightHalf),
            other => Err(format!("unknown topping side: {other}")),
        }
    }
}

// ==================== Persisted aggregate ====================

/// Topping selection stored on a pizza line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PizzaTopping {
    pub topping_id: i64,
    pub portion: Portion,
    pub side: ToppingSide,
}

/// Pizza customization stored on a line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemPizza {
    pub size_id: i64,
    pub crust_type_id: i64,
    pub sauce_id: i64,
    pub cheese_id: i64,
    pub instructions: String,
    pub toppings: Vec<PizzaTopping>,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub menu_item_id: i64,
    pub quantity: i32,
    /// Derived per-unit price (menu price + customization)
    pub unit_price: Decimal,
    /// `unit_price * quantity`
    pub total_price: Decimal,
    pub is_pizza: bool,
    pub instructions: String,
    pub pizza: Option<OrderItemPizza>,
}

/// Order entity
///
/// Amount chain: `total_amount >= discount_amount >= 0` and
/// `netto_total + tax_amount == total_amount - discount_amount` (± 0.01).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub order_datetime: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address_id: Option<i64>,
    pub coupon_id: Option<i64>,
    /// Gross total, fixed at creation
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub netto_total: Decimal,
    /// Optimistic concurrency token, bumped on every totals/status write
    pub version: i64,
    pub items: Vec<OrderItem>,
}

// ==================== Request payloads ====================

/// Topping selection in an order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToppingInput {
    #[serde(alias = "topping")]
    pub topping_id: i64,
    #[serde(default)]
    pub portion: Portion,
    #[serde(default)]
    pub side: ToppingSide,
}

/// Pizza customization in an order request
///
/// Component ids are optional at the wire level so a missing one is reported
/// as a field-level validation error instead of a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PizzaInput {
    #[serde(alias = "size")]
    pub size_id: Option<i64>,
    #[serde(alias = "crust_type")]
    pub crust_type_id: Option<i64>,
    #[serde(alias = "sauce")]
    pub sauce_id: Option<i64>,
    #[serde(alias = "cheese")]
    pub cheese_id: Option<i64>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub toppings: Vec<ToppingInput>,
}

/// Line item in an order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(alias = "menu_item")]
    pub menu_item_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub is_pizza: bool,
    #[serde(default)]
    pub instructions: String,
    pub pizza: Option<PizzaInput>,
}

fn default_quantity() -> i64 {
    1
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub delivery_address_id: Option<i64>,
    #[serde(alias = "coupon")]
    pub coupon_code: Option<String>,
    pub items: Vec<OrderItemInput>,
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Apply coupon to order payload (`PUT /api/v1/orders/{id}/coupon`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCouponApply {
    pub coupon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_input_defaults() {
        let item: OrderItemInput = serde_json::from_str(r#"{"menu_item": 3}"#).unwrap();
        assert_eq!(item.menu_item_id, 3);
        assert_eq!(item.quantity, 1);
        assert!(!item.is_pizza);
        assert!(item.pizza.is_none());
    }

    #[test]
    fn test_pizza_input_accepts_short_field_names() {
        let json = r#"{
            "size": 1, "crust_type": 2, "sauce": 3, "cheese": 4,
            "toppings": [{"topping": 5, "portion": "Extra", "side": "Left Half"}]
        }"#;
        let pizza: PizzaInput = serde_json::from_str(json).unwrap();
        assert_eq!(pizza.size_id, Some(1));
        assert_eq!(pizza.cheese_id, Some(4));
        assert_eq!(pizza.toppings[0].portion, Portion::Extra);
        assert_eq!(pizza.toppings[0].side, ToppingSide::LeftHalf);
    }

    #[test]
    fn test_topping_defaults_to_normal_whole() {
        let topping: ToppingInput = serde_json::from_str(r#"{"topping_id": 9}"#).unwrap();
        assert_eq!(topping.portion, Portion::Normal);
        assert_eq!(topping.side, ToppingSide::Whole);
    }

    #[test]
    fn test_unknown_portion_rejected() {
        let result = serde_json::from_str::<ToppingInput>(r#"{"topping_id": 9, "portion": "Double"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_storage_strings_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for Delivery\"");
    }

    #[test]
    fn test_side_and_portion_storage_strings_round_trip() {
        for side in [ToppingSide::Whole, ToppingSide::LeftHalf, ToppingSide::RightHalf] {
            assert_eq!(side.as_str().parse::<ToppingSide>(), Ok(side));
        }
        for portion in [Portion::Normal, Portion::Extra] {
            assert_eq!(portion.as_str().parse::<Portion>(), Ok(portion));
        }
    }
}
