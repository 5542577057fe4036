//! Coupon Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a coupon's `discount_value` is interpreted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscountType {
    /// `discount_value` is a percentage of the gross total (10 = 10%)
    #[serde(alias = "percentage")]
    Percentage,
    /// `discount_value` is a flat currency amount
    #[serde(alias = "amount")]
    Amount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::Amount => "Amount",
        }
    }
}

impl std::str::FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Percentage" | "percentage" => Ok(Self::Percentage),
            "Amount" | "amount" => Ok(Self::Amount),
            other => Err(format!("unknown discount type: {other}")),
        }
    }
}

/// Coupon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    /// Unique redemption code
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub expiration_date: DateTime<Utc>,
    pub is_active: bool,
    pub usage_limit: i32,
    /// Checked against `usage_limit`, never incremented by order flows
    pub used_count: i32,
}

/// Coupon validation request (`POST /api/v1/coupons/apply`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponApply {
    pub code: String,
}

/// Coupon validation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponValidation {
    pub message: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
}
