//! Unified error codes for the pizza backend
//!
//! This module defines all error codes returned by the API.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Coupon errors
//! - 6xxx: Menu (catalog) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no line items
    OrderEmpty = 4007,
    /// Order was modified concurrently (optimistic version check failed)
    OrderVersionConflict = 4008,
    /// Line quantity is not a positive integer within bounds
    InvalidQuantity = 4009,
    /// Pizza line submitted without its customization
    PizzaCustomizationRequired = 4010,
    /// Delivery address does not exist or belongs to another customer
    DeliveryAddressNotFound = 4011,
    /// Order is delivered or cancelled and can no longer change status
    OrderStatusFinal = 4012,

    // ==================== 5xxx: Coupon ====================
    /// Coupon code not found
    CouponNotFound = 5001,
    /// Coupon exists but is inactive, expired or used up
    CouponInvalid = 5002,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Pizza size not found
    PizzaSizeNotFound = 6101,
    /// Crust type not found
    CrustNotFound = 6102,
    /// Sauce not found
    SauceNotFound = 6103,
    /// Cheese not found
    CheeseNotFound = 6104,
    /// Topping not found
    ToppingNotFound = 6105,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenInvalid => "Token is invalid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderVersionConflict => "Order was modified concurrently, retry",
            ErrorCode::InvalidQuantity => "Quantity must be a positive integer",
            ErrorCode::PizzaCustomizationRequired => "Pizza items require a customization",
            ErrorCode::DeliveryAddressNotFound => "Delivery address not found",
            ErrorCode::OrderStatusFinal => "Order status can no longer change",

            // Coupon
            ErrorCode::CouponNotFound => "Invalid coupon code",
            ErrorCode::CouponInvalid => "This coupon is not valid",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::PizzaSizeNotFound => "Pizza size not found",
            ErrorCode::CrustNotFound => "Crust type not found",
            ErrorCode::SauceNotFound => "Sauce not found",
            ErrorCode::CheeseNotFound => "Cheese not found",
            ErrorCode::ToppingNotFound => "Topping not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderVersionConflict),
            4009 => Ok(ErrorCode::InvalidQuantity),
            4010 => Ok(ErrorCode::PizzaCustomizationRequired),
            4011 => Ok(ErrorCode::DeliveryAddressNotFound),
            4012 => Ok(ErrorCode::OrderStatusFinal),

            // Coupon
            5001 => Ok(ErrorCode::CouponNotFound),
            5002 => Ok(ErrorCode::CouponInvalid),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6101 => Ok(ErrorCode::PizzaSizeNotFound),
            6102 => Ok(ErrorCode::CrustNotFound),
            6103 => Ok(ErrorCode::SauceNotFound),
            6104 => Ok(ErrorCode::CheeseNotFound),
            6105 => Ok(ErrorCode::ToppingNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
