//! Input validation helpers for order requests

use shared::error::{AppError, ErrorCode};

use crate::pricing::money::MAX_QUANTITY;

/// Free-text instructions on lines and pizzas
pub const MAX_INSTRUCTIONS_LEN: usize = 500;

/// Coupon codes
pub const MAX_COUPON_CODE_LEN: usize = 50;

/// Validate that a free-text field is within the length limit.
pub fn validate_instructions(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_field(field));
    }
    Ok(())
}

/// Validate a line quantity and narrow it to the stored integer width.
pub fn validate_quantity(quantity: i64, field: &str) -> Result<i32, AppError> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity must be positive, got {quantity}"),
        )
        .with_field(field));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"),
        )
        .with_field(field));
    }
    i32::try_from(quantity).map_err(|_| AppError::new(ErrorCode::InvalidQuantity).with_field(field))
}

/// Normalize a submitted coupon code; blank means "no coupon".
pub fn normalize_coupon_code(code: Option<&str>, field: &str) -> Result<Option<String>, AppError> {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    if code.len() > MAX_COUPON_CODE_LEN {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {MAX_COUPON_CODE_LEN})",
            code.len()
        ))
        .with_field(field));
    }
    Ok(Some(code.to_string()))
}
