//! Order line aggregation
//!
//! Turns requested items into priced lines and the gross order total. Prices
//! are always derived from the catalog; request payloads carry no prices.
//! Any failing line fails the whole batch, before anything is persisted.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderItemInput, OrderItemPizza};

use super::catalog::{CatalogKind, CatalogProvider, require};
use super::money::{MAX_AMOUNT, round_money};
use super::pizza::price_pizza;
use crate::error::ServiceResult;
use crate::orders::validation::{MAX_INSTRUCTIONS_LEN, validate_instructions, validate_quantity};

/// A priced line ready to be stored
///
/// The stored pair is derived from the rounded unit price, so
/// `total_price == unit_price × quantity` always holds. The order's gross
/// total is summed from `exact_total` instead and rounded once.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub menu_item_id: i64,
    pub quantity: i32,
    /// Per-unit price, rounded to cents for storage
    pub unit_price: Decimal,
    /// `unit_price × quantity`
    pub total_price: Decimal,
    /// Exact unit price × quantity, never rounded
    pub exact_total: Decimal,
    pub is_pizza: bool,
    pub instructions: String,
    pub pizza: Option<OrderItemPizza>,
}

/// All lines of an order plus their gross total
#[derive(Debug, Clone)]
pub struct PricedLines {
    pub lines: Vec<PricedLine>,
    /// Σ line `exact_total`, rounded to cents
    pub gross_total: Decimal,
}

/// Price one requested line
///
/// A customization supplied on a non-pizza line is ignored.
pub async fn price_line(
    catalog: &dyn CatalogProvider,
    index: usize,
    item: &OrderItemInput,
) -> ServiceResult<PricedLine> {
    let path = format!("items[{index}]");
    let quantity = validate_quantity(item.quantity, &format!("{path}.quantity"))?;
    validate_instructions(
        &item.instructions,
        &format!("{path}.instructions"),
        MAX_INSTRUCTIONS_LEN,
    )?;

    let menu_item = require(
        catalog,
        CatalogKind::MenuItem,
        item.menu_item_id,
        &format!("{path}.menu_item_id"),
    )
    .await?;

    let (unit_price, pizza) = if item.is_pizza {
        let Some(input) = item.pizza.as_ref() else {
            return Err(AppError::new(ErrorCode::PizzaCustomizationRequired)
                .with_field(format!("{path}.pizza"))
                .with_detail("item_index", index)
                .into());
        };
        let priced = price_pizza(catalog, menu_item.price, input, &format!("{path}.pizza")).await?;
        (priced.unit_price, Some(priced.customization))
    } else {
        (menu_item.price, None)
    };

    let stored_unit_price = round_money(unit_price);
    let total_price = stored_unit_price * Decimal::from(quantity);
    if total_price > MAX_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Line total {total_price} exceeds the maximum of {MAX_AMOUNT}"),
        )
        .with_field(format!("{path}.quantity"))
        .with_detail("item_index", index)
        .into());
    }

    Ok(PricedLine {
        menu_item_id: menu_item.id,
        quantity,
        unit_price: stored_unit_price,
        total_price,
        exact_total: unit_price * Decimal::from(quantity),
        is_pizza: item.is_pizza,
        instructions: item.instructions.clone(),
        pizza,
    })
}

/// Price every requested line and sum the gross total
pub async fn price_lines(
    catalog: &dyn CatalogProvider,
    items: &[OrderItemInput],
) -> ServiceResult<PricedLines> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty).with_field("items").into());
    }

    let mut lines = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        lines.push(price_line(catalog, index, item).await?);
    }
    let gross_total = round_money(lines.iter().map(|l| l.exact_total).sum());
    if gross_total > MAX_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Order total {gross_total} exceeds the maximum of {MAX_AMOUNT}"),
        )
        .with_field("items")
        .into());
    }

    Ok(PricedLines { lines, gross_total })
}
