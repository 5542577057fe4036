//! Catalog price lookup
//!
//! Read-only view of the priced catalog entities the engine needs. An id that
//! does not resolve is reported against the request field that carried it.

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};

use crate::error::ServiceResult;

/// Kind of priced catalog entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    MenuItem,
    PizzaSize,
    Crust,
    Sauce,
    Cheese,
    Topping,
}

impl CatalogKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MenuItem => "Menu item",
            Self::PizzaSize => "Pizza size",
            Self::Crust => "Crust type",
            Self::Sauce => "Sauce",
            Self::Cheese => "Cheese",
            Self::Topping => "Topping",
        }
    }

    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            Self::MenuItem => ErrorCode::MenuItemNotFound,
            Self::PizzaSize => ErrorCode::PizzaSizeNotFound,
            Self::Crust => ErrorCode::CrustNotFound,
            Self::Sauce => ErrorCode::SauceNotFound,
            Self::Cheese => ErrorCode::CheeseNotFound,
            Self::Topping => ErrorCode::ToppingNotFound,
        }
    }
}

/// A catalog entity reduced to what pricing needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedEntity {
    pub id: i64,
    pub price: Decimal,
}

/// Catalog price provider
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Look up a priced entity; `Ok(None)` when the id does not resolve
    async fn lookup(&self, kind: CatalogKind, id: i64) -> ServiceResult<Option<PricedEntity>>;
}

/// Look up an entity that must exist, failing with a field-level error
pub async fn require(
    catalog: &dyn CatalogProvider,
    kind: CatalogKind,
    id: i64,
    field: &str,
) -> ServiceResult<PricedEntity> {
    match catalog.lookup(kind, id).await? {
        Some(entity) => Ok(entity),
        None => Err(AppError::with_message(
            kind.not_found_code(),
            format!("{} {} not found", kind.label(), id),
        )
        .with_field(field)
        .with_detail("id", id)
        .into()),
    }
}
