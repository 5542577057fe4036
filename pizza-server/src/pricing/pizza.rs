//! Pizza unit price composition
//!
//! `unit = menu item + size + crust + sauce + cheese + Σ topping × portion`.
//! The result is exact; nothing is rounded here.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderItemPizza, PizzaInput, PizzaTopping, Portion};

use super::catalog::{CatalogKind, CatalogProvider, require};
use super::money::EXTRA_PORTION_MULTIPLIER;
use crate::error::ServiceResult;
use crate::orders::validation::{MAX_INSTRUCTIONS_LEN, validate_instructions};

/// Price contribution of one topping selection (side never affects price)
#[inline]
pub fn topping_charge(price: Decimal, portion: Portion) -> Decimal {
    match portion {
        Portion::Normal => price,
        Portion::Extra => price * EXTRA_PORTION_MULTIPLIER,
    }
}

/// Sum a base price, the four component prices and the topping charges
pub fn compose_unit_price(
    base_price: Decimal,
    components: [Decimal; 4],
    toppings: &[(Decimal, Portion)],
) -> Decimal {
    let mut unit_price = base_price + components.iter().copied().sum::<Decimal>();
    for &(price, portion) in toppings {
        unit_price += topping_charge(price, portion);
    }
    unit_price
}

/// Priced pizza customization for one line
#[derive(Debug, Clone)]
pub struct PricedPizza {
    pub unit_price: Decimal,
    pub customization: OrderItemPizza,
}

fn required_component(value: Option<i64>, field: String) -> Result<i64, AppError> {
    value.ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_field(field)
    })
}

/// Resolve a pizza customization against the catalog and price it
///
/// `path` is the request path of the customization (e.g. `items[2].pizza`)
/// and prefixes every field reported in an error.
pub async fn price_pizza(
    catalog: &dyn CatalogProvider,
    base_price: Decimal,
    input: &PizzaInput,
    path: &str,
) -> ServiceResult<PricedPizza> {
    let size_field = format!("{path}.size_id");
    let crust_field = format!("{path}.crust_type_id");
    let sauce_field = format!("{path}.sauce_id");
    let cheese_field = format!("{path}.cheese_id");

    let size_id = required_component(input.size_id, size_field.clone())?;
    let crust_type_id = required_component(input.crust_type_id, crust_field.clone())?;
    let sauce_id = required_component(input.sauce_id, sauce_field.clone())?;
    let cheese_id = required_component(input.cheese_id, cheese_field.clone())?;
    validate_instructions(
        &input.instructions,
        &format!("{path}.instructions"),
        MAX_INSTRUCTIONS_LEN,
    )?;

    let size = require(catalog, CatalogKind::PizzaSize, size_id, &size_field).await?;
    let crust = require(catalog, CatalogKind::Crust, crust_type_id, &crust_field).await?;
    let sauce = require(catalog, CatalogKind::Sauce, sauce_id, &sauce_field).await?;
    let cheese = require(catalog, CatalogKind::Cheese, cheese_id, &cheese_field).await?;

    let mut charges = Vec::with_capacity(input.toppings.len());
    let mut toppings = Vec::with_capacity(input.toppings.len());
    for (i, selection) in input.toppings.iter().enumerate() {
        let field = format!("{path}.toppings[{i}].topping_id");
        let topping = require(catalog, CatalogKind::Topping, selection.topping_id, &field).await?;
        charges.push((topping.price, selection.portion));
        toppings.push(PizzaTopping {
            topping_id: topping.id,
            portion: selection.portion,
            side: selection.side,
        });
    }

    let unit_price = compose_unit_price(
        base_price,
        [size.price, crust.price, sauce.price, cheese.price],
        &charges,
    );

    Ok(PricedPizza {
        unit_price,
        customization: OrderItemPizza {
            size_id,
            crust_type_id,
            sauce_id,
            cheese_id,
            instructions: input.instructions.clone(),
            toppings,
        },
    })
}
