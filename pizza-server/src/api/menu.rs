//! Menu (catalog) read endpoints - public

use axum::{Json, Router, extract::State, routing::get};
use shared::error::AppError;
use shared::models::{Category, Cheese, CrustType, MenuItem, PizzaSize, Sauce, Topping};

use super::ApiResult;
use crate::db::{BoxError, catalog};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/menu/categories", get(list_categories))
        .route("/api/v1/menu/menu-items", get(list_menu_items))
        .route("/api/v1/menu/pizza-sizes", get(list_pizza_sizes))
        .route("/api/v1/menu/crust-types", get(list_crust_types))
        .route("/api/v1/menu/sauces", get(list_sauces))
        .route("/api/v1/menu/cheeses", get(list_cheeses))
        .route("/api/v1/menu/toppings", get(list_toppings))
}

fn catalog_error(what: &str, e: BoxError) -> AppError {
    tracing::error!("Catalog query error ({what}): {e}");
    AppError::database(format!("Failed to load {what}"))
}

/// GET /api/v1/menu/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = catalog::list_categories(&state.pool)
        .await
        .map_err(|e| catalog_error("categories", e))?;
    Ok(Json(categories))
}

/// GET /api/v1/menu/menu-items
pub async fn list_menu_items(State(state): State<AppState>) -> ApiResult<Vec<MenuItem>> {
    let items = catalog::list_menu_items(&state.pool)
        .await
        .map_err(|e| catalog_error("menu items", e))?;
    Ok(Json(items))
}

/// GET /api/v1/menu/pizza-sizes
pub async fn list_pizza_sizes(State(state): State<AppState>) -> ApiResult<Vec<PizzaSize>> {
    let sizes = catalog::list_pizza_sizes(&state.pool)
        .await
        .map_err(|e| catalog_error("pizza sizes", e))?;
    Ok(Json(sizes))
}

/// GET /api/v1/menu/crust-types
pub async fn list_crust_types(State(state): State<AppState>) -> ApiResult<Vec<CrustType>> {
    let crusts = catalog::list_crust_types(&state.pool)
        .await
        .map_err(|e| catalog_error("crust types", e))?;
    Ok(Json(crusts))
}

/// GET /api/v1/menu/sauces
pub async fn list_sauces(State(state): State<AppState>) -> ApiResult<Vec<Sauce>> {
    let sauces = catalog::list_sauces(&state.pool)
        .await
        .map_err(|e| catalog_error("sauces", e))?;
    Ok(Json(sauces))
}

/// GET /api/v1/menu/cheeses
pub async fn list_cheeses(State(state): State<AppState>) -> ApiResult<Vec<Cheese>> {
    let cheeses = catalog::list_cheeses(&state.pool)
        .await
        .map_err(|e| catalog_error("cheeses", e))?;
    Ok(Json(cheeses))
}

/// GET /api/v1/menu/toppings
pub async fn list_toppings(State(state): State<AppState>) -> ApiResult<Vec<Topping>> {
    let toppings = catalog::list_toppings(&state.pool)
        .await
        .map_err(|e| catalog_error("toppings", e))?;
    Ok(Json(toppings))
}
