//! API routes for pizza-server

pub mod coupons;
pub mod health;
pub mod menu;
pub mod orders;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, middleware};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::customer_auth_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Unwrap a JSON body, turning parse failures into a validation error
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::with_message(
            ErrorCode::ValidationFailed,
            rejection.body_text(),
        )),
    }
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    // Customer API (JWT authenticated)
    let customer = Router::new()
        .merge(orders::router())
        .merge(coupons::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            customer_auth_middleware,
        ));

    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(customer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
