//! Order endpoints: create, list, detail, status, delete, coupon apply/remove
//!
//! All routes are scoped to the authenticated customer.

use axum::extract::rejection::JsonRejection;
use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use http::StatusCode;
use shared::error::AppError;
use shared::models::{Order, OrderCouponApply, OrderCreate, OrderStatusUpdate};

use super::{ApiResult, json_body};
use crate::auth::CustomerIdentity;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/orders", get(list_orders).post(create_order))
        .route(
            "/api/v1/orders/{id}",
            get(get_order).patch(update_status).delete(delete_order),
        )
        .route(
            "/api/v1/orders/{id}/coupon",
            put(apply_coupon).delete(remove_coupon),
        )
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<CustomerIdentity>,
) -> ApiResult<Vec<Order>> {
    let orders = state.orders.list_orders(identity.customer_id).await?;
    Ok(Json(orders))
}

/// POST /api/v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    Extension(identity): Extension<CustomerIdentity>,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let req = json_body(payload)?;
    let order = state.orders.create_order(identity.customer_id, req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Extension(identity): Extension<CustomerIdentity>,
    Path(order_id): Path<i64>,
) -> ApiResult<Order> {
    let order = state.orders.get_order(identity.customer_id, order_id).await?;
    Ok(Json(order))
}

/// PATCH /api/v1/orders/{id}
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<CustomerIdentity>,
    Path(order_id): Path<i64>,
    payload: Result<Json<OrderStatusUpdate>, JsonRejection>,
) -> ApiResult<Order> {
    let req = json_body(payload)?;
    let order = state
        .orders
        .update_order_status(identity.customer_id, order_id, req.status)
        .await?;
    Ok(Json(order))
}

/// DELETE /api/v1/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(identity): Extension<CustomerIdentity>,
    Path(order_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.orders.delete_order(identity.customer_id, order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/orders/{id}/coupon
pub async fn apply_coupon(
    State(state): State<AppState>,
    Extension(identity): Extension<CustomerIdentity>,
    Path(order_id): Path<i64>,
    payload: Result<Json<OrderCouponApply>, JsonRejection>,
) -> ApiResult<Order> {
    let req = json_body(payload)?;
    let order = state
        .orders
        .apply_coupon_to_order(identity.customer_id, order_id, req.coupon.as_deref())
        .await?;
    Ok(Json(order))
}

/// DELETE /api/v1/orders/{id}/coupon
pub async fn remove_coupon(
    State(state): State<AppState>,
    Extension(identity): Extension<CustomerIdentity>,
    Path(order_id): Path<i64>,
) -> ApiResult<Order> {
    let order = state
        .orders
        .unapply_coupon(identity.customer_id, order_id)
        .await?;
    Ok(Json(order))
}
