//! Coupon validation endpoint

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State, routing::post};
use shared::models::{CouponApply, CouponValidation};

use super::{ApiResult, json_body};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/coupons/apply", post(validate_coupon))
}

/// POST /api/v1/coupons/apply
///
/// Checks a code without attaching it to any order.
pub async fn validate_coupon(
    State(state): State<AppState>,
    payload: Result<Json<CouponApply>, JsonRejection>,
) -> ApiResult<CouponValidation> {
    let req = json_body(payload)?;
    let validation = state.orders.validate_coupon(&req.code).await?;
    Ok(Json(validation))
}
