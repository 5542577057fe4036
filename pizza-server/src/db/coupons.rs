//! Coupon database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{Coupon, DiscountType};
use sqlx::PgPool;

use super::{BoxError, PgStore};
use crate::error::ServiceResult;
use crate::orders::CouponStore;

#[derive(sqlx::FromRow)]
struct CouponRow {
    id: i64,
    code: String,
    description: String,
    discount_type: String,
    discount_value: Decimal,
    expiration_date: DateTime<Utc>,
    is_active: bool,
    usage_limit: i32,
    used_count: i32,
}

impl CouponRow {
    fn into_coupon(self) -> Result<Coupon, BoxError> {
        let discount_type: DiscountType = self.discount_type.parse()?;
        Ok(Coupon {
            id: self.id,
            code: self.code,
            description: self.description,
            discount_type,
            discount_value: self.discount_value,
            expiration_date: self.expiration_date,
            is_active: self.is_active,
            usage_limit: self.usage_limit,
            used_count: self.used_count,
        })
    }
}

pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Coupon>, BoxError> {
    let row = sqlx::query_as::<_, CouponRow>(
        r#"
        SELECT id, code, description, discount_type, discount_value,
               expiration_date, is_active, usage_limit, used_count
        FROM coupons
        WHERE code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    row.map(CouponRow::into_coupon).transpose()
}

#[async_trait]
impl CouponStore for PgStore {
    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Coupon>> {
        Ok(find_by_code(self.pool(), code).await?)
    }
}
