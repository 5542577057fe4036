//! Coupon validity and discount computation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{Coupon, DiscountType};

use super::money::round_money;

/// Active, unexpired and under its usage limit
pub fn is_valid(coupon: &Coupon, now: DateTime<Utc>) -> bool {
    coupon.is_active && now < coupon.expiration_date && coupon.used_count < coupon.usage_limit
}

/// Discount a coupon grants on a gross total
///
/// Percentage coupons take `value / 100` of the total, amount coupons take
/// `value` flat. The result is rounded to cents and clamped to `[0, gross]`.
pub fn apply_discount(coupon: &Coupon, gross_total: Decimal) -> Decimal {
    let raw = match coupon.discount_type {
        DiscountType::Percentage => coupon.discount_value / Decimal::ONE_HUNDRED * gross_total,
        DiscountType::Amount => coupon.discount_value,
    };
    round_money(raw).clamp(Decimal::ZERO, gross_total.max(Decimal::ZERO))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    pub(crate) fn coupon(discount_type: DiscountType, value: Decimal) -> Coupon {
        Coupon {
            id: 1,
            code: "SAVE".to_string(),
            description: String::new(),
            discount_type,
            discount_value: value,
            expiration_date: Utc::now() + Duration::days(30),
            is_active: true,
            usage_limit: 10,
            used_count: 0,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let c = coupon(DiscountType::Percentage, dec!(10));
        assert_eq!(apply_discount(&c, dec!(100.00)), dec!(10.00));
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        let c = coupon(DiscountType::Percentage, dec!(15));
        // 15% of 12.30 = 1.845
        assert_eq!(apply_discount(&c, dec!(12.30)), dec!(1.85));
    }

    #[test]
    fn test_amount_discount_is_flat() {
        let c = coupon(DiscountType::Amount, dec!(5.00));
        assert_eq!(apply_discount(&c, dec!(100.00)), dec!(5.00));
        assert_eq!(apply_discount(&c, dec!(7.50)), dec!(5.00));
    }

    #[test]
    fn test_amount_exceeding_total_is_clamped() {
        let c = coupon(DiscountType::Amount, dec!(150.00));
        assert_eq!(apply_discount(&c, dec!(100.00)), dec!(100.00));
    }

    #[test]
    fn test_clamp_invariant_across_inputs() {
        let grosses = [dec!(0), dec!(0.01), dec!(9.99), dec!(38.00), dec!(100.00), dec!(12345.67)];
        let coupons = [
            coupon(DiscountType::Percentage, dec!(0)),
            coupon(DiscountType::Percentage, dec!(33.33)),
            coupon(DiscountType::Percentage, dec!(100)),
            coupon(DiscountType::Percentage, dec!(250)),
            coupon(DiscountType::Amount, dec!(0)),
            coupon(DiscountType::Amount, dec!(0.01)),
            coupon(DiscountType::Amount, dec!(50)),
            coupon(DiscountType::Amount, dec!(99999)),
        ];
        for c in &coupons {
            for &gross in &grosses {
                let d = apply_discount(c, gross);
                assert!(d >= Decimal::ZERO && d <= gross, "{d} out of [0, {gross}]");
                assert_eq!(apply_discount(c, gross), d);
            }
        }
    }

    #[test]
    fn test_validity() {
        let now = Utc::now();
        let valid = coupon(DiscountType::Amount, dec!(5));
        assert!(is_valid(&valid, now));

        let expired = Coupon {
            expiration_date: now - Duration::days(1),
            ..valid.clone()
        };
        assert!(!is_valid(&expired, now));

        let expiring_now = Coupon {
            expiration_date: now,
            ..valid.clone()
        };
        assert!(!is_valid(&expiring_now, now));

        let inactive = Coupon {
            is_active: false,
            ..valid.clone()
        };
        assert!(!is_valid(&inactive, now));

        let used_up = Coupon {
            used_count: 10,
            ..valid.clone()
        };
        assert!(!is_valid(&used_up, now));
    }
}
