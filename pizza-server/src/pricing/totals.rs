//! Order totals: gross / discount / net / tax decomposition
//!
//! Totals are always recomputed wholesale from `(gross, discount)`, so applying
//! or removing a coupon any number of times converges to the same state.
//! `net` and `tax` are rounded independently and may miss `gross - discount`
//! by up to one cent.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{Coupon, Order};

use super::coupon::{apply_discount, is_valid};
use super::money::{money_eq, round_money};

/// Default sales tax rate (8%), tax-inclusive prices
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Decomposed order amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub gross: Decimal,
    pub discount: Decimal,
    pub net: Decimal,
    pub tax: Decimal,
}

/// Derive net and tax from a gross total and a discount
pub fn calculate(gross: Decimal, discount: Decimal, tax_rate: Decimal) -> OrderTotals {
    let discounted = gross - discount;
    let net = discounted / (Decimal::ONE + tax_rate);
    let tax = discounted - net;
    let totals = OrderTotals {
        gross,
        discount,
        net: round_money(net),
        tax: round_money(tax),
    };
    debug_assert!(money_eq(totals.net + totals.tax, discounted));
    totals
}

fn write_totals(order: &mut Order, totals: OrderTotals) {
    order.discount_amount = totals.discount;
    order.netto_total = totals.net;
    order.tax_amount = totals.tax;
}

/// Apply the order's coupon to its totals
///
/// `coupon` must be the coupon the order references. Returns `false` and
/// leaves the order untouched when there is no coupon or it is not valid.
pub fn apply_coupon(
    order: &mut Order,
    coupon: Option<&Coupon>,
    now: DateTime<Utc>,
    tax_rate: Decimal,
) -> bool {
    let Some(coupon) = coupon else {
        return false;
    };
    if order.coupon_id != Some(coupon.id) || !is_valid(coupon, now) {
        return false;
    }
    let discount = apply_discount(coupon, order.total_amount);
    write_totals(order, calculate(order.total_amount, discount, tax_rate));
    true
}

/// Remove any discount from the order's totals
///
/// Leaves `coupon_id` as is.
pub fn unapply_coupon(order: &mut Order, tax_rate: Decimal) {
    write_totals(order, calculate(order.total_amount, Decimal::ZERO, tax_rate));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::coupon::tests::coupon;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use shared::models::{DiscountType, OrderStatus};

    fn order(gross: Decimal, coupon_id: Option<i64>) -> Order {
        let totals = calculate(gross, Decimal::ZERO, DEFAULT_TAX_RATE);
        Order {
            id: 1,
            customer_id: 1,
            order_datetime: Utc::now(),
            status: OrderStatus::Pending,
            delivery_address_id: None,
            coupon_id,
            total_amount: gross,
            discount_amount: Decimal::ZERO,
            tax_amount: totals.tax,
            netto_total: totals.net,
            version: 1,
            items: Vec::new(),
        }
    }

    fn amounts(o: &Order) -> (Decimal, Decimal, Decimal, Decimal) {
        (o.total_amount, o.discount_amount, o.netto_total, o.tax_amount)
    }

    #[test]
    fn test_default_tax_rate() {
        assert_eq!(DEFAULT_TAX_RATE, dec!(0.08));
    }

    #[test]
    fn test_percentage_coupon_decomposition() {
        let c = coupon(DiscountType::Percentage, dec!(10));
        let mut o = order(dec!(100.00), Some(c.id));
        assert!(apply_coupon(&mut o, Some(&c), Utc::now(), DEFAULT_TAX_RATE));
        assert_eq!(o.discount_amount, dec!(10.00));
        assert_eq!(o.netto_total, dec!(83.33));
        assert_eq!(o.tax_amount, dec!(6.67));
        assert_eq!(o.total_amount, dec!(100.00));
    }

    #[test]
    fn test_amount_coupon_exceeding_total() {
        let c = coupon(DiscountType::Amount, dec!(150.00));
        let mut o = order(dec!(100.00), Some(c.id));
        assert!(apply_coupon(&mut o, Some(&c), Utc::now(), DEFAULT_TAX_RATE));
        assert_eq!(o.discount_amount, dec!(100.00));
        assert_eq!(o.netto_total, dec!(0.00));
        assert_eq!(o.tax_amount, dec!(0.00));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let c = coupon(DiscountType::Percentage, dec!(15));
        let mut o = order(dec!(38.00), Some(c.id));
        apply_coupon(&mut o, Some(&c), Utc::now(), DEFAULT_TAX_RATE);
        let first = amounts(&o);
        apply_coupon(&mut o, Some(&c), Utc::now(), DEFAULT_TAX_RATE);
        assert_eq!(amounts(&o), first);
    }

    #[test]
    fn test_apply_then_unapply_round_trip() {
        let c = coupon(DiscountType::Amount, dec!(7.25));
        let mut o = order(dec!(64.46), Some(c.id));
        let before = amounts(&o);
        apply_coupon(&mut o, Some(&c), Utc::now(), DEFAULT_TAX_RATE);
        assert_ne!(amounts(&o), before);
        unapply_coupon(&mut o, DEFAULT_TAX_RATE);
        assert_eq!(amounts(&o), before);
        assert_eq!(o.coupon_id, Some(c.id));
    }

    #[test]
    fn test_expired_coupon_is_a_no_op() {
        let c = Coupon {
            expiration_date: Utc::now() - Duration::days(1),
            ..coupon(DiscountType::Percentage, dec!(50))
        };
        let mut o = order(dec!(100.00), Some(c.id));
        let before = amounts(&o);
        assert!(!apply_coupon(&mut o, Some(&c), Utc::now(), DEFAULT_TAX_RATE));
        assert_eq!(amounts(&o), before);
    }

    #[test]
    fn test_missing_coupon_is_a_no_op() {
        let mut o = order(dec!(100.00), None);
        let before = amounts(&o);
        assert!(!apply_coupon(&mut o, None, Utc::now(), DEFAULT_TAX_RATE));
        assert_eq!(amounts(&o), before);
    }

    #[test]
    fn test_coupon_not_referenced_by_order_is_a_no_op() {
        let c = coupon(DiscountType::Amount, dec!(5));
        let mut o = order(dec!(100.00), None);
        assert!(!apply_coupon(&mut o, Some(&c), Utc::now(), DEFAULT_TAX_RATE));
        assert_eq!(o.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn test_decomposition_within_one_cent() {
        let rates = [dec!(0), dec!(0.05), dec!(0.08), dec!(0.21)];
        let grosses = [dec!(0.01), dec!(1.00), dec!(9.99), dec!(38.00), dec!(100.00), dec!(1234.57)];
        let discounts = [dec!(0), dec!(0.01), dec!(3.33), dec!(10.00)];
        for &rate in &rates {
            for &gross in &grosses {
                for &discount in &discounts {
                    let discount = discount.min(gross);
                    let t = calculate(gross, discount, rate);
                    assert!(
                        money_eq(t.net + t.tax, gross - discount),
                        "{} + {} vs {}",
                        t.net,
                        t.tax,
                        gross - discount
                    );
                    assert!(t.net.scale() <= 2);
                    assert!(t.tax.scale() <= 2);
                }
            }
        }
    }

    #[test]
    fn test_no_discount_decomposition() {
        let t = calculate(dec!(100.00), Decimal::ZERO, DEFAULT_TAX_RATE);
        assert_eq!(t.net, dec!(92.59));
        assert_eq!(t.tax, dec!(7.41));
    }
}
