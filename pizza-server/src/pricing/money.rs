//! Money helpers using rust_decimal for precision
//!
//! Every amount in the pricing engine is a `Decimal`. Intermediate values are
//! kept exact; rounding to cents happens only where an amount is recorded on
//! the order (line unit price, gross total, discount, net, tax).

use rust_decimal::prelude::*;

/// Currency precision (cents)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Price multiplier for an `Extra` topping portion (1.5)
pub const EXTRA_PORTION_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;

/// Largest amount a money column holds (`NUMERIC(10,2)`): 99,999,999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Round to cents, half-up (midpoint away from zero)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two amounts within `MONEY_TOLERANCE`
#[inline]
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constants() {
        assert_eq!(MONEY_TOLERANCE, dec!(0.01));
        assert_eq!(EXTRA_PORTION_MULTIPLIER, dec!(1.5));
        assert_eq!(MAX_AMOUNT, dec!(99999999.99));
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_money(dec!(83.335)), dec!(83.34));
        assert_eq!(round_money(dec!(83.334)), dec!(83.33));
        assert_eq!(round_money(dec!(6.665)), dec!(6.67));
        assert_eq!(round_money(dec!(2.5)), dec!(2.50));
    }

    #[test]
    fn test_accumulation_precision() {
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += dec!(0.01);
        }
        assert_eq!(total, dec!(10.00));
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(dec!(99.99), dec!(100.00)));
        assert!(money_eq(dec!(100.00), dec!(100.00)));
        assert!(!money_eq(dec!(99.98), dec!(100.00)));
    }
}
