//! Allocation amounts
//!
//! The amounts applied by one allocation line: the part that is actually
//! paid, the part given as discount and the part written off. All three
//! share one currency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

use core_kernel::{Currency, Money, MoneyError};

/// Pay, discount and write-off amounts in one currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationAmounts {
    pay_amt: Money,
    discount_amt: Money,
    write_off_amt: Money,
}

impl AllocationAmounts {
    /// Creates amounts from the three parts
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the parts use different currencies
    pub fn new(pay_amt: Money, discount_amt: Money, write_off_amt: Money) -> Result<Self, MoneyError> {
        for other in [&discount_amt, &write_off_amt] {
            if !pay_amt.is_same_currency(other) {
                return Err(MoneyError::CurrencyMismatch(
                    pay_amt.currency().to_string(),
                    other.currency().to_string(),
                ));
            }
        }

        Ok(Self {
            pay_amt,
            discount_amt,
            write_off_amt,
        })
    }

    /// All amounts zero
    pub fn zero(currency: Currency) -> Self {
        Self {
            pay_amt: Money::zero(currency),
            discount_amt: Money::zero(currency),
            write_off_amt: Money::zero(currency),
        }
    }

    /// Only a pay amount, no discount or write-off
    pub fn of_pay_amt(pay_amt: Money) -> Self {
        Self {
            pay_amt,
            ..Self::zero(pay_amt.currency())
        }
    }

    pub fn currency(&self) -> Currency {
        self.pay_amt.currency()
    }

    pub fn pay_amt(&self) -> Money {
        self.pay_amt
    }

    pub fn discount_amt(&self) -> Money {
        self.discount_amt
    }

    pub fn write_off_amt(&self) -> Money {
        self.write_off_amt
    }

    /// Pay + discount + write-off
    pub fn total_amt(&self) -> Money {
        self.pay_amt + self.discount_amt + self.write_off_amt
    }

    /// Returns a copy with the pay amount replaced
    ///
    /// # Panics
    ///
    /// Panics if `pay_amt` is in another currency.
    pub fn with_pay_amt(&self, pay_amt: Money) -> Self {
        assert!(
            pay_amt.currency() == self.currency(),
            "Currency mismatch in AllocationAmounts::with_pay_amt: {} vs {}",
            pay_amt.currency(),
            self.currency()
        );

        Self { pay_amt, ..*self }
    }

    /// Returns a copy with a zero pay amount, keeping discount and write-off
    pub fn with_zero_pay_amt(&self) -> Self {
        Self {
            pay_amt: Money::zero(self.currency()),
            ..*self
        }
    }

    /// True when all three amounts are zero
    pub fn is_zero(&self) -> bool {
        self.pay_amt.is_zero() && self.discount_amt.is_zero() && self.write_off_amt.is_zero()
    }

    /// Moves the pay amount into the discount amount
    pub fn move_pay_amt_to_discount(&self) -> Self {
        Self {
            pay_amt: Money::zero(self.currency()),
            discount_amt: self.discount_amt + self.pay_amt,
            write_off_amt: self.write_off_amt,
        }
    }

    /// Moves the pay amount into the write-off amount
    pub fn move_pay_amt_to_write_off(&self) -> Self {
        Self {
            pay_amt: Money::zero(self.currency()),
            discount_amt: self.discount_amt,
            write_off_amt: self.write_off_amt + self.pay_amt,
        }
    }
}

impl Add for AllocationAmounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            pay_amt: self.pay_amt + other.pay_amt,
            discount_amt: self.discount_amt + other.discount_amt,
            write_off_amt: self.write_off_amt + other.write_off_amt,
        }
    }
}

impl Sub for AllocationAmounts {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            pay_amt: self.pay_amt - other.pay_amt,
            discount_amt: self.discount_amt - other.discount_amt,
            write_off_amt: self.write_off_amt - other.write_off_amt,
        }
    }
}

impl Neg for AllocationAmounts {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            pay_amt: -self.pay_amt,
            discount_amt: -self.discount_amt,
            write_off_amt: -self.write_off_amt,
        }
    }
}

impl fmt::Display for AllocationAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pay={}, discount={}, write-off={}",
            self.pay_amt, self.discount_amt, self.write_off_amt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    #[test]
    fn test_new_rejects_mixed_currencies() {
        let result = AllocationAmounts::new(
            usd(dec!(10)),
            Money::new(dec!(1), Currency::EUR),
            usd(dec!(0)),
        );
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_with_pay_amt_keeps_discount_and_write_off() {
        let amounts = AllocationAmounts::new(usd(dec!(95)), usd(dec!(3)), usd(dec!(2))).unwrap();
        let changed = amounts.with_pay_amt(usd(dec!(60)));

        assert_eq!(changed.pay_amt(), usd(dec!(60)));
        assert_eq!(changed.discount_amt(), usd(dec!(3)));
        assert_eq!(changed.write_off_amt(), usd(dec!(2)));
        assert_eq!(changed.total_amt(), usd(dec!(65)));
    }

    #[test]
    fn test_with_zero_pay_amt_is_zero_only_without_discount_and_write_off() {
        let pay_only = AllocationAmounts::of_pay_amt(usd(dec!(40)));
        assert!(pay_only.with_zero_pay_amt().is_zero());

        let with_discount = AllocationAmounts::new(usd(dec!(40)), usd(dec!(1)), usd(dec!(0))).unwrap();
        assert!(!with_discount.with_zero_pay_amt().is_zero());
    }

    #[test]
    fn test_move_pay_amt_to_write_off() {
        let amounts = AllocationAmounts::new(usd(dec!(40)), usd(dec!(0)), usd(dec!(5))).unwrap();
        let moved = amounts.move_pay_amt_to_write_off();

        assert!(moved.pay_amt().is_zero());
        assert_eq!(moved.write_off_amt(), usd(dec!(45)));
        assert_eq!(moved.total_amt(), amounts.total_amt());
    }

    #[test]
    fn test_move_pay_amt_to_discount() {
        let moved = AllocationAmounts::of_pay_amt(usd(dec!(-12.5))).move_pay_amt_to_discount();

        assert!(moved.pay_amt().is_zero());
        assert_eq!(moved.discount_amt(), usd(dec!(-12.5)));
    }

    #[test]
    fn test_subtract_and_negate() {
        let a = AllocationAmounts::new(usd(dec!(100)), usd(dec!(2)), usd(dec!(1))).unwrap();
        let b = AllocationAmounts::of_pay_amt(usd(dec!(30)));

        assert_eq!((a - b).pay_amt(), usd(dec!(70)));
        assert_eq!((a - b).discount_amt(), usd(dec!(2)));
        assert_eq!((-b).pay_amt(), usd(dec!(-30)));
        assert_eq!(a - b + b, a);
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_with_pay_amt_panics_on_other_currency() {
        AllocationAmounts::zero(Currency::USD).with_pay_amt(Money::new(dec!(1), Currency::GBP));
    }
}
