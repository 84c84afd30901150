use std::fmt;
use thiserror::Error;

/// Non-negative amount of money in the smallest currency unit.
///
/// Used both for the machine balance and for beverage prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

/// Returned by [`Money::debit`] when the balance cannot cover the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("balance {balance} is lower than requested {requested}")]
pub struct InsufficientFunds {
    pub balance: Money,
    pub requested: Money,
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(value: u64) -> Self {
        Money(value)
    }

    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Increase the balance. Saturates instead of wrapping.
    pub fn credit(&mut self, amount: Money) {
        self.0 = self.0.saturating_add(amount.0);
    }

    /// Decrease the balance, leaving it untouched when `amount` exceeds it.
    pub fn debit(&mut self, amount: Money) -> Result<(), InsufficientFunds> {
        if amount > *self {
            return Err(InsufficientFunds {
                balance: *self,
                requested: amount,
            });
        }
        self.0 -= amount.0;
        Ok(())
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Money(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
