//! Error types for vending commands.

use thiserror::Error;

use crate::Money;
use crate::model::{CatalogIndex, UnitId};

/// Error returned by the engine commands.
///
/// Every variant is a validation outcome: the engine state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{0} is out of stock")]
    OutOfStock(OutOfStock),

    #[error("insufficient funds: balance {balance}, price {price}")]
    InsufficientFunds { balance: Money, price: Money },

    #[error("no beverage type at catalog index {0}")]
    UnknownBeverageType(CatalogIndex),

    #[error("amount must be positive")]
    InvalidAmount,
}

/// What the caller tried to buy when nothing matched in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfStock {
    Unit(UnitId),
    Index(CatalogIndex),
}

impl std::fmt::Display for OutOfStock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutOfStock::Unit(id) => write!(f, "unit {id}"),
            OutOfStock::Index(index) => write!(f, "catalog entry {index}"),
        }
    }
}
