//! Vending transaction engine.
//!
//! The engine owns the machine balance, the stock of physical units and the
//! sale log. It supports supplying stock, inserting coins and buying units.
//! Every successful command is announced through the [`Notifier`].
//! Also supports async stream of commands.

use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Money;
use crate::catalog::Catalog;
use crate::events::{Event, EventKind, ListenerError, Notifier, SubscriptionId};
use crate::model::{BeverageType, CatalogIndex, Command, ManagementMenu, Unit};

mod stock;
pub use stock::Stock;

mod sale_log;
pub use sale_log::SaleLog;

mod shared;
pub use shared::SharedEngine;

mod error;
pub use error::{EngineError, OutOfStock};

/// The vending transaction engine.
///
/// The only owner of balance, stock and sale log. Failed commands leave all
/// three untouched.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    balance: Money,
    stock: Stock,
    sales: SaleLog,
    notifier: Notifier,
}

/// Public API
impl Engine {
    /// Largest number of units a single supply may add.
    pub const MAX_SUPPLY: u64 = 10_000;

    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            balance: Money::ZERO,
            stock: Stock::new(),
            sales: SaleLog::new(),
            notifier: Notifier::new(),
        }
    }

    /// Run the engine with the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(command) = stream.next().await {
            // a rejected command must not stop the machine, results are logged by `apply`
            let _ = self.apply(command);
        }
    }

    /// Apply a single command on top of the current engine state
    pub fn apply(&mut self, command: Command) -> Result<(), EngineError> {
        match command {
            Command::Supply { index, amount } => self.supply(index, amount),
            Command::InsertCoin { amount } => self.insert_coin(amount),
            Command::Buy { index } => self.buy_by_index(index).map(|_| ()),
        }
    }

    /// Register a listener for one kind of event.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.notifier.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Add `amount` fresh units of the catalog entry at `index`.
    pub fn supply(&mut self, index: CatalogIndex, amount: u64) -> Result<(), EngineError> {
        let result = self.apply_supply(index, amount);
        match &result {
            Ok(()) => info!(index, amount, "supply applied"),
            Err(e) => info!(index, amount, reason = %e, "supply skipped"),
        }
        result
    }

    /// Credit the balance by `amount`.
    pub fn insert_coin(&mut self, amount: u64) -> Result<(), EngineError> {
        let result = self.apply_insert_coin(amount);
        match &result {
            Ok(()) => info!(amount, balance = %self.balance, "coin inserted"),
            Err(e) => info!(amount, reason = %e, "coin rejected"),
        }
        result
    }

    /// Buy one specific unit from stock. Returns the sold unit.
    pub fn buy(&mut self, unit: &Unit) -> Result<Unit, EngineError> {
        let result = self.apply_buy(unit, OutOfStock::Unit(unit.id()));
        Self::log_buy(&result, self.balance);
        result
    }

    /// Buy the earliest supplied unit of the catalog entry at `index`.
    pub fn buy_by_index(&mut self, index: CatalogIndex) -> Result<Unit, EngineError> {
        let result = self.apply_buy_by_index(index);
        Self::log_buy(&result, self.balance);
        result
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    /// Units per beverage type currently in stock.
    pub fn stock_counts(&self) -> HashMap<Arc<BeverageType>, usize> {
        self.stock.counts_by_type()
    }

    /// Units in stock per catalog index, 0 for absent types.
    pub fn stock_report(&self) -> Vec<usize> {
        self.catalog
            .iter()
            .map(|beverage| self.stock.count_of(beverage))
            .collect()
    }

    /// Units sold per catalog index.
    pub fn sold_counts(&self) -> Vec<usize> {
        self.catalog
            .iter()
            .map(|beverage| {
                self.sales
                    .all()
                    .iter()
                    .filter(|unit| unit.beverage() == beverage)
                    .count()
            })
            .collect()
    }

    /// Stocked types with at least one unit past its expiration date today.
    pub fn expired_types(&self) -> Vec<Arc<BeverageType>> {
        self.expired_types_at(Utc::now().date_naive())
    }

    pub fn expired_types_at(&self, today: NaiveDate) -> Vec<Arc<BeverageType>> {
        self.stock.filter(|beverage| beverage.is_expired_at(today))
    }

    pub fn hot_types(&self) -> Vec<Arc<BeverageType>> {
        self.stock.filter(BeverageType::is_hot)
    }

    /// Stocked types the current balance can pay for.
    pub fn buyable_types(&self) -> Vec<Arc<BeverageType>> {
        let balance = self.balance;
        self.stock.filter(|beverage| beverage.is_buyable(balance))
    }

    /// Sold units, oldest first.
    pub fn sale_history(&self) -> &[Unit] {
        self.sales.all()
    }

    /// Management menu, keyed by command number.
    pub fn menu(&self) -> BTreeMap<u8, &'static str> {
        ManagementMenu::ALL
            .iter()
            .map(|item| (*item as u8, item.label()))
            .collect()
    }
}

/// Private API
impl Engine {
    fn log_buy(result: &Result<Unit, EngineError>, balance: Money) {
        match result {
            Ok(unit) => info!(
                unit = %unit.id(),
                beverage = %unit.beverage(),
                price = %unit.price(),
                balance = %balance,
                "buy applied"
            ),
            Err(e) => info!(balance = %balance, reason = %e, "buy skipped"),
        }
    }

    /// Apply a supply:
    /// - Ensure the amount is positive and at most `MAX_SUPPLY`
    /// - Resolve the catalog entry
    /// - Mint `amount` units into stock
    fn apply_supply(&mut self, index: CatalogIndex, amount: u64) -> Result<(), EngineError> {
        if amount == 0 || amount > Self::MAX_SUPPLY {
            return Err(EngineError::InvalidAmount);
        }

        let beverage = self
            .catalog
            .get(index)
            .ok_or(EngineError::UnknownBeverageType(index))?;

        self.stock.add_many(beverage, amount);

        self.notify_stock();
        Ok(())
    }

    fn apply_insert_coin(&mut self, amount: u64) -> Result<(), EngineError> {
        if amount == 0 {
            return Err(EngineError::InvalidAmount);
        }

        self.balance.credit(Money::new(amount));

        self.notify_balance();
        Ok(())
    }

    /// Resolve the catalog entry and buy its earliest unit in stock.
    fn apply_buy_by_index(&mut self, index: CatalogIndex) -> Result<Unit, EngineError> {
        let beverage = self
            .catalog
            .get(index)
            .ok_or(EngineError::UnknownBeverageType(index))?;

        let wanted = self
            .stock
            .first_of(beverage)
            .cloned()
            .ok_or(EngineError::OutOfStock(OutOfStock::Index(index)))?;

        self.apply_buy(&wanted, OutOfStock::Index(index))
    }

    /// Apply a purchase:
    /// - Ensure the unit is in stock, same id and same beverage type
    /// - Debit its price, failing if the balance is too low
    /// - Move the unit from stock to the sale log
    /// - Announce balance, stock and sale, in that order
    fn apply_buy(&mut self, wanted: &Unit, missing: OutOfStock) -> Result<Unit, EngineError> {
        let id = wanted.id();
        // ids are only unique within one engine, the type must match too
        let unit = self
            .stock
            .get(id)
            .filter(|unit| unit.beverage() == wanted.beverage())
            .cloned()
            .ok_or(EngineError::OutOfStock(missing))?;

        // the debit is the funds check: on failure nothing has been mutated yet
        self.balance
            .debit(unit.price())
            .map_err(|e| EngineError::InsufficientFunds {
                balance: e.balance,
                price: e.requested,
            })?;

        self.stock.remove(id);
        self.sales.append(unit.clone());

        self.notify_balance();
        self.notify_stock();
        self.notifier.emit(&Event::SaleCompleted);

        Ok(unit)
    }

    fn notify_balance(&mut self) {
        let event = Event::BalanceChanged {
            balance: self.balance,
        };
        self.notifier.emit(&event);
    }

    fn notify_stock(&mut self) {
        let event = Event::StockChanged {
            counts: self.stock_report(),
        };
        self.notifier.emit(&event);
    }
}
