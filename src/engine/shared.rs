use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Engine, EngineError};
use crate::Money;
use crate::events::{Event, EventKind, ListenerError, SubscriptionId};
use crate::model::{BeverageType, CatalogIndex, Command, Unit};

/// Cloneable handle to one engine shared by several tasks.
///
/// Commands hold the write lock for their whole run, event delivery included,
/// so no caller can observe a half-applied purchase. Queries share the read lock.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub async fn apply(&self, command: Command) -> Result<(), EngineError> {
        self.inner.write().await.apply(command)
    }

    pub async fn supply(&self, index: CatalogIndex, amount: u64) -> Result<(), EngineError> {
        self.inner.write().await.supply(index, amount)
    }

    pub async fn insert_coin(&self, amount: u64) -> Result<(), EngineError> {
        self.inner.write().await.insert_coin(amount)
    }

    pub async fn buy(&self, unit: &Unit) -> Result<Unit, EngineError> {
        self.inner.write().await.buy(unit)
    }

    pub async fn buy_by_index(&self, index: CatalogIndex) -> Result<Unit, EngineError> {
        self.inner.write().await.buy_by_index(index)
    }

    pub async fn subscribe<F>(&self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.inner.write().await.subscribe(kind, listener)
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.write().await.unsubscribe(id)
    }

    pub async fn balance(&self) -> Money {
        self.inner.read().await.balance()
    }

    pub async fn stock_counts(&self) -> HashMap<Arc<BeverageType>, usize> {
        self.inner.read().await.stock_counts()
    }

    pub async fn stock_report(&self) -> Vec<usize> {
        self.inner.read().await.stock_report()
    }

    pub async fn expired_types(&self) -> Vec<Arc<BeverageType>> {
        self.inner.read().await.expired_types()
    }

    pub async fn hot_types(&self) -> Vec<Arc<BeverageType>> {
        self.inner.read().await.hot_types()
    }

    pub async fn buyable_types(&self) -> Vec<Arc<BeverageType>> {
        self.inner.read().await.buyable_types()
    }

    pub async fn sale_history(&self) -> Vec<Unit> {
        self.inner.read().await.sale_history().to_vec()
    }

    /// Run `f` against one consistent snapshot of the engine.
    pub async fn read<T>(&self, f: impl FnOnce(&Engine) -> T) -> T {
        f(&*self.inner.read().await)
    }
}
