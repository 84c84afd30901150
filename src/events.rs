//! Synchronous publish/subscribe channel for engine state changes.
//!
//! Listeners run on the thread that applied the mutation, in registration
//! order. A listener that fails (returns an error or panics) is logged and
//! skipped; the remaining listeners still run and the mutation stays applied.

use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

use crate::Money;

/// Error type a listener may return.
pub type ListenerError = Box<dyn Error + Send + Sync>;

type Listener = Box<dyn FnMut(&Event) -> Result<(), ListenerError> + Send + Sync>;

/// State change announced after a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Unit counts per catalog index.
    StockChanged { counts: Vec<usize> },
    BalanceChanged { balance: Money },
    SaleCompleted,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StockChanged { .. } => EventKind::StockChanged,
            Event::BalanceChanged { .. } => EventKind::BalanceChanged,
            Event::SaleCompleted => EventKind::SaleCompleted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StockChanged,
    BalanceChanged,
    SaleCompleted,
}

/// Handle returned by [`Notifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    listener: Listener,
}

/// Ordered registry of event listeners.
#[derive(Default)]
pub struct Notifier {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events of `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            listener: Box::new(listener),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Deliver `event` to every listener of its kind.
    pub(crate) fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        for sub in self.subscriptions.iter_mut().filter(|sub| sub.kind == kind) {
            let listener = &mut sub.listener;
            match panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(subscription = sub.id.0, ?kind, reason = %e, "listener failed");
                }
                Err(_) => {
                    warn!(subscription = sub.id.0, ?kind, "listener panicked");
                }
            }
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
