//! Store event fan-out: synchronous handlers plus a broadcast channel.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use super::events::{EventCategory, StoreEvent};

/// Returned by [`EventBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Which events a handler wants.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Any event whose category is listed.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &StoreEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Events buffered per async receiver before it lags.
    pub channel_capacity: usize,
    /// Most recent events kept for [`EventBus::history`]; 0 keeps none.
    pub history_limit: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            history_limit: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventBusError {
    /// Neither a handler nor a receiver saw the event.
    #[error("No active subscribers")]
    NoSubscribers,
}

type Handler = Box<dyn Fn(&StoreEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Handler,
}

/// Subscribe/notify hub injected into the workspace store.
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
    subscriptions: RwLock<Vec<Subscription>>,
    next_id: AtomicU64,
    history: Mutex<VecDeque<StoreEvent>>,
    history_limit: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            subscriptions: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            history: Mutex::new(VecDeque::new()),
            history_limit: config.history_limit,
        }
    }

    /// Runs matching handlers in subscription order, then broadcasts.
    ///
    /// Returns how many async receivers got the event.
    pub fn publish(&self, event: StoreEvent) -> Result<usize, EventBusError> {
        tracing::trace!("event: {}", event.description());
        self.remember(&event);

        let subscriptions = self.subscriptions.read();
        for sub in subscriptions.iter().filter(|s| s.filter.matches(&event)) {
            (sub.handler)(&event);
        }
        let had_handlers = !subscriptions.is_empty();
        drop(subscriptions);

        match self.sender.send(event) {
            Ok(receivers) => Ok(receivers),
            Err(_) if had_handlers => Ok(0),
            Err(_) => Err(EventBusError::NoSubscribers),
        }
    }

    /// Registers a handler. It runs on the publishing thread, with the
    /// store mid-command, so it must not call back into the store.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("Subscription {:?} added", id);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    /// A receiver for async consumers such as the autosave task.
    pub fn receiver(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Retained events, oldest first.
    pub fn history(&self) -> Vec<StoreEvent> {
        self.history.lock().iter().cloned().collect()
    }

    fn remember(&self, event: &StoreEvent) {
        if self.history_limit == 0 {
            return;
        }
        let mut history = self.history.lock();
        if history.len() == self.history_limit {
            history.pop_front();
        }
        history.push_back(event.clone());
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.read().len())
            .field("receivers", &self.sender.receiver_count())
            .field("history_limit", &self.history_limit)
            .finish()
    }
}
