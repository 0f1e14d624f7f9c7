//! Lifecycle event feed for observers.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::CallRecord;

/// A call changed lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "call", rename_all = "snake_case")]
pub enum CallEvent {
    /// Call entered the wait line.
    Registered(CallRecord),
    /// Call was admitted and an agent started on it.
    Dispatched(CallRecord),
    /// Call finished; the record carries its completion timestamp.
    Completed(CallRecord),
}

impl CallEvent {
    /// The record the event refers to.
    #[must_use]
    pub const fn call(&self) -> &CallRecord {
        match self {
            Self::Registered(c) | Self::Dispatched(c) | Self::Completed(c) => c,
        }
    }
}

/// Fan-out of events to any number of subscribers.
///
/// Subscribers whose receiver was dropped are pruned on the next publish.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<CallEvent>>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Receiver<CallEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber.
    pub fn publish(&self, event: &CallEvent) {
        let mut subscribers = self.subscribers.lock();
        if subscribers.is_empty() {
            return;
        }
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
