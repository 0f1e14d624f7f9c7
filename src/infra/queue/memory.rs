//! In-memory FIFO wait line.

use std::collections::VecDeque;

use crate::core::{CallQueue, CallRecord};
use crate::util::serde::CallId;

/// In-memory wait line backed by a `VecDeque`.
/// O(1) enqueue at the tail and O(1) dequeue at the head.
#[derive(Debug, Default)]
pub struct InMemoryCallQueue {
    calls: VecDeque<CallRecord>,
}

impl InMemoryCallQueue {
    /// Create an empty wait line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CallQueue for InMemoryCallQueue {
    fn enqueue(&mut self, call: CallRecord) {
        self.calls.push_back(call);
    }

    fn dequeue_if_any(&mut self) -> Option<CallRecord> {
        self.calls.pop_front()
    }

    fn front(&self) -> Option<&CallRecord> {
        self.calls.front()
    }

    fn peek_all(&self) -> Vec<CallRecord> {
        self.calls.iter().cloned().collect()
    }

    fn len(&self) -> usize {
        self.calls.len()
    }

    fn contains(&self, id: CallId) -> bool {
        self.calls.iter().any(|c| c.id() == id)
    }
}
