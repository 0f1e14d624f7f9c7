//! In-memory completed-call history.

use crate::core::{CallHistory, CallRecord};

/// Append-only log of completed calls.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    calls: Vec<CallRecord>,
}

impl InMemoryHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed calls for one customer, in completion order.
    #[must_use]
    pub fn for_customer(&self, customer: &str) -> Vec<CallRecord> {
        self.calls
            .iter()
            .filter(|c| c.customer() == customer)
            .cloned()
            .collect()
    }
}

impl CallHistory for InMemoryHistory {
    fn append(&mut self, call: CallRecord) {
        self.calls.push(call);
    }

    fn snapshot(&self) -> Vec<CallRecord> {
        self.calls.clone()
    }

    fn len(&self) -> usize {
        self.calls.len()
    }

    fn contains(&self, id: crate::util::serde::CallId) -> bool {
        self.calls.iter().any(|c| c.id() == id)
    }
}
