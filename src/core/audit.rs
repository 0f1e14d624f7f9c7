//! Audit sink implementations.
//!
//! Records call lifecycle actions (register, dispatch, reject, complete) for
//! later inspection.

use std::collections::VecDeque;

use crate::util::clock::now_ms;

/// Audit event structure.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Related call identifier, or a label for events not tied to one call.
    pub call_id: String,
    /// Customer name, if known.
    pub customer: Option<String>,
    /// Action taken (register, dispatch, reject, complete).
    pub action: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context.
    pub payload: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Sink that forwards events into a shared in-memory buffer, so a test or
/// console can read what the dispatcher recorded.
#[derive(Clone)]
pub struct SharedAuditSink {
    inner: std::sync::Arc<parking_lot::Mutex<InMemoryAuditSink>>,
}

impl SharedAuditSink {
    /// Create a shared sink holding at most `max_events`.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            inner: std::sync::Arc::new(parking_lot::Mutex::new(InMemoryAuditSink::new(max_events))),
        }
    }

    /// Snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.inner.lock().events()
    }
}

impl AuditSink for SharedAuditSink {
    fn record(&mut self, event: AuditEvent) {
        self.inner.lock().record(event);
    }
}

/// Helper to build an audit event with a fresh identifier.
pub fn build_audit_event(
    call_id: impl Into<String>,
    customer: Option<String>,
    action: impl Into<String>,
    payload: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        call_id: call_id.into(),
        customer,
        action: action.into(),
        created_at_ms: now_ms(),
        payload,
    }
}
