//! Call dispatcher: bounded admission from the wait line and concurrent handling.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use crate::core::{
    build_audit_event, AgentPool, AuditSink, CallEvent, CallHandler, CallRecord, CallStatus,
    DispatchError, EventBus,
};
use crate::util::clock::now_ms;
use crate::util::serde::{CallId, CallReason};

/// Audit call id used for rejections while the wait line is empty.
pub const EMPTY_LINE: &str = "empty-line";

/// Abstraction for wait-line backends. Order of service is insertion order.
pub trait CallQueue {
    /// Append a call to the tail.
    fn enqueue(&mut self, call: CallRecord);
    /// Remove and return the head, if any.
    fn dequeue_if_any(&mut self) -> Option<CallRecord>;
    /// The call at the head, without removing it.
    fn front(&self) -> Option<&CallRecord>;
    /// Ordered copy of the waiting calls.
    fn peek_all(&self) -> Vec<CallRecord>;
    /// Number of waiting calls.
    fn len(&self) -> usize;
    /// Whether no call is waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Whether the call with `id` is waiting.
    fn contains(&self, id: CallId) -> bool {
        self.peek_all().iter().any(|c| c.id() == id)
    }
}

/// Abstraction for completed-call logs. Append-only.
pub trait CallHistory {
    /// Append a completed call.
    fn append(&mut self, call: CallRecord);
    /// Ordered copy of the log, oldest completion first.
    fn snapshot(&self) -> Vec<CallRecord>;
    /// Number of completed calls.
    fn len(&self) -> usize;
    /// Whether nothing has completed yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Whether the call with `id` has completed.
    fn contains(&self, id: CallId) -> bool {
        self.snapshot().iter().any(|c| c.id() == id)
    }
}

/// Abstraction for spawning handling units on a runtime.
pub trait Spawn {
    /// Spawn an async task that runs to completion on its own.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "call", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The call was admitted and its handling unit launched.
    Dispatching(CallRecord),
    /// Every agent is busy. Nothing changed.
    AgentsBusy,
    /// The wait line is empty. Nothing changed.
    NoCallsWaiting,
}

impl DispatchOutcome {
    /// Whether a call was admitted.
    #[must_use]
    pub const fn is_dispatching(&self) -> bool {
        matches!(self, Self::Dispatching(_))
    }

    /// The admitted call, if any.
    #[must_use]
    pub const fn call(&self) -> Option<&CallRecord> {
        match self {
            Self::Dispatching(call) => Some(call),
            _ => None,
        }
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatching(call) => write!(f, "dispatching {}", call.customer()),
            Self::AgentsBusy => f.write_str("agents busy"),
            Self::NoCallsWaiting => f.write_str("no calls waiting"),
        }
    }
}

/// Point-in-time counters, all read under one lock.
///
/// `waiting + in_service + completed == registered` holds for every snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    /// Total agents.
    pub capacity: u32,
    /// Busy agents.
    pub occupied: u32,
    /// Free agents.
    pub available: u32,
    /// Calls in the wait line.
    pub waiting: usize,
    /// Calls being handled.
    pub in_service: usize,
    /// Calls in history.
    pub completed: usize,
    /// Calls ever registered.
    pub registered: u64,
}

/// Everything admission and completion touch. Guarded by one mutex.
struct DispatchState<Q, H> {
    queue: Q,
    agents: AgentPool,
    in_service: HashMap<CallId, CallRecord>,
    history: H,
    next_id: CallId,
    registered: u64,
}

/// State shared between the dispatcher and its handling units.
struct Shared<Q, H> {
    state: Mutex<DispatchState<Q, H>>,
    /// Signaled when the in-service set becomes empty.
    idle: Condvar,
    events: EventBus,
    audit: Mutex<Option<Box<dyn AuditSink>>>,
}

impl<Q, H> Shared<Q, H>
where
    Q: CallQueue,
    H: CallHistory,
{
    /// Completion transaction: leave the in-service set, stamp, log, free the agent.
    ///
    /// Audit and event delivery happen before the lock is released, so a
    /// caller that observes an idle dispatcher also observes every
    /// completion record.
    fn complete(&self, id: CallId) -> Result<CallRecord, DispatchError> {
        let mut state = self.state.lock();
        let mut call = state.in_service.remove(&id).ok_or_else(|| {
            DispatchError::InvariantViolation(format!("call {id} completed while not in service"))
        })?;
        call.mark_completed(now_ms())?;
        state.history.append(call.clone());
        state.agents.release()?;

        tracing::info!(
            call_id = id,
            "call finished with {} ({})",
            call.customer(),
            call.reason()
        );
        self.record_audit(&call, "complete");
        self.events.publish(&CallEvent::Completed(call.clone()));

        let idle = state.in_service.is_empty();
        drop(state);
        if idle {
            self.idle.notify_all();
        }
        Ok(call)
    }

    fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while !state.in_service.is_empty() {
            if self.idle.wait_until(&mut state, deadline).timed_out() {
                return state.in_service.is_empty();
            }
        }
        true
    }

    /// Record an audit event (sync operation with parking_lot mutex).
    fn record_audit(&self, call: &CallRecord, action: &str) {
        if let Some(sink) = self.audit.lock().as_mut() {
            sink.record(build_audit_event(
                call.id().to_string(),
                Some(call.customer().to_string()),
                action,
                Some(call.reason().to_string()),
            ));
        }
    }

    /// Record a dispatch turned away because every agent is busy.
    ///
    /// The entry names the call left at the head of the line, or
    /// [`EMPTY_LINE`] when nothing was waiting.
    fn record_rejection(&self, head: Option<&CallRecord>) {
        if let Some(sink) = self.audit.lock().as_mut() {
            let (call_id, customer) = head.map_or_else(
                || (EMPTY_LINE.to_string(), None),
                |call| (call.id().to_string(), Some(call.customer().to_string())),
            );
            sink.record(build_audit_event(
                call_id,
                customer,
                "reject",
                Some("agents busy".into()),
            ));
        }
    }
}

/// Admits waiting calls to a bounded pool of agents and runs each admitted
/// call as an independent handling unit.
///
/// The wait line, agent counters, in-service set and history sit behind a
/// single `parking_lot::Mutex`. Admission (capacity check, dequeue, acquire,
/// in-service insert) and completion (in-service removal, completion stamp,
/// history append, release) each run as one critical section on that mutex.
/// The lock is never held while a call is being serviced.
///
/// Lifecycle events and audit entries are emitted inside those critical
/// sections, so every observer sees `Registered`, `Dispatched` and
/// `Completed` for a call in that order.
pub struct Dispatcher<Q, H, E, S> {
    shared: Arc<Shared<Q, H>>,
    handler: E,
    spawner: S,
}

impl<Q, H, E, S> Dispatcher<Q, H, E, S>
where
    Q: CallQueue + Send + 'static,
    H: CallHistory + Send + 'static,
    E: CallHandler,
    S: Spawn + Clone + Send + 'static,
{
    /// Create a dispatcher with `agent_capacity` agents.
    ///
    /// # Errors
    ///
    /// `DispatchError::Validation` if `agent_capacity` is zero.
    pub fn new(
        agent_capacity: u32,
        queue: Q,
        history: H,
        handler: E,
        spawner: S,
    ) -> Result<Self, DispatchError> {
        let agents = AgentPool::new(agent_capacity)?;
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(DispatchState {
                    queue,
                    agents,
                    in_service: HashMap::new(),
                    history,
                    next_id: 1,
                    registered: 0,
                }),
                idle: Condvar::new(),
                events: EventBus::new(),
                audit: Mutex::new(None),
            }),
            handler,
            spawner,
        })
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(self, audit: Box<dyn AuditSink>) -> Self {
        *self.shared.audit.lock() = Some(audit);
        self
    }

    /// Register a new call at the tail of the wait line.
    ///
    /// # Errors
    ///
    /// `DispatchError::Validation` if the customer name or a free-text reason
    /// is blank. Nothing is enqueued in that case.
    pub fn register_call(
        &self,
        customer: impl Into<String>,
        reason: CallReason,
    ) -> Result<CallRecord, DispatchError> {
        let mut state = self.shared.state.lock();
        let call = CallRecord::new(state.next_id, customer, reason)?;
        state.next_id += 1;
        state.registered += 1;
        state.queue.enqueue(call.clone());

        // under the lock: Registered always precedes Dispatched
        tracing::info!(call_id = call.id(), "call registered: {}", call);
        self.shared.record_audit(&call, "register");
        self.shared.events.publish(&CallEvent::Registered(call.clone()));
        drop(state);
        Ok(call)
    }

    /// Try to admit the call at the head of the wait line.
    ///
    /// Checks, in order: a free agent (else `AgentsBusy`), a waiting call
    /// (else `NoCallsWaiting`). On success the call moves to the in-service
    /// set, one agent is reserved, and a handling unit is spawned.
    pub fn dispatch_next(&self) -> DispatchOutcome {
        let call = {
            let mut state = self.shared.state.lock();
            if state.agents.is_saturated() {
                tracing::debug!("dispatch rejected: all agents busy");
                self.shared.record_rejection(state.queue.front());
                return DispatchOutcome::AgentsBusy;
            }
            let Some(call) = state.queue.dequeue_if_any() else {
                return DispatchOutcome::NoCallsWaiting;
            };
            let acquired = state.agents.try_acquire();
            debug_assert!(acquired, "capacity was checked under the same lock");
            state.in_service.insert(call.id(), call.clone());

            tracing::info!(call_id = call.id(), "dispatching call from {}", call.customer());
            self.shared.record_audit(&call, "dispatch");
            self.shared.events.publish(&CallEvent::Dispatched(call.clone()));
            call
        };

        self.spawn_handling_unit(call.clone());

        DispatchOutcome::Dispatching(call)
    }

    /// Dispatch until the agents are saturated or the wait line is empty.
    ///
    /// Returns every outcome, ending with the first non-dispatching one.
    pub fn dispatch_available(&self) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let outcome = self.dispatch_next();
            let admitted = outcome.is_dispatching();
            outcomes.push(outcome);
            if !admitted {
                return outcomes;
            }
        }
    }

    fn spawn_handling_unit(&self, call: CallRecord) {
        let shared = Arc::clone(&self.shared);
        let handler = self.handler.clone();
        let call_id = call.id();

        self.spawner.spawn(async move {
            tracing::debug!(call_id, "call in progress: {}", call);

            handler.handle(call).await;

            if let Err(err) = shared.complete(call_id) {
                tracing::error!(call_id, "completion bookkeeping failed: {}", err);
                panic!("dispatcher state corrupted: {err}");
            }
        });
    }

    /// Calls waiting, in service order.
    #[must_use]
    pub fn list_pending(&self) -> Vec<CallRecord> {
        self.shared.state.lock().queue.peek_all()
    }

    /// Calls currently being handled. Order is not meaningful.
    #[must_use]
    pub fn list_in_service(&self) -> Vec<CallRecord> {
        self.shared
            .state
            .lock()
            .in_service
            .values()
            .cloned()
            .collect()
    }

    /// Completed calls in completion order.
    #[must_use]
    pub fn list_history(&self) -> Vec<CallRecord> {
        self.shared.state.lock().history.snapshot()
    }

    /// Current lifecycle state of a call, or `None` for an unknown id.
    #[must_use]
    pub fn status_of(&self, id: CallId) -> Option<CallStatus> {
        let state = self.shared.state.lock();
        if state.in_service.contains_key(&id) {
            Some(CallStatus::InService)
        } else if state.queue.contains(id) {
            Some(CallStatus::Waiting)
        } else if state.history.contains(id) {
            Some(CallStatus::Completed)
        } else {
            None
        }
    }

    /// Counters read from one consistent snapshot.
    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        let state = self.shared.state.lock();
        DispatchStats {
            capacity: state.agents.capacity(),
            occupied: state.agents.occupied(),
            available: state.agents.available_slots(),
            waiting: state.queue.len(),
            in_service: state.in_service.len(),
            completed: state.history.len(),
            registered: state.registered,
        }
    }

    /// Agents currently free.
    #[must_use]
    pub fn available_agents(&self) -> u32 {
        self.shared.state.lock().agents.available_slots()
    }

    /// Receive lifecycle events from now on.
    pub fn subscribe(&self) -> Receiver<CallEvent> {
        self.shared.events.subscribe()
    }

    /// Block until no call is in service or `timeout` elapses.
    ///
    /// Returns whether the dispatcher is idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        self.shared.wait_idle(timeout)
    }

    /// Async variant of [`wait_idle`](Self::wait_idle).
    ///
    /// Waits on the same Condvar from tokio's blocking pool.
    #[cfg(feature = "tokio-runtime")]
    pub async fn wait_idle_async(&self, timeout: Duration) -> bool {
        let shared = Arc::clone(&self.shared);
        tokio::task::spawn_blocking(move || shared.wait_idle(timeout))
            .await
            .unwrap_or(false)
    }
}
