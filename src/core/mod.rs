//! Core dispatch abstractions and capacity accounting.

pub mod agent_pool;
pub mod audit;
pub mod call;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod handler;
pub mod service_time;

pub use agent_pool::AgentPool;
pub use audit::{build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink, SharedAuditSink};
pub use call::{CallRecord, CallStatus};
pub use dispatcher::{
    CallHistory, CallQueue, DispatchOutcome, DispatchStats, Dispatcher, Spawn, EMPTY_LINE,
};
pub use error::{AppResult, DispatchError};
pub use events::{CallEvent, EventBus};
pub use handler::{CallHandler, SimulatedAgent};
pub use service_time::{
    FixedServiceTime, NameHashServiceTime, ServiceTime, ServiceTimeProfile, UniformServiceTime,
};
