//! Operator control surface: serializable commands and replies.
//!
//! A console or HTTP front end deserializes an [`OperatorCommand`], hands it
//! to [`execute`], and renders the [`OperatorReply`].

use serde::{Deserialize, Serialize};

use crate::core::{
    CallHandler, CallHistory, CallQueue, CallRecord, DispatchError, DispatchOutcome,
    DispatchStats, Dispatcher, Spawn,
};
use crate::util::clock::format_clock;
use crate::util::serde::{CallId, CallReason};

/// One operator action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum OperatorCommand {
    /// Register a new call.
    Register {
        /// Customer name.
        customer: String,
        /// Reason for the call.
        reason: CallReason,
    },
    /// Attempt to admit the next waiting call.
    Dispatch,
    /// Show waiting calls.
    ListPending,
    /// Show calls being handled.
    ListInService,
    /// Show completed calls.
    ListHistory,
    /// Show counters.
    Stats,
}

/// Display-friendly view of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallView {
    /// Call identifier.
    pub id: CallId,
    /// Customer name.
    pub customer: String,
    /// Reason label.
    pub reason: String,
    /// Arrival clock time `HH:MM:SS`.
    pub arrived_at: String,
    /// Completion clock time, once finished.
    pub finished_at: Option<String>,
    /// One-line rendering.
    pub summary: String,
}

impl From<&CallRecord> for CallView {
    fn from(call: &CallRecord) -> Self {
        Self {
            id: call.id(),
            customer: call.customer().to_string(),
            reason: call.reason().to_string(),
            arrived_at: format_clock(call.arrived_at_ms()),
            finished_at: call.completed_at_ms().map(format_clock),
            summary: call.to_string(),
        }
    }
}

/// Reply to an [`OperatorCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum OperatorReply {
    /// Call accepted into the wait line.
    Registered {
        /// The new call.
        call: CallView,
    },
    /// Result of a dispatch attempt.
    Dispatch {
        /// Outcome.
        outcome: DispatchOutcome,
        /// Human-readable message.
        message: String,
    },
    /// A list of calls.
    Calls {
        /// Calls in the order the list defines.
        calls: Vec<CallView>,
    },
    /// Counters.
    Stats {
        /// Snapshot.
        stats: DispatchStats,
    },
}

/// Run one operator command.
///
/// # Errors
///
/// `DispatchError::Validation` when a registration is rejected.
pub fn execute<Q, H, E, S>(
    dispatcher: &Dispatcher<Q, H, E, S>,
    command: OperatorCommand,
) -> Result<OperatorReply, DispatchError>
where
    Q: CallQueue + Send + 'static,
    H: CallHistory + Send + 'static,
    E: CallHandler,
    S: Spawn + Clone + Send + 'static,
{
    let reply = match command {
        OperatorCommand::Register { customer, reason } => {
            let call = dispatcher.register_call(customer, reason)?;
            OperatorReply::Registered {
                call: CallView::from(&call),
            }
        }
        OperatorCommand::Dispatch => {
            let outcome = dispatcher.dispatch_next();
            OperatorReply::Dispatch {
                message: outcome.to_string(),
                outcome,
            }
        }
        OperatorCommand::ListPending => views(&dispatcher.list_pending()),
        OperatorCommand::ListInService => views(&dispatcher.list_in_service()),
        OperatorCommand::ListHistory => views(&dispatcher.list_history()),
        OperatorCommand::Stats => OperatorReply::Stats {
            stats: dispatcher.stats(),
        },
    };
    Ok(reply)
}

fn views(calls: &[CallRecord]) -> OperatorReply {
    OperatorReply::Calls {
        calls: calls.iter().map(CallView::from).collect(),
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Return a health payload.
#[must_use]
pub const fn health() -> Health {
    Health { ok: true }
}
