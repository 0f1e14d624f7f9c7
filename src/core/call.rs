//! Call records and their lifecycle state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::DispatchError;
use crate::util::clock::{format_clock, now_ms};
use crate::util::serde::{CallId, CallReason};

/// Where a call is in its lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    /// Registered and waiting for a free agent.
    Waiting,
    /// Admitted and being handled by an agent.
    InService,
    /// Finished; present in history.
    Completed,
}

/// A single customer call.
///
/// Identity fields and the arrival timestamp are fixed at construction. The
/// completion timestamp is stamped once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    id: CallId,
    customer: String,
    reason: CallReason,
    arrived_at_ms: u128,
    completed_at_ms: Option<u128>,
}

impl CallRecord {
    /// Create a call arriving now.
    ///
    /// # Errors
    ///
    /// `DispatchError::Validation` if the customer name is blank or a
    /// free-text reason is blank.
    pub fn new(
        id: CallId,
        customer: impl Into<String>,
        reason: CallReason,
    ) -> Result<Self, DispatchError> {
        Self::arriving_at(id, customer, reason, now_ms())
    }

    /// Create a call with an explicit arrival timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`CallRecord::new`].
    pub fn arriving_at(
        id: CallId,
        customer: impl Into<String>,
        reason: CallReason,
        arrived_at_ms: u128,
    ) -> Result<Self, DispatchError> {
        let customer = customer.into().trim().to_string();
        if customer.is_empty() {
            return Err(DispatchError::Validation(
                "customer name must not be empty".into(),
            ));
        }
        if !reason.is_valid() {
            return Err(DispatchError::Validation(
                "call reason must not be empty".into(),
            ));
        }
        Ok(Self {
            id,
            customer,
            reason,
            arrived_at_ms,
            completed_at_ms: None,
        })
    }

    /// Registration identifier.
    #[must_use]
    pub const fn id(&self) -> CallId {
        self.id
    }

    /// Customer name.
    #[must_use]
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Reason for the call.
    #[must_use]
    pub const fn reason(&self) -> &CallReason {
        &self.reason
    }

    /// Arrival time in milliseconds since epoch.
    #[must_use]
    pub const fn arrived_at_ms(&self) -> u128 {
        self.arrived_at_ms
    }

    /// Completion time in milliseconds since epoch, once finished.
    #[must_use]
    pub const fn completed_at_ms(&self) -> Option<u128> {
        self.completed_at_ms
    }

    /// Whether the completion timestamp has been stamped.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at_ms.is_some()
    }

    /// Time between arrival and completion.
    #[must_use]
    pub fn turnaround_ms(&self) -> Option<u128> {
        self.completed_at_ms.map(|done| done - self.arrived_at_ms)
    }

    /// Stamp completion at `at_ms`, clamped to never precede arrival.
    ///
    /// # Errors
    ///
    /// `DispatchError::InvariantViolation` if the call was already completed.
    pub(crate) fn mark_completed(&mut self, at_ms: u128) -> Result<(), DispatchError> {
        if self.completed_at_ms.is_some() {
            return Err(DispatchError::InvariantViolation(format!(
                "call {} completed twice",
                self.id
            )));
        }
        self.completed_at_ms = Some(at_ms.max(self.arrived_at_ms));
        Ok(())
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | customer: {} | reason: {}",
            format_clock(self.arrived_at_ms),
            self.customer,
            self.reason
        )?;
        if let Some(done) = self.completed_at_ms {
            write!(f, " | finished: {}", format_clock(done))?;
        }
        Ok(())
    }
}
