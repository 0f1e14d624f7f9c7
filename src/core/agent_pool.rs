//! Agent capacity accounting.

use crate::core::DispatchError;

/// Tracks how many agents exist and how many are busy.
///
/// Mutating methods take `&mut self`, so check-and-increment in
/// [`try_acquire`](Self::try_acquire) is a single step for whoever holds the
/// pool. Inside the dispatcher the pool lives behind the same lock as the wait
/// queue, making dequeue plus acquire one admission decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPool {
    capacity: u32,
    occupied: u32,
}

impl AgentPool {
    /// Create a pool with `capacity` idle agents.
    ///
    /// # Errors
    ///
    /// `DispatchError::Validation` if `capacity` is zero.
    pub fn new(capacity: u32) -> Result<Self, DispatchError> {
        if capacity == 0 {
            return Err(DispatchError::Validation(
                "agent capacity must be greater than 0".into(),
            ));
        }
        Ok(Self {
            capacity,
            occupied: 0,
        })
    }

    /// Reserve one agent if any is free.
    pub fn try_acquire(&mut self) -> bool {
        if self.occupied >= self.capacity {
            return false;
        }
        self.occupied += 1;
        true
    }

    /// Return one agent to the pool.
    ///
    /// # Errors
    ///
    /// `DispatchError::InvariantViolation` if no agent is currently acquired.
    /// The counter is left untouched.
    pub fn release(&mut self) -> Result<(), DispatchError> {
        if self.occupied == 0 {
            return Err(DispatchError::InvariantViolation(
                "agent released without a matching acquire".into(),
            ));
        }
        self.occupied -= 1;
        Ok(())
    }

    /// Agents currently free.
    #[must_use]
    pub const fn available_slots(&self) -> u32 {
        self.capacity - self.occupied
    }

    /// Agents currently busy.
    #[must_use]
    pub const fn occupied(&self) -> u32 {
        self.occupied
    }

    /// Total agents.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether every agent is busy.
    #[must_use]
    pub const fn is_saturated(&self) -> bool {
        self.occupied >= self.capacity
    }
}
