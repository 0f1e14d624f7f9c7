//! # Call Dispatch
//!
//! A bounded-capacity call-dispatch core for a call-center simulation.
//!
//! Calls are registered into a FIFO wait line. An operator asks the
//! [`Dispatcher`](core::Dispatcher) to dispatch; if an agent is free the call at
//! the head of the line is admitted and serviced by an independent handling
//! unit. When service ends the agent is released and the call moves to an
//! append-only history.
//!
//! ## Guarantees
//!
//! - **Strict arrival order**: calls are admitted in the order they were registered
//! - **Bounded admission**: never more calls in service than agents
//! - **One exclusion domain**: admission and completion bookkeeping share a
//!   single lock, so `(occupied, in-service, history)` is always consistent
//! - **No lost calls**: every registered call is waiting, in service, or completed
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use call_dispatch::core::{Dispatcher, FixedServiceTime, SimulatedAgent};
//! use call_dispatch::infra::{InMemoryCallQueue, InMemoryHistory};
//! use call_dispatch::runtime::TokioSpawner;
//! use call_dispatch::util::CallReason;
//!
//! let dispatcher = Dispatcher::new(
//!     2,
//!     InMemoryCallQueue::new(),
//!     InMemoryHistory::new(),
//!     SimulatedAgent::new(FixedServiceTime(Duration::from_millis(50))),
//!     TokioSpawner::current(),
//! )?;
//!
//! dispatcher.register_call("Ana", CallReason::BalanceInquiry)?;
//! println!("{}", dispatcher.dispatch_next()); // dispatching Ana
//! dispatcher.wait_idle_async(Duration::from_secs(1)).await;
//! assert_eq!(dispatcher.list_history().len(), 1);
//! ```
//!
//! Configuration-driven construction lives in [`builders`]; the serializable
//! operator surface lives in [`runtime::api`].

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core dispatch abstractions and capacity accounting.
pub mod core;
/// Configuration models for the dispatcher.
pub mod config;
/// Builders to construct dispatchers from configuration.
#[cfg(feature = "tokio-runtime")]
pub mod builders;
/// In-memory backends for the wait line and history.
pub mod infra;
/// Runtime adapters and operator API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
