//! Runtime adapters and the operator-facing API surface.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

pub use api::{execute, health, CallView, Health, OperatorCommand, OperatorReply};
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
