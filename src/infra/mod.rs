//! In-memory backends for the wait line and the completed-call history.

pub mod history;
pub mod queue;

pub use history::InMemoryHistory;
pub use queue::InMemoryCallQueue;
