//! Wait-line backends.

pub mod memory;

pub use memory::InMemoryCallQueue;
