//! Configuration models for the dispatcher and its service-time model.

pub mod call_center;

pub use call_center::{CallCenterConfig, ServiceTimeConfig};
