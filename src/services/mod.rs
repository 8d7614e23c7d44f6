//! Business logic and service layer modules.
//!
//! This module contains the core services of the crate: the security
//! monitor itself, its periodic cleanup task, and metrics collection.

pub mod cleanup;
pub mod metrics;
pub mod monitor;

pub use cleanup::*;
pub use metrics::*;
pub use monitor::*;
