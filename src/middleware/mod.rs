//! Custom middleware implementations for the API.
//!
//! This module contains middleware for cross-cutting security concerns,
//! currently the per-request threat check.

pub mod threat_check;

pub use threat_check::*;
