//! Utility functions and helper modules.
//!
//! This module contains utility functions used throughout the crate,
//! currently request-information extraction helpers.

pub mod http;

pub use http::*;
