//! HTTP request handlers for API endpoints.
//!
//! This module contains all the HTTP request handlers that process
//! incoming requests and generate responses.

pub mod auth;
pub mod openapi;
pub mod security;

pub use auth::*;
pub use openapi::*;
pub use security::*;
