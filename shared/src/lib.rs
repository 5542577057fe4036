//! Shared types for the pizza ordering backend
//!
//! Domain models, request payloads and the unified error type
//! used by the server and its API clients.

pub mod error;
pub mod models;
