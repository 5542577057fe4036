//! Authentication middleware for customer requests

pub mod customer_auth;

pub use customer_auth::{CustomerIdentity, customer_auth_middleware};
