//! Request-independent business logic.
//!
//! Functions here are generic over the store traits so they can be driven by
//! any backend; the Axum routes in [`crate::routes`] are thin wrappers.

pub mod chat;
pub mod classify;
