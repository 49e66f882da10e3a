//! # API Route Handlers
//!
//! This module organizes the Axum route handlers for the `nlquery-server`,
//! split into general-purpose endpoints (liveness, health, schema) and the
//! question-answering endpoints.

pub mod general;
pub mod query;

pub use general::*;
pub use query::*;
