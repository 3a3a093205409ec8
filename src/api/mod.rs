//! HTTP layer.
//!
//! # Modules
//!
//! - [`handlers`] - Redirect handler and the terminal hello handler
//! - [`chain`] - Builds the ordered chain of redirect handlers
//! - [`middleware`] - Request tracing

pub mod chain;
pub mod handlers;
pub mod middleware;
