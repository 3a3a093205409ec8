//! Domain layer: redirect rules and the lookup capability.
//!
//! - [`entities`] - Path/url pairs and the in-memory map built from them
//! - [`resolver`] - The [`resolver::PathResolver`] capability
//! - [`repositories`] - Durable store trait
//! - [`lookup_source`] - Static and durable sources used by the handler chain
//!
//! Nothing here depends on HTTP or on a concrete storage engine.

pub mod entities;
pub mod lookup_source;
pub mod repositories;
pub mod resolver;
