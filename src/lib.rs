//! # Path Redirect
//!
//! Resolves incoming request paths to redirect targets by trying a chain of
//! lookup sources in a fixed order before falling back to a default handler.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Pairs, path maps, the lookup capability and sources
//! - **Application Layer** ([`application`]) - Seeding the durable store
//! - **Infrastructure Layer** ([`infrastructure`]) - YAML/JSON parsing and the redb store
//! - **API Layer** ([`api`]) - Redirect handler chain and tracing middleware
//!
//! ## Request Flow
//!
//! ```text
//! GET /urlshort
//!   -> durable store (redb, table `PathRedirect`)
//!   -> paths file (in memory)
//!   -> built-in paths (in memory)
//!   -> "Hello, world!"
//! ```
//!
//! The first source that knows the path answers with `308 Permanent Redirect`.
//! Misses and store errors fall through to the next source.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, ParseError, StoreError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::chain::{BoxedHandler, build_chain, default_fallback};
    pub use crate::api::handlers::{RedirectHandler, RedirectLayer, hello_handler};
    pub use crate::application::services::Seeder;
    pub use crate::domain::entities::{PathMap, PathUrlPair};
    pub use crate::domain::lookup_source::{LookupSource, StaticMapSource};
    pub use crate::domain::repositories::RedirectRepository;
    pub use crate::domain::resolver::PathResolver;
    pub use crate::error::{AppError, ParseError, StoreError};
    pub use crate::infrastructure::parser::{Format, PairFile, parse};
    pub use crate::infrastructure::persistence::RedbRedirectRepository;
}
