//! Durable store implementations of the domain repository traits.
//!
//! - [`RedbRedirectRepository`] - redirect pairs in a single-file redb database

pub mod redb_redirect_repository;

pub use redb_redirect_repository::{REDIRECT_TABLE, RedbRedirectRepository, default_store_path};
