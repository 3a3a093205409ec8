//! Infrastructure layer for external formats and storage.
//!
//! # Modules
//!
//! - [`parser`] - YAML/JSON pair parsing and pair files
//! - [`persistence`] - Durable redirect store backed by redb

pub mod parser;
pub mod persistence;
