//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`.

pub mod redirect_repository;

pub use redirect_repository::RedirectRepository;
