//! Application layer.
//!
//! - [`services::Seeder`] - keeps the durable store in line with the seed file

pub mod services;
