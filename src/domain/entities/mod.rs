//! Core data model for redirect configuration.
//!
//! - [`PathUrlPair`] - One path/url rule as read from configuration
//! - [`PathMap`] - Pairs folded into a lookup map (last write wins)

pub mod pair;
pub mod path_map;

pub use pair::PathUrlPair;
pub use path_map::PathMap;
