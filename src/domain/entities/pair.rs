//! Path/url pair read from configuration.

use serde::{Deserialize, Serialize};

/// A single redirect rule: requests for `path` are sent to `url`.
///
/// Pairs are kept in source order and duplicates are preserved; the last
/// occurrence of a path wins once the pairs are folded into a
/// [`PathMap`](super::PathMap) or upserted into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathUrlPair {
    pub path: String,
    pub url: String,
}

impl PathUrlPair {
    /// Creates a new pair.
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }

    /// Returns the reason this pair cannot be stored, if any.
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.path.is_empty() {
            Some("path is empty")
        } else if self.url.is_empty() {
            Some("url is empty")
        } else {
            None
        }
    }
}
