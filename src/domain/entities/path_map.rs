//! In-memory path to url mapping.

use std::collections::HashMap;

use super::PathUrlPair;

/// Mapping from request path to redirect url.
///
/// Built once from a sequence of pairs and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    entries: HashMap<String, String>,
}

impl PathMap {
    /// Folds pairs into a map in sequence order. The last pair for a path wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = PathUrlPair>,
    {
        let mut entries = HashMap::new();
        for pair in pairs {
            entries.insert(pair.path, pair.url);
        }
        Self { entries }
    }

    /// Returns the url configured for `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for PathMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter.into_iter().map(|(path, url)| PathUrlPair::new(path, url)))
    }
}
