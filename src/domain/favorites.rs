// src/domain/favorites.rs
//
// FavoriteSet - per-viewer set of favorited move ids
//
// INVARIANTS:
// - Set semantics: duplicates impossible by construction
// - Malformed persisted data reads as an empty set, never an error
// - Persisted form is a JSON array of strings

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSet {
    ids: BTreeSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the stored representation leniently.
    ///
    /// Anything that is not a JSON array yields an empty set; non-string
    /// entries inside an array are dropped.
    pub fn from_persisted(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };

        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) if !s.is_empty() => Some(s),
                    _ => None,
                })
                .collect(),
            Ok(_) | Err(_) => {
                log::warn!("Discarding malformed favorites payload");
                Self::new()
            }
        }
    }

    pub fn to_persisted(&self) -> String {
        // Serializing a set of strings cannot fail
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership and return the new state (true = now favorite)
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl FromIterator<String> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
