use std::collections::HashMap;

use crate::Identifier;

/// Identifier-to-label lookup, keyed by the identifier's decimal text.
///
/// Read-only once built. Entry order follows first appearance in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    labels: HashMap<String, String>,
    order: Vec<String>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw key/label pairs. Both sides are trimmed, empty keys are
    /// dropped and a repeated key takes the later label.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mapping = Self::new();
        for (key, label) in pairs {
            mapping.insert(key.as_ref(), label.as_ref());
        }
        mapping
    }

    pub fn insert(&mut self, key: &str, label: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let previous = self.labels.insert(key.to_string(), label.trim().to_string());
        if previous.is_none() {
            self.order.push(key.to_string());
        }
    }

    pub fn label_for(&self, identifier: Identifier) -> Option<&str> {
        self.get(&identifier.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// First `limit` entries in source order.
    pub fn preview(&self, limit: usize) -> Vec<(&str, &str)> {
        self.order
            .iter()
            .take(limit)
            .filter_map(|key| self.labels.get(key).map(|label| (key.as_str(), label.as_str())))
            .collect()
    }
}
