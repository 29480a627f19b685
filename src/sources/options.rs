//! Named options passed to source queries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SourceError;

/// Open-ended named options for `search` and `recent`.
///
/// The trait does not fix an option set; each source decides which keys it
/// understands and rejects the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceOptions {
    options: BTreeMap<String, String>,
}

impl SourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace an option
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Option keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Parse a `key=value` pair. The value may be empty and may contain `=`.
    pub fn parse_pair(pair: &str) -> Result<(String, String), SourceError> {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            SourceError::InvalidRequest(format!("Expected key=value, got {:?}", pair))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(SourceError::InvalidRequest(format!(
                "Option key is empty in {:?}",
                pair
            )));
        }

        Ok((key.to_string(), value.trim().to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}
