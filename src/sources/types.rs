//! Data types exchanged with external collaborators.

use serde::Deserialize;
use serde_json::Value;

use crate::annotation::Annotation;
use crate::clips::Clip;

/// One recording session of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionRow {
    /// Subject record id (e.g. `sub-RID0222`).
    pub record_id: String,
    /// Portal dataset name for this session.
    #[serde(alias = "ieegportalsubjno")]
    pub dataset_name: String,
}

impl SessionRow {
    /// Create a session row.
    pub fn new(record_id: impl Into<String>, dataset_name: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            dataset_name: dataset_name.into(),
        }
    }
}

/// A recording channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    /// Channel label.
    pub label: String,
    /// Channel index in the recording.
    pub index: i64,
}

/// Base data fetched for one session.
#[derive(Debug, Clone, Default)]
pub struct BaseSessionData {
    /// Recording channels.
    pub channels: Vec<Channel>,
    /// Machine-derived annotations.
    pub annotations: Vec<Annotation>,
    /// Session metadata.
    pub metadata: SessionMetadata,
    /// Clips derived from the base annotations alone.
    pub clips: Vec<Clip>,
}

/// Ordered key/value metadata describing one session.
///
/// Insertion order is preserved; inserting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionMetadata {
    entries: Vec<(String, Value)>,
}

impl SessionMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: &str, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a value as a float, accepting numeric strings.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Look up a value as a string slice.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for SessionMetadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(&key, value);
        }
        metadata
    }
}
