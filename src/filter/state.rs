//! The committed filters, as emitted to the owning page.

use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of one key: a single string for single-valued matchers, a list for
/// multiple ones. Excluded values carry a leading `!`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchValue {
    Single(String),
    Multiple(Vec<String>),
}

impl MatchValue {
    /// Every value, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            MatchValue::Single(value) => vec![value.as_str()],
            MatchValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for MatchValue {
    fn from(value: &str) -> Self {
        MatchValue::Single(value.to_string())
    }
}

impl From<Vec<&str>> for MatchValue {
    fn from(values: Vec<&str>) -> Self {
        MatchValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Map of matcher state key to committed value(s).
///
/// Serializes to the same JSON the page stores, e.g.
/// `{"type":["type 1","!type 2"]}`.
///
/// ```
/// use folio_navigator::filter::{MatchState, MatchValue};
///
/// let json = r#"{"type":["type 1","!type 2"],"start":"01/01/2023"}"#;
/// let state = MatchState::from_json(json).unwrap();
/// assert_eq!(state.get("type").unwrap().values(), vec!["type 1", "!type 2"]);
/// assert_eq!(state.get("start"), Some(&MatchValue::Single("01/01/2023".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchState {
    entries: BTreeMap<String, MatchValue>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MatchValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MatchValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<MatchValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatchValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Append to a list value, creating it when absent.
    pub(crate) fn push(&mut self, key: &str, value: String) {
        match self.entries.get_mut(key) {
            Some(existing) => {
                let previous = std::mem::replace(existing, MatchValue::Multiple(Vec::new()));
                let mut values = match previous {
                    MatchValue::Single(first) => vec![first],
                    MatchValue::Multiple(values) => values,
                };
                values.push(value);
                *existing = MatchValue::Multiple(values);
            }
            None => {
                self.entries
                    .insert(key.to_string(), MatchValue::Multiple(vec![value]));
            }
        }
    }

    pub fn to_json(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<MatchValue>> FromIterator<(K, V)> for MatchState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
