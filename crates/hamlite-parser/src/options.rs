//! Parser configuration.
//!
//! No option changes parsing today. Keys are accepted and kept so callers
//! can pass renderer-oriented settings through without the parser
//! rejecting them.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Deserializes from any map. Values of any type are accepted: strings are
/// kept as-is, everything else as its JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct ParserOptions {
    /// Every supplied key, none of which is interpreted yet.
    pub extra: BTreeMap<String, String>,
}

impl From<BTreeMap<String, Value>> for ParserOptions {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let extra = raw
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect();
        Self { extra }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from key/value pairs. Unknown keys are kept, not rejected.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let extra = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { extra }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.extra.is_empty()
    }

    pub(crate) fn log_ignored(&self) {
        for key in self.extra.keys() {
            log::debug!("ignoring unknown parser option '{key}'");
        }
    }
}
