//! Data form model

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A named collection of key/value fields attached to a project
///
/// Forms are located by exact title; the server does not enforce unique
/// titles, so lookups take the first match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataForm {
    /// Form title as shown in SPIDAmin
    pub title: String,

    /// Field label to value
    ///
    /// Non-string values read from the server are kept as their JSON text;
    /// null fields are dropped.
    #[serde(default, deserialize_with = "deserialize_fields")]
    pub fields: BTreeMap<String, String>,
}

impl DataForm {
    /// Create an empty form with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set a field, returning the form for chaining
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

fn deserialize_fields<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((name, text)),
            other => Some((name, other.to_string())),
        })
        .collect())
}
