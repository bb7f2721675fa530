//! Key/value metadata attached to projects, entries and documents.
//!
//! Metadata comes from YAML files (`*.yml`) in a directory and from the front
//! matter of Markdown documents. Every source is flattened into plain
//! string-to-string pairs:
//!
//! ```text
//! title: Spring Trip          →  title      = "Spring Trip"
//! topics: [hiking, alps]      →  topics[0]  = "hiking"
//!                                topics[1]  = "alps"
//! draft: true                 →  draft      = "true"
//! ```
//!
//! Sources are merged with [`Metadata::concat`]: the later source wins for
//! every key both define, keys only one side defines are kept as-is.
//! A [`Metadata`] value is never mutated after construction; merging always
//! produces a new value.

use serde::Serialize;
use std::collections::BTreeMap;

/// A raw value from a metadata source before flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Scalar(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Scalar(value)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(values: Vec<String>) -> Self {
        MetaValue::List(values)
    }
}

/// An ordered, immutable string-to-string mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build metadata from raw values, flattening lists into `key[i]` entries.
    pub fn from_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, MetaValue)>,
        K: Into<String>,
    {
        let mut entries = BTreeMap::new();
        for (key, value) in values {
            let key = key.into();
            match value {
                MetaValue::Scalar(v) => {
                    entries.insert(key, v);
                }
                MetaValue::List(items) => {
                    for (idx, item) in items.into_iter().enumerate() {
                        entries.insert(format!("{key}[{idx}]"), item);
                    }
                }
            }
        }
        Self { entries }
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of `self` and `later`; on conflicting keys `later` wins.
    pub fn concat(&self, later: &Metadata) -> Metadata {
        let mut entries = self.entries.clone();
        entries.extend(
            later
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Metadata { entries }
    }

    /// All values stored under `key`: the scalar entry (if any) followed by
    /// the flattened `key[i]` entries in index order.
    pub fn values(&self, key: &str) -> Vec<&str> {
        let mut indexed: Vec<(usize, &str)> = self
            .entries
            .iter()
            .filter_map(|(k, v)| list_index(k, key).map(|idx| (idx, v.as_str())))
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);

        self.get(key)
            .into_iter()
            .chain(indexed.into_iter().map(|(_, v)| v))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse `topics[3]` against base key `topics` into `Some(3)`.
fn list_index(flat_key: &str, key: &str) -> Option<usize> {
    flat_key
        .strip_prefix(key)?
        .strip_prefix('[')?
        .strip_suffix(']')?
        .parse()
        .ok()
}

/// Parse a YAML document into metadata.
///
/// Only a top-level mapping contributes entries. Scalars become strings,
/// sequences of scalars become lists (a one-element sequence is stored as a
/// plain scalar), and nested mappings are ignored. An empty document yields
/// empty metadata.
pub fn parse_yaml(text: &str) -> Result<Metadata, serde_yaml::Error> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
    let serde_yaml::Value::Mapping(map) = doc else {
        return Ok(Metadata::new());
    };

    let values = map.into_iter().filter_map(|(k, v)| {
        let key = yaml_scalar(&k)?;
        let value = match v {
            serde_yaml::Value::Sequence(items) => {
                let mut items: Vec<String> = items.iter().filter_map(yaml_scalar).collect();
                if items.len() == 1 {
                    MetaValue::Scalar(items.remove(0))
                } else {
                    MetaValue::List(items)
                }
            }
            other => MetaValue::Scalar(yaml_scalar(&other)?),
        };
        Some((key, value))
    });
    Ok(Metadata::from_values(values))
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        serde_yaml::Value::Tagged(tagged) => yaml_scalar(&tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}
