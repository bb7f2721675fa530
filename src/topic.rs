//! Topics: normalized tags that group entries across the tree.
//!
//! Topics are read from an entry's metadata under the `topics`, `topic` or
//! `tags` keys, either as a comma-separated scalar or as a YAML list:
//!
//! ```yaml
//! topics: rust, parsing
//! tags:
//!   - compilers
//! ```
//!
//! Names are normalized by trimming and collapsing inner whitespace, so
//! `"  static   sites "` and `"static sites"` are the same topic.

use crate::metadata::Metadata;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Metadata keys that carry topics.
pub const TOPIC_KEYS: &[&str] = &["topics", "topic", "tags"];

/// A normalized tag. Equality, hashing and ordering all use the normalized name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Topic {
    name: String,
}

impl Topic {
    /// Normalize `raw` into a topic. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Topic> {
        let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            None
        } else {
            Some(Topic { name })
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All topics named in `metadata`.
    pub fn from_metadata(metadata: &Metadata) -> BTreeSet<Topic> {
        TOPIC_KEYS
            .iter()
            .flat_map(|key| metadata.values(key))
            .flat_map(|value| value.split(','))
            .filter_map(Topic::new)
            .collect()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
