//! The assembled project: root metadata, the article tree and the topic index.
//!
//! A [`Project`] is produced once by the assembler and is read-only afterwards.
//! The topic index only stores the topics each entry declares itself; the
//! topics an entry is *about* (its own plus every descendant's) are computed
//! on lookup by [`Project::topics`], so tagging a deeply nested entry makes
//! the topic visible at every ancestor.

use crate::entry::{Entry, EntryKey};
use crate::metadata::Metadata;
use crate::topic::Topic;
use std::collections::{BTreeMap, BTreeSet};

/// Topics each entry declares in its own metadata.
#[derive(Debug, Clone, Default)]
pub struct TopicIndex {
    own: BTreeMap<EntryKey, BTreeSet<Topic>>,
}

impl TopicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `topics` for `key`. Entries without topics are not stored.
    pub fn register(&mut self, key: EntryKey, topics: BTreeSet<Topic>) {
        if !topics.is_empty() {
            self.own.entry(key).or_default().extend(topics);
        }
    }

    pub fn own(&self, key: &EntryKey) -> Option<&BTreeSet<Topic>> {
        self.own.get(key)
    }

    /// Union of the own topics of `key` and every key below it.
    pub fn rolled_up(&self, key: &EntryKey) -> BTreeSet<Topic> {
        // Keys sort in pre-order, so a subtree is a contiguous run.
        self.own
            .range(key.clone()..)
            .take_while(|(k, _)| k.starts_with(key))
            .flat_map(|(_, topics)| topics.iter().cloned())
            .collect()
    }

    /// Every topic used anywhere, sorted by name.
    pub fn all(&self) -> BTreeSet<Topic> {
        self.own.values().flatten().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.own.is_empty()
    }
}

/// The root of the content tree.
#[derive(Debug, Clone)]
pub struct Project {
    title: String,
    organization: String,
    metadata: Metadata,
    articles: Vec<Entry>,
    topics: TopicIndex,
}

impl Project {
    pub fn new(
        title: String,
        organization: String,
        metadata: Metadata,
        articles: Vec<Entry>,
        topics: TopicIndex,
    ) -> Self {
        Self {
            title,
            organization,
            metadata,
            articles,
            topics,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Top-level articles in directory order.
    pub fn articles(&self) -> &[Entry] {
        &self.articles
    }

    pub fn topic_index(&self) -> &TopicIndex {
        &self.topics
    }

    pub fn entry(&self, key: &EntryKey) -> Option<&Entry> {
        let (first, rest) = key.indices().split_first()?;
        let mut current = self.articles.get(*first)?;
        for idx in rest {
            current = current.children().get(*idx)?;
        }
        Some(current)
    }

    /// The entries from the top-level article down to `key`, inclusive.
    /// Empty if the key does not resolve.
    pub fn ancestry(&self, key: &EntryKey) -> Vec<&Entry> {
        let chain: Option<Vec<&Entry>> = key.prefixes().map(|k| self.entry(&k)).collect();
        chain.unwrap_or_default()
    }

    /// Every entry of every rank, depth-first pre-order in directory order.
    pub fn entries(&self) -> Vec<&Entry> {
        self.articles.iter().flat_map(Entry::descendants).collect()
    }

    /// Topics declared by the entry itself.
    pub fn own_topics(&self, key: &EntryKey) -> BTreeSet<Topic> {
        self.topics.own(key).cloned().unwrap_or_default()
    }

    /// Topics of the entry and all of its descendants.
    pub fn topics(&self, key: &EntryKey) -> BTreeSet<Topic> {
        self.topics.rolled_up(key)
    }

    pub fn all_topics(&self) -> BTreeSet<Topic> {
        self.topics.all()
    }

    /// Total bytes of every content item in the project.
    pub fn total_size(&self) -> u64 {
        self.articles.iter().map(Entry::size).sum()
    }
}
