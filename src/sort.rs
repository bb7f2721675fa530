//! Ordering of articles in listings.
//!
//! Every mode falls back to the title (case-sensitive) when its own key ties.

use crate::entry::Entry;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleSort {
    /// Newest published date first.
    PublishedFirst,
    /// Oldest published date first.
    PublishedLast,
    #[default]
    Title,
    /// Least recently edited first.
    Edited,
    /// Pinned articles first, then by title.
    Pinned,
}

/// Comparator for one sort mode plus the set of pinned article titles.
#[derive(Debug, Clone, Default)]
pub struct ArticleOrder {
    sort: ArticleSort,
    pinned: BTreeSet<String>,
}

impl ArticleOrder {
    pub fn new(sort: ArticleSort) -> Self {
        Self {
            sort,
            pinned: BTreeSet::new(),
        }
    }

    /// Mark articles with these titles as pinned.
    pub fn with_pinned<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pinned = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort(&self) -> ArticleSort {
        self.sort
    }

    pub fn is_pinned(&self, entry: &Entry) -> bool {
        self.pinned.contains(entry.title())
    }

    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let primary = match self.sort {
            ArticleSort::PublishedFirst => b.published_date().cmp(&a.published_date()),
            ArticleSort::PublishedLast => a.published_date().cmp(&b.published_date()),
            ArticleSort::Edited => a.last_update().cmp(&b.last_update()),
            ArticleSort::Pinned => self.is_pinned(b).cmp(&self.is_pinned(a)),
            ArticleSort::Title => Ordering::Equal,
        };
        primary.then_with(|| a.cmp_by_title(b))
    }

    /// `entries` in this order (stable for full ties).
    pub fn sorted<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let mut sorted: Vec<&Entry> = entries.iter().collect();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}
