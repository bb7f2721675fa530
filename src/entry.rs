//! Entries: the content-bearing directories of a project.
//!
//! A project tree has at most three levels below the root:
//!
//! ```text
//! content/                  # project root (metadata + entries only)
//! ├── site.yml
//! ├── Travel/               # rank 0: article
//! │   ├── index.md
//! │   └── Alps/             # rank 1: sub-article
//! │       ├── notes.md
//! │       └── Day-1/        # rank 2: sub-sub-article (no children allowed)
//! │           └── photo.jpg
//! └── Cooking/
//!     └── bread.md
//! ```
//!
//! All three ranks share one [`Entry`] type. Each entry owns its children by
//! value and knows its own position as an [`EntryKey`] (the child indices
//! leading to it from the root), so ancestors are found by walking down from
//! the project rather than through parent pointers.

use crate::assemble::ProjectError;
use crate::content::ContentItem;
use crate::dates::{self, Timestamp};
use crate::metadata::Metadata;
use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

/// Nesting rank of an entry: 0 (top-level) to 2 (deepest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const ARTICLE: Rank = Rank(0);
    pub const SUB_ARTICLE: Rank = Rank(1);
    pub const SUB_SUB_ARTICLE: Rank = Rank(2);

    /// Rank for a zero-based nesting level, `None` past the deepest rank.
    pub fn new(level: usize) -> Option<Rank> {
        match level {
            0 => Some(Rank::ARTICLE),
            1 => Some(Rank::SUB_ARTICLE),
            2 => Some(Rank::SUB_SUB_ARTICLE),
            _ => None,
        }
    }

    pub fn level(self) -> usize {
        self.0 as usize
    }

    pub fn allows_children(self) -> bool {
        self < Rank::SUB_SUB_ARTICLE
    }

    /// Rank of this rank's children.
    pub fn child(self) -> Option<Rank> {
        Rank::new(self.level() + 1)
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "article",
            1 => "sub-article",
            _ => "sub-sub-article",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of an entry in the project tree: child indices from the root.
///
/// `[1, 0]` is the first child of the second top-level article. Keys order
/// by tree position, which is also pre-order traversal order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey(Vec<usize>);

impl EntryKey {
    pub fn root(index: usize) -> EntryKey {
        EntryKey(vec![index])
    }

    pub fn from_indices(indices: Vec<usize>) -> EntryKey {
        EntryKey(indices)
    }

    pub fn child(&self, index: usize) -> EntryKey {
        let mut indices = self.0.clone();
        indices.push(index);
        EntryKey(indices)
    }

    pub fn parent(&self) -> Option<EntryKey> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(EntryKey(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of indices; a top-level article has depth 1.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn rank(&self) -> Option<Rank> {
        self.depth().checked_sub(1).and_then(Rank::new)
    }

    /// Keys of every ancestor from the top-level article down to `self`, inclusive.
    pub fn prefixes(&self) -> impl Iterator<Item = EntryKey> + '_ {
        (1..=self.0.len()).map(|len| EntryKey(self.0[..len].to_vec()))
    }

    /// Whether `self` is `other` or one of its descendants.
    pub fn starts_with(&self, other: &EntryKey) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Everything the assembler collected for one directory.
#[derive(Debug, Clone)]
pub struct EntryParts {
    pub key: EntryKey,
    pub name: String,
    pub created: Timestamp,
    pub updated: Timestamp,
    pub metadata: Metadata,
    pub content: Vec<ContentItem>,
    pub children: Vec<Entry>,
}

/// One article, sub-article or sub-sub-article. Immutable once built.
#[derive(Debug, Clone)]
pub struct Entry {
    key: EntryKey,
    rank: Rank,
    name: String,
    created: Timestamp,
    updated: Timestamp,
    metadata: Metadata,
    content: Vec<ContentItem>,
    children: Vec<Entry>,
    date: Option<Timestamp>,
}

impl Entry {
    /// Build an entry, enforcing the nesting rules.
    ///
    /// A `date` metadata value that cannot be parsed is logged once here and
    /// the entry falls back to its rolled-up last update.
    pub fn new(parts: EntryParts) -> Result<Entry, ProjectError> {
        let rank = parts
            .key
            .rank()
            .ok_or_else(|| ProjectError::TooDeep(parts.name.clone()))?;
        if !rank.allows_children() && !parts.children.is_empty() {
            return Err(ProjectError::TooDeep(parts.name));
        }
        if let Some(child) = parts
            .children
            .iter()
            .find(|c| c.key().parent().as_ref() != Some(&parts.key))
        {
            return Err(ProjectError::MisplacedChild {
                parent: parts.key.to_string(),
                child: child.key().to_string(),
            });
        }

        let date = parts.metadata.get("date").and_then(|raw| {
            let parsed = dates::parse_date(raw);
            if parsed.is_none() {
                warn!(entry = %parts.name, date = raw, "unparseable date, using last update");
            }
            parsed
        });

        Ok(Entry {
            key: parts.key,
            rank,
            name: parts.name,
            created: parts.created,
            updated: parts.updated,
            metadata: parts.metadata,
            content: parts.content,
            children: parts.children,
            date,
        })
    }

    pub fn key(&self) -> &EntryKey {
        &self.key
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    /// Explicit `title` metadata, else the first titled content item, else
    /// the directory name.
    pub fn title(&self) -> &str {
        self.metadata
            .get("title")
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.content.iter().find_map(ContentItem::title))
            .unwrap_or(&self.name)
    }

    pub fn own_created(&self) -> Timestamp {
        self.created
    }

    pub fn own_last_update(&self) -> Timestamp {
        self.updated
    }

    /// Latest creation time of this entry and all its descendants.
    pub fn created(&self) -> Timestamp {
        self.children
            .iter()
            .map(Entry::created)
            .fold(self.created, Timestamp::max)
    }

    /// Latest update time of this entry and all its descendants.
    pub fn last_update(&self) -> Timestamp {
        self.children
            .iter()
            .map(Entry::last_update)
            .fold(self.updated, Timestamp::max)
    }

    /// The `date` metadata when it parses, else [`Entry::last_update`].
    pub fn published_date(&self) -> Timestamp {
        self.date.unwrap_or_else(|| self.last_update())
    }

    /// This entry and every descendant, depth-first pre-order.
    pub fn descendants(&self) -> Vec<&Entry> {
        let mut out = Vec::new();
        self.collect_pre_order(&mut out);
        out
    }

    fn collect_pre_order<'a>(&'a self, out: &mut Vec<&'a Entry>) {
        out.push(self);
        for child in &self.children {
            child.collect_pre_order(out);
        }
    }

    /// Total bytes of this entry's own content and all descendants'.
    pub fn size(&self) -> u64 {
        self.content.iter().map(ContentItem::size).sum::<u64>()
            + self.children.iter().map(Entry::size).sum::<u64>()
    }

    /// Case-sensitive ordering by title.
    pub fn cmp_by_title(&self, other: &Entry) -> Ordering {
        self.title().cmp(other.title())
    }
}
