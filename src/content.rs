//! Content items: the material a directory contributes to its entry.
//!
//! Every file the scanner recognizes inside an entry directory becomes one
//! [`ContentItem`]. Text documents keep a small structured model of their
//! body ([`Paragraph`] / [`Inline`]) so the template engine can render them
//! and the site generator can cut plain-text previews from them.

use crate::dates::Timestamp;
use crate::metadata::Metadata;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Filesystem facts shared by every content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileStamp {
    pub created: Timestamp,
    pub updated: Timestamp,
    pub size: u64,
}

/// One unit of material owned by an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentItem {
    Text(TextDocument),
    Image(MediaFile),
    Video(MediaFile),
    Youtube(YoutubeEmbed),
}

impl ContentItem {
    pub fn title(&self) -> Option<&str> {
        match self {
            ContentItem::Text(doc) => doc.title(),
            ContentItem::Image(_) | ContentItem::Video(_) => None,
            ContentItem::Youtube(yt) => yt.title.as_deref().filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn stamp(&self) -> &FileStamp {
        match self {
            ContentItem::Text(doc) => &doc.stamp,
            ContentItem::Image(media) | ContentItem::Video(media) => &media.stamp,
            ContentItem::Youtube(yt) => &yt.stamp,
        }
    }

    pub fn created(&self) -> Timestamp {
        self.stamp().created
    }

    pub fn last_update(&self) -> Timestamp {
        self.stamp().updated
    }

    pub fn size(&self) -> u64 {
        self.stamp().size
    }

    /// Short lowercase label for listings and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Text(_) => "text",
            ContentItem::Image(_) => "image",
            ContentItem::Video(_) => "video",
            ContentItem::Youtube(_) => "youtube",
        }
    }

    /// The source file to publish alongside the page, if this item has one.
    pub fn media_file(&self) -> Option<&MediaFile> {
        match self {
            ContentItem::Image(media) | ContentItem::Video(media) => Some(media),
            ContentItem::Text(_) | ContentItem::Youtube(_) => None,
        }
    }

    /// Append preview text to `out`, spending at most `budget` characters.
    /// Returns the unspent budget. Items without text leave it untouched.
    pub fn preview(&self, out: &mut String, budget: usize) -> usize {
        match self {
            ContentItem::Text(doc) => doc.preview(out, budget),
            _ => budget,
        }
    }
}

/// A Markdown or plain-text document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDocument {
    pub paragraphs: Vec<Paragraph>,
    pub metadata: Metadata,
    pub stamp: FileStamp,
}

impl TextDocument {
    pub fn new(paragraphs: Vec<Paragraph>, metadata: Metadata, stamp: FileStamp) -> Self {
        Self {
            paragraphs,
            metadata,
            stamp,
        }
    }

    /// `title` from the document's own metadata, else its first level-1 heading.
    pub fn title(&self) -> Option<&str> {
        self.metadata
            .get("title")
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.paragraphs.iter().find_map(|p| match p {
                    Paragraph::Heading { level: 1, text } => first_plain(text),
                    _ => None,
                })
            })
    }

    /// Plain text of the body, cut to `budget` characters.
    ///
    /// Headings, code blocks and rules are skipped. Paragraphs are joined with
    /// single spaces and the separator counts against the budget.
    pub fn preview(&self, out: &mut String, budget: usize) -> usize {
        let mut texts = Vec::new();
        for paragraph in &self.paragraphs {
            paragraph.collect_preview_text(&mut texts);
        }

        let mut remaining = budget;
        for text in texts {
            if remaining == 0 {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
            }
            let taken: String = text.chars().take(remaining).collect();
            remaining -= taken.chars().count();
            out.push_str(&taken);
        }
        remaining
    }
}

/// A block-level element of a text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Paragraph {
    Heading { level: u8, text: Vec<Inline> },
    Text { text: Vec<Inline> },
    List { ordered: bool, items: Vec<Vec<Paragraph>> },
    Quote { children: Vec<Paragraph> },
    Code { literal: String, info: String },
    Rule,
}

impl Paragraph {
    fn collect_preview_text(&self, out: &mut Vec<String>) {
        match self {
            Paragraph::Text { text } => {
                let plain = normalize_space(&plain_text(text));
                if !plain.is_empty() {
                    out.push(plain);
                }
            }
            Paragraph::List { items, .. } => {
                for child in items.iter().flatten() {
                    child.collect_preview_text(out);
                }
            }
            Paragraph::Quote { children } => {
                for child in children {
                    child.collect_preview_text(out);
                }
            }
            Paragraph::Heading { .. } | Paragraph::Code { .. } | Paragraph::Rule => {}
        }
    }
}

/// An inline run inside a heading or paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inline {
    Plain { text: String },
    Code { text: String },
    Emphasis { children: Vec<Inline> },
    Strong { children: Vec<Inline> },
    Link { destination: String, children: Vec<Inline> },
    Image { destination: String, alt: Vec<Inline> },
}

impl Inline {
    pub fn plain(text: impl Into<String>) -> Inline {
        Inline::Plain { text: text.into() }
    }
}

/// Concatenated visible text of `inlines`. Images contribute nothing.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_plain_text(inlines, &mut out);
    out
}

fn push_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Plain { text } | Inline::Code { text } => out.push_str(text),
            Inline::Emphasis { children }
            | Inline::Strong { children }
            | Inline::Link { children, .. } => push_plain_text(children, out),
            Inline::Image { .. } => {}
        }
    }
}

// Heading titles are borrowed, so only a heading made of a single plain run
// can be returned without allocating.
fn first_plain(text: &[Inline]) -> Option<&str> {
    match text {
        [Inline::Plain { text }] if !text.trim().is_empty() => Some(text.trim()),
        _ => None,
    }
}

fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// An image or video file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    pub path: PathBuf,
    pub stamp: FileStamp,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>, stamp: FileStamp) -> Self {
        Self {
            path: path.into(),
            stamp,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used when publishing the file next to its page.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A YouTube video referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YoutubeEmbed {
    pub video_id: String,
    pub title: Option<String>,
    pub stamp: FileStamp,
}
