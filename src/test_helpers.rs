//! Shared test utilities for the treepress test suite.
//!
//! Provides timestamp and content builders, a small assembled project, and
//! template engines that render predictable strings instead of HTML.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let project = sample_project();
//! let engine = StubEngine;
//! let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
//! ```
//!
//! The sample project looks like this:
//!
//! ```text
//! content/                 title: Test Site, organization: Test Org
//! ├── Travel/              text "Trips I took."          (1 byte)
//! │   └── Alps/            topics: hiking
//! │       └── Day 1/       topics: photos, day1.jpg      (2 bytes)
//! └── Cooking/             topics: food, text "Bread..." (3 bytes)
//! ```

use chrono::{Duration, NaiveDate};

use crate::assemble::ProjectAssembler;
use crate::content::{
    ContentItem, FileStamp, Inline, MediaFile, Paragraph, TextDocument,
};
use crate::dates::Timestamp;
use crate::entry::{Entry, EntryKey, EntryParts};
use crate::metadata::Metadata;
use crate::project::Project;
use crate::site::{RenderError, TemplateEngine};
use crate::types::{ArticlePreview, ContentFragment, Page};

// =========================================================================
// Timestamps and content
// =========================================================================

/// Midnight on 2024-01-01 plus `days`.
pub fn at(days: i64) -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(days)
}

/// A file stamp created and updated at `at(n)` with a size of `n` bytes.
pub fn stamp(n: u64) -> FileStamp {
    FileStamp {
        created: at(n as i64),
        updated: at(n as i64),
        size: n,
    }
}

/// A text document without metadata.
pub fn text_doc(paragraphs: Vec<Paragraph>) -> TextDocument {
    TextDocument::new(paragraphs, Metadata::new(), stamp(1))
}

fn text_item(text: &str, size: u64) -> ContentItem {
    ContentItem::Text(TextDocument::new(
        vec![Paragraph::Text {
            text: vec![Inline::plain(text)],
        }],
        Metadata::new(),
        stamp(size),
    ))
}

/// Metadata with the mandatory project keys.
pub fn project_meta() -> Metadata {
    [("title", "Test Site"), ("organization", "Test Org")]
        .into_iter()
        .collect()
}

// =========================================================================
// Entries and projects
// =========================================================================

/// A childless entry with no metadata or content.
pub fn entry(key: EntryKey, name: &str) -> Entry {
    entry_with(key, name, Metadata::new(), vec![])
}

/// A childless entry with the given metadata and content.
pub fn entry_with(
    key: EntryKey,
    name: &str,
    metadata: Metadata,
    content: Vec<ContentItem>,
) -> Entry {
    Entry::new(EntryParts {
        key,
        name: name.to_string(),
        created: at(1),
        updated: at(1),
        metadata,
        content,
        children: vec![],
    })
    .unwrap()
}

/// The project drawn in the module docs, built through the assembler.
pub fn sample_project() -> Project {
    let mut a = ProjectAssembler::new("content", at(0), at(0));
    a.found_metadata(&project_meta()).unwrap();

    a.open_directory("Travel", at(1), at(1)).unwrap();
    a.found_content(text_item("Trips I took.", 1)).unwrap();
    a.open_directory("Alps", at(2), at(2)).unwrap();
    a.found_metadata(&[("topics", "hiking")].into_iter().collect())
        .unwrap();
    a.open_directory("Day 1", at(3), at(3)).unwrap();
    a.found_metadata(&[("topics", "photos")].into_iter().collect())
        .unwrap();
    a.found_content(ContentItem::Image(MediaFile::new("day1.jpg", stamp(2))))
        .unwrap();
    a.finish_directory().unwrap();
    a.finish_directory().unwrap();
    a.finish_directory().unwrap();

    a.open_directory("Cooking", at(4), at(4)).unwrap();
    a.found_metadata(&[("topics", "food")].into_iter().collect())
        .unwrap();
    a.found_content(text_item("Bread and more.", 3)).unwrap();
    a.finish_directory().unwrap();

    a.build_project().unwrap()
}

// =========================================================================
// Template engines
// =========================================================================

/// Renders `<kind>` for content, `prefix + title` for previews and
/// `kind rel_path` for pages.
pub struct StubEngine;

impl TemplateEngine for StubEngine {
    fn content_fragment(&self, item: &ContentItem) -> Result<ContentFragment, RenderError> {
        Ok(ContentFragment {
            title: item.title().map(str::to_string),
            html: format!("<{}>", item.kind()),
        })
    }

    fn preview_fragment(&self, preview: &ArticlePreview) -> Result<ContentFragment, RenderError> {
        Ok(ContentFragment {
            title: Some(preview.title.clone()),
            html: format!(
                "{}{}",
                preview.prefix.as_deref().unwrap_or_default(),
                preview.title
            ),
        })
    }

    fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        Ok(format!("{} {}", page.kind.label(), page.site.rel_path))
    }
}

/// Fails on every page.
pub struct FailingEngine;

impl TemplateEngine for FailingEngine {
    fn content_fragment(&self, item: &ContentItem) -> Result<ContentFragment, RenderError> {
        StubEngine.content_fragment(item)
    }

    fn preview_fragment(&self, preview: &ArticlePreview) -> Result<ContentFragment, RenderError> {
        StubEngine.preview_fragment(preview)
    }

    fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        Err(RenderError::Template(format!(
            "no template for {}",
            page.kind.label()
        )))
    }
}
