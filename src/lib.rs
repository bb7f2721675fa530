//! # Treepress
//!
//! A static site generator for small article collections. Your filesystem is
//! the data source: directories become articles nested up to three levels
//! deep, and the files inside a directory become that article's content.
//!
//! # Architecture
//!
//! ```text
//! 1. Scan       content/  →  Project     (filesystem → article tree + topic index)
//! 2. Plan       Project   →  SitePlan    (every page, its path, its data)
//! 3. Render     SitePlan  →  dist/       (HTML via a TemplateEngine)
//! ```
//!
//! Scanning never builds entries directly. The walker reports what it finds
//! to a [`assemble::ProjectAssembler`], a stack of open directories that
//! turns events into immutable [`entry::Entry`] values when a directory
//! closes. Planning is pure: [`site::SiteGenerator`] produces page
//! descriptions and never touches the filesystem, so the whole page layout is
//! unit-testable with a stub engine. Only [`site::SitePlan::write`] does I/O.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content directory and drives the assembler |
//! | [`assemble`] | Directory-event assembler and project format errors |
//! | [`markdown`] | Markdown and YAML front matter to the structured text model |
//! | [`metadata`] | Ordered key/value metadata, YAML flattening, merging |
//! | [`content`] | Content items, the text model, bounded previews |
//! | [`entry`] | Ranks, hierarchical keys, the article type |
//! | [`project`] | The assembled tree and the topic index |
//! | [`topic`] | Topic names and extraction from metadata |
//! | [`dates`] | `date` metadata parsing and readable formatting |
//! | [`naming`] | Slugs and the per-run id allocator |
//! | [`paths`] | Canonical page paths, relative paths, output locations |
//! | [`paginate`] | Page partitioning and the page-link window |
//! | [`sort`] | Article sort modes |
//! | [`types`] | Page descriptions handed to the template engine |
//! | [`site`] | Page planning, the `TemplateEngine` trait, writing the site |
//! | [`render`] | HTML template engine using Maud |
//! | [`config`] | `config.toml` loading, validation and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # Addressing
//!
//! ```text
//! /                        home: five top-level article previews
//! /p/{id}/.../{id}/        one page per article, ids of every ancestor
//! /articles/[{n}/]         every article, pre-order, five per page
//! /topics/[{n}/]           every topic, five per page
//! /topics/{id}/[{n}/]      articles about one topic, five per page
//! ```
//!
//! Ids are slugs of titles, made unique per run by [`naming::IdAllocator`].

pub mod assemble;
pub mod config;
pub mod content;
pub mod dates;
pub mod entry;
pub mod markdown;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod paginate;
pub mod paths;
pub mod project;
pub mod render;
pub mod scan;
pub mod site;
pub mod sort;
pub mod topic;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
