//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every article leads
//! with its positional index and title; the directory it came from and the
//! topics it carries follow as indented context lines.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! Articles
//! 001 Cooking (1 item)
//!     Source: Cooking/
//!     Topics: food
//! 002 Travel (1 item)
//!     Source: Travel/
//!     Topics: hiking, photos
//!     001 Alps
//!         Source: Alps/
//!         Topics: hiking, photos
//! ```
//!
//! ## Build
//!
//! ```text
//! Test Site → index.html
//! Travel → p/travel/index.html
//! Articles → articles/index.html
//!
//! Generated 10 pages, 1 asset, 1 static file
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::entry::Entry;
use crate::paths;
use crate::project::Project;
use crate::site::{SitePlan, WriteSummary};
use crate::sort::ArticleOrder;
use crate::types::{Page, PageKind};

/// What `list` shows besides the top-level articles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Descend into sub-articles.
    pub all: bool,
    /// Show each article's topics, own and inherited from descendants.
    pub topics: bool,
}

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `3 pages`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Format an entity header: positional index + title, with the number of
/// content items when there are any.
///
/// ```text
/// 001 Travel (2 items)
/// 002 Alps
/// ```
fn entity_header(index: usize, title: &str, items: usize) -> String {
    if items == 0 {
        format!("{} {}", format_index(index), title)
    } else {
        format!("{} {} ({})", format_index(index), title, plural(items, "item"))
    }
}

/// Human-readable byte count: `512 B`, `1.5 KB`, `3.2 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

// ============================================================================
// List output
// ============================================================================

/// Format the article tree.
///
/// Top-level articles follow `order`; sub-articles keep directory order and
/// are only shown with [`ListOptions::all`].
pub fn format_article_tree(
    project: &Project,
    order: &ArticleOrder,
    options: ListOptions,
) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];
    for (i, entry) in order.sorted(project.articles()).into_iter().enumerate() {
        push_entry(&mut lines, project, entry, i + 1, 0, options);
    }
    lines
}

fn push_entry(
    lines: &mut Vec<String>,
    project: &Project,
    entry: &Entry,
    position: usize,
    depth: usize,
    options: ListOptions,
) {
    let base_indent = indent(depth);
    lines.push(format!(
        "{}{}",
        base_indent,
        entity_header(position, entry.title(), entry.content().len())
    ));
    lines.push(format!("{}    Source: {}/", base_indent, entry.name()));

    if options.topics {
        let topics = project.topics(entry.key());
        if !topics.is_empty() {
            let names: Vec<&str> = topics.iter().map(|t| t.name()).collect();
            lines.push(format!("{}    Topics: {}", base_indent, names.join(", ")));
        }
    }

    if options.all {
        for (i, child) in entry.children().iter().enumerate() {
            push_entry(lines, project, child, i + 1, depth + 1, options);
        }
    }
}

/// Format the sorted topic list with the number of articles about each.
pub fn format_topics(project: &Project) -> Vec<String> {
    let topics = project.all_topics();
    let mut lines = vec!["Topics".to_string()];
    if topics.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }

    let entries = project.entries();
    for (i, topic) in topics.iter().enumerate() {
        let count = entries
            .iter()
            .filter(|e| project.topics(e.key()).contains(topic))
            .count();
        lines.push(format!(
            "{}{} {} ({})",
            indent(1),
            format_index(i + 1),
            topic,
            plural(count, "article")
        ));
    }
    lines
}

/// Format the total content size line.
pub fn format_total_size(project: &Project) -> String {
    let bytes = project.total_size();
    format!("Total size: {} ({})", format_size(bytes), plural(bytes as usize, "byte"))
}

/// Print the article tree to stdout.
pub fn print_article_tree(project: &Project, order: &ArticleOrder, options: ListOptions) {
    for line in format_article_tree(project, order, options) {
        println!("{}", line);
    }
}

/// Print the topic list to stdout.
pub fn print_topics(project: &Project) {
    for line in format_topics(project) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the summary of a project that assembled without errors.
pub fn format_check_output(project: &Project) -> Vec<String> {
    vec![
        "Content is valid".to_string(),
        format!("    {} ({})", project.title(), project.organization()),
        format!(
            "    {}, {}",
            plural(project.entries().len(), "article"),
            plural(project.all_topics().len(), "topic")
        ),
    ]
}

pub fn print_check_output(project: &Project) {
    for line in format_check_output(project) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

fn page_title(page: &Page) -> &str {
    match &page.kind {
        PageKind::Home { .. } => &page.site.title,
        PageKind::Article { title, .. }
        | PageKind::ArticleList { title, .. }
        | PageKind::TopicList { title, .. } => title,
    }
}

/// Format the generated pages and the totals written.
///
/// Output paths are shown relative to the output directory.
pub fn format_build_output(plan: &SitePlan, summary: &WriteSummary) -> Vec<String> {
    let mut lines: Vec<String> = plan
        .pages
        .iter()
        .map(|p| {
            let url = paths::url(&p.path);
            format!(
                "{} → {}",
                page_title(&p.page),
                url.as_str().trim_start_matches('/')
            )
        })
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(summary.pages, "page"),
        plural(summary.assets, "asset"),
        plural(summary.static_files, "static file")
    ));
    lines
}

pub fn print_build_output(plan: &SitePlan, summary: &WriteSummary) {
    for line in format_build_output(plan, summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
