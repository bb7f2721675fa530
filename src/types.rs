//! Page descriptions handed from the site generator to the template engine.
//!
//! The generator never produces markup itself. For each page it builds a
//! [`Page`]: the data every page shares ([`SiteData`]) plus a [`PageKind`]
//! with the fields specific to that kind of page. All types serialize, which
//! is what `treepress plan` prints.

use serde::Serialize;

/// A site-absolute URL such as `/p/travel/index.html`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SiteUrl(String);

impl SiteUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URL as seen from a page whose relative path to the root is `rel_path`.
    pub fn href(&self, rel_path: &str) -> String {
        format!("{rel_path}{}", self.0)
    }
}

/// A titled link, optionally marked as pointing at the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteLink {
    pub title: String,
    pub url: SiteUrl,
    pub current: bool,
}

impl SiteLink {
    pub fn new(title: impl Into<String>, url: SiteUrl) -> Self {
        Self {
            title: title.into(),
            url,
            current: false,
        }
    }

    pub fn current(mut self, current: bool) -> Self {
        self.current = current;
        self
    }
}

/// Page links for a paginated listing.
///
/// Groups are rendered with a gap between them: an optional link to the
/// first page, the window around the selected page, an optional link to
/// the last page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub groups: Vec<Vec<SiteLink>>,
}

impl Pagination {
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether there is anything worth rendering.
    pub fn has_pagination(&self) -> bool {
        match self.groups.as_slice() {
            [] => false,
            [single] => single.len() != 1,
            _ => true,
        }
    }
}

/// Data shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    /// Relative path from the page to the site root (`.`, `..`, `../..`).
    pub rel_path: String,
    pub title: String,
    pub organization: String,
    pub headers: Vec<SiteLink>,
    /// Human-readable generation time.
    pub generated_at: String,
}

/// Rendered markup for one content item or one child preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub html: String,
}

/// Summary of an article for listings and child previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticlePreview {
    /// Text shown before the title, e.g. `Read on: ` for child previews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub title: String,
    pub published: String,
    pub text: String,
    pub rel_path: String,
    pub url: SiteUrl,
}

impl ArticlePreview {
    pub fn href(&self) -> String {
        self.url.href(&self.rel_path)
    }
}

/// One page of the site.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub site: SiteData,
    #[serde(flatten)]
    pub kind: PageKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PageKind {
    Home {
        articles: Vec<ArticlePreview>,
    },
    Article {
        title: String,
        published: String,
        breadcrumbs: Vec<SiteLink>,
        topics: Vec<SiteLink>,
        content: Vec<ContentFragment>,
    },
    ArticleList {
        title: String,
        articles: Vec<ArticlePreview>,
        pagination: Pagination,
    },
    TopicList {
        title: String,
        topics: Vec<SiteLink>,
        pagination: Pagination,
    },
}

impl PageKind {
    pub fn label(&self) -> &'static str {
        match self {
            PageKind::Home { .. } => "home",
            PageKind::Article { .. } => "article",
            PageKind::ArticleList { .. } => "article-list",
            PageKind::TopicList { .. } => "topic-list",
        }
    }
}
