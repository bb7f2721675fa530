//! Site generation: from an assembled [`Project`] to a plan of pages.
//!
//! The generator decides *what* pages exist and what goes on them; a
//! [`TemplateEngine`] decides how they look. For one run it produces:
//!
//! | Page | Path | Content |
//! |---|---|---|
//! | Home | `/` | previews of the first five top-level articles |
//! | Article | `/p/{id}/.../` | breadcrumbs, topics, content, child previews |
//! | Article list | `/articles/`, `/articles/2/`, ... | every entry, five per page |
//! | Topic list | `/topics/`, `/topics/2/`, ... | every topic, five per page |
//! | Topic page | `/topics/{id}/`, ... | every entry about the topic, five per page |
//!
//! Identifiers are allocated once when the generator is created: entries
//! first (pre-order over the sorted top-level articles), then topics in name
//! order. Each generator owns its own [`IdAllocator`], so a second run over
//! the same project produces the same identifiers. Page numbers of the topic
//! list are reserved first, so a topic called `2` never lands on
//! `/topics/2/`.
//!
//! [`SiteGenerator::plan`] renders content fragments but writes nothing.
//! [`SitePlan::write`] renders every page before touching the output
//! directory, so a template failure leaves no partial site behind.

use crate::content::ContentItem;
use crate::dates::{self, Timestamp};
use crate::entry::{Entry, EntryKey};
use crate::naming::IdAllocator;
use crate::paginate::{self, PAGE_SIZE};
use crate::paths;
use crate::project::Project;
use crate::sort::ArticleOrder;
use crate::topic::Topic;
use crate::types::{
    ArticlePreview, ContentFragment, Page, PageKind, Pagination, SiteData, SiteLink,
};
use serde::Serialize;
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Top-level articles previewed on the home page.
pub const HOME_ARTICLE_COUNT: usize = 5;
/// Character budget of an article preview.
pub const PREVIEW_LENGTH: usize = 200;
/// Title prefix of child previews on an article page.
pub const CHILD_PREVIEW_PREFIX: &str = "Read on: ";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid YouTube video id: {0:?}")]
    InvalidVideoId(String),
    #[error("Template error: {0}")]
    Template(String),
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// A file the template engine adds to the output root, e.g. a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    pub contents: String,
}

/// Turns page descriptions into markup.
pub trait TemplateEngine {
    /// Markup for one content item of an article page.
    fn content_fragment(&self, item: &ContentItem) -> Result<ContentFragment, RenderError>;

    /// Markup for a child article preview embedded in its parent's page.
    fn preview_fragment(&self, preview: &ArticlePreview) -> Result<ContentFragment, RenderError>;

    /// A complete page.
    fn render_page(&self, page: &Page) -> Result<String, RenderError>;

    fn static_files(&self) -> Vec<StaticFile> {
        Vec::new()
    }
}

/// A page and the canonical path it lives at.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedPage {
    pub path: String,
    pub page: Page,
}

/// A media file published next to the page that embeds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAsset {
    pub source: PathBuf,
    pub page_path: String,
    pub file_name: String,
}

/// Everything one run will write.
#[derive(Debug, Clone, Serialize)]
pub struct SitePlan {
    pub pages: Vec<PlannedPage>,
    pub assets: Vec<PlannedAsset>,
}

/// Counts of what [`SitePlan::write`] produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub pages: usize,
    pub assets: usize,
    pub static_files: usize,
}

impl SitePlan {
    pub fn page(&self, path: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.path == path).map(|p| &p.page)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|p| p.path.as_str())
    }

    /// Render every page, then write pages, assets and static files under
    /// `out_dir`.
    pub fn write(
        &self,
        engine: &dyn TemplateEngine,
        out_dir: &Path,
    ) -> Result<WriteSummary, GenerateError> {
        let rendered = self
            .pages
            .iter()
            .map(|p| -> Result<(PathBuf, String), RenderError> {
                Ok((
                    paths::output_location(out_dir, &p.path),
                    engine.render_page(&p.page)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (file, html) in &rendered {
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, html)?;
            debug!(path = %file.display(), "wrote page");
        }

        for asset in &self.assets {
            let dir = paths::output_dir(out_dir, &asset.page_path);
            fs::create_dir_all(&dir)?;
            fs::copy(&asset.source, dir.join(&asset.file_name))?;
            debug!(source = %asset.source.display(), page = %asset.page_path, "copied asset");
        }

        let statics = engine.static_files();
        for file in &statics {
            let target = file
                .path
                .split('/')
                .fold(out_dir.to_path_buf(), |dir, part| dir.join(part));
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &file.contents)?;
        }

        Ok(WriteSummary {
            pages: rendered.len(),
            assets: self.assets.len(),
            static_files: statics.len(),
        })
    }
}

/// Plans the pages of one generation run.
pub struct SiteGenerator<'a> {
    project: &'a Project,
    engine: &'a dyn TemplateEngine,
    order: ArticleOrder,
    generated_at: Timestamp,
    entry_ids: HashMap<EntryKey, String>,
    topic_ids: BTreeMap<Topic, String>,
    headers: OnceCell<Vec<SiteLink>>,
}

impl<'a> SiteGenerator<'a> {
    pub fn new(project: &'a Project, engine: &'a dyn TemplateEngine, order: ArticleOrder) -> Self {
        let mut ids = IdAllocator::new();
        let entry_ids = order
            .sorted(project.articles())
            .into_iter()
            .flat_map(Entry::descendants)
            .map(|e| (e.key().clone(), ids.allocate(e.title())))
            .collect();
        let topics = project.all_topics();
        // Pages 2.. of the topic list live at /topics/{n}/.
        for page in 2..=topics.len().div_ceil(PAGE_SIZE) {
            ids.reserve(page.to_string());
        }
        let topic_ids = topics
            .into_iter()
            .map(|topic| {
                let id = ids.allocate(topic.name());
                (topic, id)
            })
            .collect();

        Self {
            project,
            engine,
            order,
            generated_at: dates::now(),
            entry_ids,
            topic_ids,
            headers: OnceCell::new(),
        }
    }

    /// Use a fixed generation time instead of the current clock.
    pub fn with_generated_at(mut self, generated_at: Timestamp) -> Self {
        self.generated_at = generated_at;
        self
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    pub fn sorted_articles(&self) -> Vec<&'a Entry> {
        self.order.sorted(self.project.articles())
    }

    /// Every entry, pre-order, starting from the sorted top-level articles.
    pub fn all_articles(&self) -> Vec<&'a Entry> {
        self.sorted_articles()
            .into_iter()
            .flat_map(Entry::descendants)
            .collect()
    }

    /// Every topic, sorted by name.
    pub fn all_topics(&self) -> Vec<&Topic> {
        self.topic_ids.keys().collect()
    }

    /// Entries whose rolled-up topics include `topic`, in [`Self::all_articles`] order.
    pub fn articles_by_topic(&self, topic: &Topic) -> Vec<&'a Entry> {
        self.all_articles()
            .into_iter()
            .filter(|e| self.project.topics(e.key()).contains(topic))
            .collect()
    }

    // =========================================================================
    // Addressing
    // =========================================================================

    pub fn entry_id(&self, entry: &Entry) -> Option<&str> {
        self.entry_ids.get(entry.key()).map(String::as_str)
    }

    pub fn topic_id(&self, topic: &Topic) -> Option<&str> {
        self.topic_ids.get(topic).map(String::as_str)
    }

    pub fn entry_path(&self, entry: &Entry) -> String {
        let ids: Vec<&str> = entry
            .key()
            .prefixes()
            .filter_map(|key| self.entry_ids.get(&key).map(String::as_str))
            .collect();
        paths::entry_path(&ids)
    }

    pub fn topic_path(&self, topic: &Topic) -> String {
        paths::topic_path(self.topic_id(topic).unwrap_or_default())
    }

    fn topic_link(&self, topic: &Topic) -> SiteLink {
        SiteLink::new(topic.name(), paths::url(&self.topic_path(topic)))
    }

    // =========================================================================
    // Shared page data
    // =========================================================================

    /// Navigation links: Home, Articles, and Topics when any topic exists.
    /// Computed once per run.
    pub fn headers(&self) -> &[SiteLink] {
        self.headers.get_or_init(|| {
            let mut headers = vec![
                SiteLink::new("Home", paths::url(paths::HOME)),
                SiteLink::new("Articles", paths::url(paths::ARTICLES)),
            ];
            if !self.topic_ids.is_empty() {
                headers.push(SiteLink::new("Topics", paths::url(paths::TOPICS)));
            }
            headers
        })
    }

    pub fn site_data(&self, path: &str) -> SiteData {
        SiteData {
            rel_path: paths::rel_path(path),
            title: self.project.title().to_string(),
            organization: self.project.organization().to_string(),
            headers: self.headers().to_vec(),
            generated_at: dates::readable(&self.generated_at),
        }
    }

    /// One link per entry from the top-level article down to `entry`, all
    /// marked current.
    pub fn breadcrumbs(&self, entry: &Entry) -> Vec<SiteLink> {
        self.project
            .ancestry(entry.key())
            .into_iter()
            .map(|e| SiteLink::new(e.title(), paths::url(&self.entry_path(e))).current(true))
            .collect()
    }

    /// Preview of `entry` as seen from a page at `rel_path`.
    pub fn preview(&self, entry: &Entry, rel_path: &str, prefix: Option<&str>) -> ArticlePreview {
        let mut text = String::new();
        let mut budget = PREVIEW_LENGTH;
        for item in entry.content() {
            if budget == 0 {
                break;
            }
            budget = item.preview(&mut text, budget);
        }
        ArticlePreview {
            prefix: prefix.map(str::to_string),
            title: entry.title().to_string(),
            published: dates::readable(&entry.published_date()),
            text,
            rel_path: rel_path.to_string(),
            url: paths::url(&self.entry_path(entry)),
        }
    }

    // =========================================================================
    // Pages
    // =========================================================================

    pub fn home_page(&self) -> PlannedPage {
        let path = paths::HOME.to_string();
        let rel = paths::rel_path(&path);
        let articles = self
            .sorted_articles()
            .into_iter()
            .take(HOME_ARTICLE_COUNT)
            .map(|a| self.preview(a, &rel, None))
            .collect();
        PlannedPage {
            page: Page {
                site: self.site_data(&path),
                kind: PageKind::Home { articles },
            },
            path,
        }
    }

    pub fn article_page(&self, entry: &Entry) -> Result<PlannedPage, RenderError> {
        let path = self.entry_path(entry);
        let rel = paths::rel_path(&path);

        let mut content = entry
            .content()
            .iter()
            .map(|item| self.engine.content_fragment(item))
            .collect::<Result<Vec<_>, _>>()?;
        for child in entry.children() {
            let preview = self.preview(child, &rel, Some(CHILD_PREVIEW_PREFIX));
            content.push(self.engine.preview_fragment(&preview)?);
        }

        let topics = self
            .project
            .topics(entry.key())
            .iter()
            .map(|t| self.topic_link(t))
            .collect();

        Ok(PlannedPage {
            page: Page {
                site: self.site_data(&path),
                kind: PageKind::Article {
                    title: entry.title().to_string(),
                    published: dates::readable(&entry.published_date()),
                    breadcrumbs: self.breadcrumbs(entry),
                    topics,
                    content,
                },
            },
            path,
        })
    }

    /// Paginated previews of `entries` under `base`, each page titled `title`.
    fn article_list(&self, base: &str, title: &str, entries: &[&Entry]) -> Vec<PlannedPage> {
        let pages = paginate::paginate(entries, PAGE_SIZE);
        let count = pages.len();
        pages
            .into_iter()
            .enumerate()
            .map(|(idx, chunk)| {
                let path = paths::paginated_path(base, idx);
                let rel = paths::rel_path(&path);
                let articles = chunk.iter().map(|e| self.preview(e, &rel, None)).collect();
                PlannedPage {
                    page: Page {
                        site: self.site_data(&path),
                        kind: PageKind::ArticleList {
                            title: title.to_string(),
                            articles,
                            pagination: self.page_links(base, idx, count),
                        },
                    },
                    path,
                }
            })
            .collect()
    }

    fn page_links(&self, base: &str, selected: usize, count: usize) -> Pagination {
        paginate::pagination(selected, count, |idx| {
            paths::url(&paths::paginated_path(base, idx))
        })
    }

    pub fn article_list_pages(&self) -> Vec<PlannedPage> {
        self.article_list(paths::ARTICLES, "Articles", &self.all_articles())
    }

    pub fn topic_list_pages(&self) -> Vec<PlannedPage> {
        let topics = self.all_topics();
        let pages = paginate::paginate(&topics, PAGE_SIZE);
        let count = pages.len();
        pages
            .into_iter()
            .enumerate()
            .map(|(idx, chunk)| {
                let path = paths::paginated_path(paths::TOPICS, idx);
                PlannedPage {
                    page: Page {
                        site: self.site_data(&path),
                        kind: PageKind::TopicList {
                            title: "Topics".to_string(),
                            topics: chunk.iter().map(|t| self.topic_link(t)).collect(),
                            pagination: self.page_links(paths::TOPICS, idx, count),
                        },
                    },
                    path,
                }
            })
            .collect()
    }

    pub fn topic_pages(&self, topic: &Topic) -> Vec<PlannedPage> {
        let base = self.topic_path(topic);
        let title = format!("Articles for: {topic}");
        self.article_list(&base, &title, &self.articles_by_topic(topic))
    }

    /// Media files of every entry, published beside the entry's page.
    pub fn assets(&self) -> Vec<PlannedAsset> {
        self.all_articles()
            .into_iter()
            .flat_map(|entry| {
                let page_path = self.entry_path(entry);
                entry
                    .content()
                    .iter()
                    .filter_map(ContentItem::media_file)
                    .map(move |media| PlannedAsset {
                        source: media.path().to_path_buf(),
                        page_path: page_path.clone(),
                        file_name: media.file_name(),
                    })
            })
            .collect()
    }

    /// Plan every page of the site.
    pub fn plan(&self) -> Result<SitePlan, RenderError> {
        let mut pages = vec![self.home_page()];
        for entry in self.all_articles() {
            pages.push(self.article_page(entry)?);
        }
        pages.extend(self.article_list_pages());
        pages.extend(self.topic_list_pages());
        for topic in self.all_topics() {
            pages.extend(self.topic_pages(topic));
        }
        let assets = self.assets();
        info!(pages = pages.len(), assets = assets.len(), "site planned");
        Ok(SitePlan { pages, assets })
    }
}

/// Plan and write a complete site in one call.
pub fn generate(
    project: &Project,
    engine: &dyn TemplateEngine,
    order: ArticleOrder,
    out_dir: &Path,
) -> Result<WriteSummary, GenerateError> {
    let plan = SiteGenerator::new(project, engine, order).plan()?;
    plan.write(engine, out_dir)
}

/// Remove everything inside `out_dir`, keeping the directory itself.
/// A missing directory is not an error.
pub fn clean_output_dir(out_dir: &Path) -> std::io::Result<()> {
    if !out_dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    debug!(path = %out_dir.display(), "cleaned output directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::ProjectAssembler;
    use crate::sort::ArticleSort;
    use crate::test_helpers::{StubEngine, at, project_meta, sample_project};
    use tempfile::TempDir;

    fn titles(previews: &[ArticlePreview]) -> Vec<&str> {
        previews.iter().map(|p| p.title.as_str()).collect()
    }

    fn link_titles(links: &[SiteLink]) -> Vec<&str> {
        links.iter().map(|l| l.title.as_str()).collect()
    }

    fn flat_project(titles: &[&str]) -> Project {
        let mut a = ProjectAssembler::new("content", at(0), at(0));
        a.found_metadata(&project_meta()).unwrap();
        for (i, title) in titles.iter().enumerate() {
            a.open_directory(format!("dir{i}"), at(i as i64), at(i as i64))
                .unwrap();
            a.found_metadata(&[("title", *title)].into_iter().collect())
                .unwrap();
            a.finish_directory().unwrap();
        }
        a.build_project().unwrap()
    }

    // =========================================================================
    // Identifiers and paths
    // =========================================================================

    #[test]
    fn numeric_topic_does_not_shadow_topic_list_page() {
        let mut a = ProjectAssembler::new("content", at(0), at(0));
        a.found_metadata(&project_meta()).unwrap();
        a.open_directory("Tagged", at(1), at(1)).unwrap();
        a.found_metadata(&[("topics", "2, a, b, c, d, e")].into_iter().collect())
            .unwrap();
        a.finish_directory().unwrap();
        let project = a.build_project().unwrap();

        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let two = Topic::new("2").unwrap();
        assert_eq!(site.topic_path(&two), "/topics/21/");

        let plan = site.plan().unwrap();
        let mut paths: Vec<&str> = plan.paths().collect();
        let total = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), total);
        assert_eq!(plan.page("/topics/2/").unwrap().kind.label(), "topic-list");
    }

    #[test]
    fn entry_paths_follow_ancestor_ids() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let day = project.entry(&EntryKey::from_indices(vec![0, 0, 0])).unwrap();
        assert_eq!(site.entry_path(day), "/p/travel/alps/day_1/");
        let hiking = Topic::new("hiking").unwrap();
        assert_eq!(site.topic_path(&hiking), "/topics/hiking/");
    }

    #[test]
    fn duplicate_titles_get_distinct_ids() {
        let project = flat_project(&["Same", "Same"]);
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let ids: Vec<&str> = project
            .articles()
            .iter()
            .filter_map(|e| site.entry_id(e))
            .collect();
        assert_eq!(ids, vec!["same", "same1"]);
    }

    #[test]
    fn each_run_allocates_from_scratch() {
        let project = flat_project(&["Same", "Same"]);
        let engine = StubEngine;
        let first = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let second = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        for entry in project.articles() {
            assert_eq!(first.entry_id(entry), second.entry_id(entry));
        }
    }

    // =========================================================================
    // Shared data
    // =========================================================================

    #[test]
    fn headers_include_topics_when_present() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        assert_eq!(link_titles(site.headers()), vec!["Home", "Articles", "Topics"]);
        assert!(std::ptr::eq(site.headers(), site.headers()));
    }

    #[test]
    fn headers_without_topics() {
        let project = flat_project(&["A"]);
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        assert_eq!(link_titles(site.headers()), vec!["Home", "Articles"]);
    }

    #[test]
    fn site_data_uses_fixed_clock() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default())
            .with_generated_at(at(0));
        let data = site.site_data("/p/x/");
        assert_eq!(data.rel_path, "../..");
        assert_eq!(data.title, "Test Site");
        assert_eq!(data.organization, "Test Org");
        assert_eq!(data.generated_at, dates::readable(&at(0)));
    }

    #[test]
    fn breadcrumbs_root_to_self_all_current() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let day = project.entry(&EntryKey::from_indices(vec![0, 0, 0])).unwrap();
        let crumbs = site.breadcrumbs(day);
        assert_eq!(link_titles(&crumbs), vec!["Travel", "Alps", "Day 1"]);
        assert!(crumbs.iter().all(|c| c.current));
        assert_eq!(crumbs[1].url.as_str(), "/p/travel/alps/index.html");
    }

    #[test]
    fn preview_text_and_link() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let travel = &project.articles()[0];
        let preview = site.preview(travel, "..", Some(CHILD_PREVIEW_PREFIX));
        assert_eq!(preview.text, "Trips I took.");
        assert_eq!(preview.prefix.as_deref(), Some("Read on: "));
        assert_eq!(preview.href(), "../p/travel/index.html");
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn home_lists_sorted_top_level_articles() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let home = site.home_page();
        assert_eq!(home.path, "/");
        let PageKind::Home { articles } = &home.page.kind else {
            panic!("expected home page");
        };
        assert_eq!(titles(articles), vec!["Cooking", "Travel"]);
    }

    #[test]
    fn home_is_capped_at_five() {
        let project = flat_project(&["a", "b", "c", "d", "e", "f", "g"]);
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let PageKind::Home { articles } = site.home_page().page.kind else {
            panic!("expected home page");
        };
        assert_eq!(titles(&articles), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn article_page_has_content_then_child_previews() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let travel = &project.articles()[0];
        let planned = site.article_page(travel).unwrap();
        assert_eq!(planned.path, "/p/travel/");
        let PageKind::Article {
            breadcrumbs,
            topics,
            content,
            ..
        } = &planned.page.kind
        else {
            panic!("expected article page");
        };
        assert_eq!(link_titles(breadcrumbs), vec!["Travel"]);
        assert_eq!(link_titles(topics), vec!["hiking", "photos"]);
        assert_eq!(content.len(), 2);
        assert_eq!(content[0].html, "<text>");
        assert_eq!(content[1].title.as_deref(), Some("Alps"));
        assert_eq!(content[1].html, "Read on: Alps");
    }

    #[test]
    fn article_list_is_pre_order_from_sorted_roots() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let pages = site.article_list_pages();
        assert_eq!(pages.len(), 1);
        let PageKind::ArticleList {
            title,
            articles,
            pagination,
        } = &pages[0].page.kind
        else {
            panic!("expected article list");
        };
        assert_eq!(title, "Articles");
        assert_eq!(titles(articles), vec!["Cooking", "Travel", "Alps", "Day 1"]);
        assert!(!pagination.has_pagination());
    }

    #[test]
    fn article_list_paginates_by_five() {
        let names: Vec<String> = (0..12).map(|i| format!("a{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let project = flat_project(&refs);
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let pages = site.article_list_pages();
        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/articles/", "/articles/2/", "/articles/3/"]);
        let PageKind::ArticleList {
            articles,
            pagination,
            ..
        } = &pages[2].page.kind
        else {
            panic!("expected article list");
        };
        assert_eq!(articles.len(), 2);
        assert!(pagination.has_pagination());
        assert!(pagination.groups[0][2].current);
        assert_eq!(pages[1].page.site.rel_path, "../..");
    }

    #[test]
    fn topic_page_includes_ancestors_of_tagged_entries() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let photos = Topic::new("photos").unwrap();
        let pages = site.topic_pages(&photos);
        assert_eq!(pages[0].path, "/topics/photos/");
        let PageKind::ArticleList { title, articles, .. } = &pages[0].page.kind else {
            panic!("expected article list");
        };
        assert_eq!(title, "Articles for: photos");
        assert_eq!(titles(articles), vec!["Travel", "Alps", "Day 1"]);
    }

    #[test]
    fn topic_list_links_every_topic() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::default());
        let pages = site.topic_list_pages();
        assert_eq!(pages.len(), 1);
        let PageKind::TopicList { title, topics, .. } = &pages[0].page.kind else {
            panic!("expected topic list");
        };
        assert_eq!(title, "Topics");
        assert_eq!(link_titles(topics), vec!["food", "hiking", "photos"]);
        assert_eq!(topics[0].url.as_str(), "/topics/food/index.html");
    }

    #[test]
    fn plan_covers_every_page_kind() {
        let project = sample_project();
        let engine = StubEngine;
        let site = SiteGenerator::new(&project, &engine, ArticleOrder::new(ArticleSort::Title));
        let plan = site.plan().unwrap();
        let paths: Vec<&str> = plan.paths().collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/p/cooking/",
                "/p/travel/",
                "/p/travel/alps/",
                "/p/travel/alps/day_1/",
                "/articles/",
                "/topics/",
                "/topics/food/",
                "/topics/hiking/",
                "/topics/photos/",
            ]
        );
        assert_eq!(plan.assets.len(), 1);
        assert_eq!(plan.assets[0].page_path, "/p/travel/alps/day_1/");
        assert_eq!(plan.assets[0].file_name, "day1.jpg");
        assert!(plan.page("/topics/").is_some());
    }

    #[test]
    fn empty_project_still_has_listings() {
        let project = flat_project(&[]);
        let engine = StubEngine;
        let plan = SiteGenerator::new(&project, &engine, ArticleOrder::default())
            .plan()
            .unwrap();
        let paths: Vec<&str> = plan.paths().collect();
        assert_eq!(paths, vec!["/", "/articles/", "/topics/"]);
    }

    // =========================================================================
    // Writing
    // =========================================================================

    #[test]
    fn write_creates_index_files() {
        let project = flat_project(&["One"]);
        let engine = StubEngine;
        let plan = SiteGenerator::new(&project, &engine, ArticleOrder::default())
            .plan()
            .unwrap();
        let tmp = TempDir::new().unwrap();
        let summary = plan.write(&engine, tmp.path()).unwrap();
        assert_eq!(summary.pages, 4);
        assert!(tmp.path().join("index.html").exists());
        assert!(tmp.path().join("p/one/index.html").exists());
        assert!(tmp.path().join("articles/index.html").exists());
        let home = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert_eq!(home, "home .");
    }

    #[test]
    fn render_failure_writes_nothing() {
        let project = flat_project(&["One"]);
        let engine = StubEngine;
        let plan = SiteGenerator::new(&project, &engine, ArticleOrder::default())
            .plan()
            .unwrap();
        let tmp = TempDir::new().unwrap();
        let failing = crate::test_helpers::FailingEngine;
        assert!(matches!(
            plan.write(&failing, tmp.path()),
            Err(GenerateError::Render(_))
        ));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn clean_removes_previous_output() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("p/old")).unwrap();
        fs::write(tmp.path().join("p/old/index.html"), "stale").unwrap();
        fs::write(tmp.path().join("stray.txt"), "stale").unwrap();

        clean_output_dir(tmp.path()).unwrap();
        assert!(tmp.path().exists());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);

        clean_output_dir(&tmp.path().join("missing")).unwrap();
    }
}
