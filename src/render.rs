//! HTML rendering.
//!
//! [`HtmlEngine`] is the stock [`TemplateEngine`]: it turns page descriptions
//! into HTML documents and content items into fragments embedded in article
//! pages.
//!
//! ## Page Layout
//!
//! ```text
//! header.site-header   site title + nav links (Home, Articles, Topics)
//! main.{kind}-page     page-specific body
//! footer.site-footer   organization + generation time
//! ```
//!
//! ## Links
//!
//! Every link is relative: a page's `rel_path` is prefixed to site-absolute
//! URLs, so the output directory can be opened straight from disk. Media
//! files sit next to the page that embeds them and are referenced by bare
//! file name.
//!
//! ## Stylesheet
//!
//! `css/main.css` is emitted as a static file: CSS custom properties generated
//! from the configured colors, followed by `static/style.css` (embedded at
//! compile time).
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, ColorConfig};
use crate::content::{ContentItem, Inline, MediaFile, Paragraph, TextDocument, YoutubeEmbed};
use crate::site::{RenderError, StaticFile, TemplateEngine};
use crate::types::{ArticlePreview, ContentFragment, Page, PageKind, Pagination, SiteData, SiteLink};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Output path of the generated stylesheet.
pub const STYLESHEET: &str = "css/main.css";

/// Template engine producing plain, script-free HTML.
#[derive(Debug, Clone)]
pub struct HtmlEngine {
    css: String,
}

impl HtmlEngine {
    pub fn new(colors: &ColorConfig) -> Self {
        let color_css = config::generate_color_css(colors);
        Self {
            css: format!("{color_css}\n\n{CSS_STATIC}"),
        }
    }
}

impl Default for HtmlEngine {
    fn default() -> Self {
        Self::new(&ColorConfig::default())
    }
}

impl TemplateEngine for HtmlEngine {
    fn content_fragment(&self, item: &ContentItem) -> Result<ContentFragment, RenderError> {
        let markup = match item {
            ContentItem::Text(doc) => render_document(doc),
            ContentItem::Image(media) => render_image(media),
            ContentItem::Video(media) => render_video(media),
            ContentItem::Youtube(embed) => render_youtube(embed)?,
        };
        Ok(ContentFragment {
            title: item.title().map(str::to_string),
            html: markup.into_string(),
        })
    }

    fn preview_fragment(&self, preview: &ArticlePreview) -> Result<ContentFragment, RenderError> {
        Ok(ContentFragment {
            title: Some(preview.title.clone()),
            html: render_preview(preview).into_string(),
        })
    }

    fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let site = &page.site;
        let (title, body) = match &page.kind {
            PageKind::Home { articles } => (site.title.as_str(), render_home(articles)),
            PageKind::Article {
                title,
                published,
                breadcrumbs,
                topics,
                content,
            } => (
                title.as_str(),
                render_article(site, title, published, breadcrumbs, topics, content),
            ),
            PageKind::ArticleList {
                title,
                articles,
                pagination,
            } => (
                title.as_str(),
                render_article_list(site, title, articles, pagination),
            ),
            PageKind::TopicList {
                title,
                topics,
                pagination,
            } => (
                title.as_str(),
                render_topic_list(site, title, topics, pagination),
            ),
        };

        let content = html! {
            (site_header(site))
            main class={ (page.kind.label()) "-page" } {
                (body)
            }
            (site_footer(site))
        };
        Ok(base_document(title, site, page.kind.label(), content).into_string())
    }

    fn static_files(&self) -> Vec<StaticFile> {
        vec![StaticFile {
            path: STYLESHEET.to_string(),
            contents: self.css.clone(),
        }]
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, site: &SiteData, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title {
                    (title)
                    @if title != site.title { " | " (site.title) }
                }
                link rel="stylesheet" href={ (site.rel_path) "/" (STYLESHEET) };
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Renders the site header with the site title and navigation
fn site_header(site: &SiteData) -> Markup {
    html! {
        header.site-header {
            a.site-title href={ (site.rel_path) "/index.html" } { (site.title) }
            nav.site-nav {
                ul {
                    @for link in &site.headers {
                        li class=[link.current.then_some("current")] {
                            a href=(link.url.href(&site.rel_path)) { (link.title) }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(site: &SiteData) -> Markup {
    html! {
        footer.site-footer {
            span.organization { (site.organization) }
            " · "
            span.generated { "Generated " (site.generated_at) }
        }
    }
}

/// Renders a group of links, the current one as plain text
fn link_list(links: &[SiteLink], rel_path: &str) -> Markup {
    html! {
        @for link in links {
            li class=[link.current.then_some("current")] {
                @if link.current {
                    span { (link.title) }
                } @else {
                    a href=(link.url.href(rel_path)) { (link.title) }
                }
            }
        }
    }
}

fn render_pagination(pagination: &Pagination, rel_path: &str) -> Markup {
    html! {
        @if pagination.has_pagination() {
            nav.pagination {
                ul {
                    @for (i, group) in pagination.groups.iter().enumerate() {
                        @if i > 0 {
                            li.gap { "…" }
                        }
                        (link_list(group, rel_path))
                    }
                }
            }
        }
    }
}

fn render_preview(preview: &ArticlePreview) -> Markup {
    html! {
        article.preview {
            h2 {
                @if let Some(prefix) = &preview.prefix {
                    span.prefix { (prefix) }
                }
                a href=(preview.href()) { (preview.title) }
            }
            p.published { (preview.published) }
            @if !preview.text.is_empty() {
                p.summary { (preview.text) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(articles: &[ArticlePreview]) -> Markup {
    html! {
        @for preview in articles {
            (render_preview(preview))
        }
    }
}

fn render_article(
    site: &SiteData,
    title: &str,
    published: &str,
    breadcrumbs: &[SiteLink],
    topics: &[SiteLink],
    content: &[ContentFragment],
) -> Markup {
    html! {
        nav.breadcrumb {
            ol {
                @for link in breadcrumbs {
                    li { a href=(link.url.href(&site.rel_path)) { (link.title) } }
                }
            }
        }
        h1 { (title) }
        p.published { (published) }
        @if !topics.is_empty() {
            ul.topics {
                (link_list(topics, &site.rel_path))
            }
        }
        @for fragment in content {
            section.content {
                (PreEscaped(&fragment.html))
            }
        }
    }
}

fn render_article_list(
    site: &SiteData,
    title: &str,
    articles: &[ArticlePreview],
    pagination: &Pagination,
) -> Markup {
    html! {
        h1 { (title) }
        @for preview in articles {
            (render_preview(preview))
        }
        (render_pagination(pagination, &site.rel_path))
    }
}

fn render_topic_list(
    site: &SiteData,
    title: &str,
    topics: &[SiteLink],
    pagination: &Pagination,
) -> Markup {
    html! {
        h1 { (title) }
        ul.topic-list {
            (link_list(topics, &site.rel_path))
        }
        (render_pagination(pagination, &site.rel_path))
    }
}

// ============================================================================
// Content Renderers
// ============================================================================

fn render_document(doc: &TextDocument) -> Markup {
    html! {
        div.document {
            @for paragraph in &doc.paragraphs {
                (render_paragraph(paragraph))
            }
        }
    }
}

fn render_paragraph(paragraph: &Paragraph) -> Markup {
    match paragraph {
        Paragraph::Heading { level, text } => render_heading(*level, text),
        Paragraph::Text { text } => html! { p { (render_inlines(text)) } },
        Paragraph::List { ordered, items } => {
            let items = html! {
                @for item in items {
                    li {
                        @for child in item {
                            (render_paragraph(child))
                        }
                    }
                }
            };
            if *ordered {
                html! { ol { (items) } }
            } else {
                html! { ul { (items) } }
            }
        }
        Paragraph::Quote { children } => html! {
            blockquote {
                @for child in children {
                    (render_paragraph(child))
                }
            }
        },
        Paragraph::Code { literal, info } => {
            let language = info
                .split_whitespace()
                .next()
                .map(|lang| format!("language-{lang}"));
            html! { pre { code class=[language] { (literal) } } }
        }
        Paragraph::Rule => html! { hr; },
    }
}

fn render_heading(level: u8, text: &[Inline]) -> Markup {
    let inner = render_inlines(text);
    match level {
        1 => html! { h1 { (inner) } },
        2 => html! { h2 { (inner) } },
        3 => html! { h3 { (inner) } },
        4 => html! { h4 { (inner) } },
        5 => html! { h5 { (inner) } },
        _ => html! { h6 { (inner) } },
    }
}

fn render_inlines(inlines: &[Inline]) -> Markup {
    html! {
        @for inline in inlines {
            @match inline {
                Inline::Plain { text } => (text),
                Inline::Code { text } => code { (text) },
                Inline::Emphasis { children } => em { (render_inlines(children)) },
                Inline::Strong { children } => strong { (render_inlines(children)) },
                Inline::Link { destination, children } => {
                    a href=(destination) { (render_inlines(children)) }
                },
                Inline::Image { destination, alt } => {
                    img src=(destination) alt=(crate::content::plain_text(alt));
                },
            }
        }
    }
}

fn render_image(media: &MediaFile) -> Markup {
    let name = media.file_name();
    html! {
        figure.image {
            img src=(name) alt=(name) loading="lazy";
        }
    }
}

fn render_video(media: &MediaFile) -> Markup {
    let name = media.file_name();
    html! {
        figure.video {
            video src=(name) controls preload="metadata" {
                a href=(name) { (name) }
            }
        }
    }
}

fn render_youtube(embed: &YoutubeEmbed) -> Result<Markup, RenderError> {
    if !is_valid_video_id(&embed.video_id) {
        return Err(RenderError::InvalidVideoId(embed.video_id.clone()));
    }
    let title = embed.title.as_deref().unwrap_or("YouTube video");
    Ok(html! {
        figure.youtube {
            iframe
                src={ "https://www.youtube-nocookie.com/embed/" (embed.video_id) }
                title=(title)
                loading="lazy"
                allowfullscreen {}
        }
    })
}

/// YouTube ids are URL-safe base64: letters, digits, `-` and `_`.
fn is_valid_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ============================================================================
// Tests
// ============================================================================
