//! Markdown and plain-text documents into the structured text model.
//!
//! Markdown is parsed with pulldown-cmark and folded into [`Paragraph`] /
//! [`Inline`] values. A leading YAML block delimited by `---` lines is read
//! as the document's metadata:
//!
//! ```markdown
//! ---
//! title: Spring Trip
//! topics: [hiking, alps]
//! ---
//! # Day one
//!
//! We left *early*.
//! ```
//!
//! Raw HTML, tables and footnotes have no place in the model and are dropped.

use crate::content::{Inline, Paragraph};
use crate::metadata::{self, Metadata};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Parse a Markdown document into its front matter and body.
pub fn parse_document(text: &str) -> Result<(Metadata, Vec<Paragraph>), serde_yaml::Error> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut builder = DocumentBuilder::default();
    for event in Parser::new_ext(text, options) {
        builder.event(event);
    }
    let (front_matter, paragraphs) = builder.finish();
    let metadata = match front_matter {
        Some(yaml) => metadata::parse_yaml(&yaml)?,
        None => Metadata::new(),
    };
    Ok((metadata, paragraphs))
}

/// Split plain text into paragraphs at blank lines. Lines inside a
/// paragraph are joined with single spaces.
pub fn parse_plain_text(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().chain(std::iter::once("")) {
        let line = line.trim();
        if line.is_empty() {
            if !lines.is_empty() {
                paragraphs.push(Paragraph::Text {
                    text: vec![Inline::plain(lines.join(" "))],
                });
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    paragraphs
}

enum Block {
    Document(Vec<Paragraph>),
    Quote(Vec<Paragraph>),
    List {
        ordered: bool,
        items: Vec<Vec<Paragraph>>,
    },
    Item(Vec<Paragraph>),
}

enum Target {
    Heading(u8),
    Text,
}

enum Frame {
    Root,
    Emphasis,
    Strong,
    Link(String),
    Image(String),
}

struct InlineRun {
    target: Target,
    frames: Vec<(Frame, Vec<Inline>)>,
}

impl InlineRun {
    fn new(target: Target) -> Self {
        Self {
            target,
            frames: vec![(Frame::Root, Vec::new())],
        }
    }

    fn push(&mut self, inline: Inline) {
        let Some((_, children)) = self.frames.last_mut() else {
            return;
        };
        if let (Inline::Plain { text: new }, Some(Inline::Plain { text })) =
            (&inline, children.last_mut())
        {
            text.push_str(new);
            return;
        }
        children.push(inline);
    }

    fn open(&mut self, frame: Frame) {
        self.frames.push((frame, Vec::new()));
    }

    fn close(&mut self) {
        if self.frames.len() <= 1 {
            return;
        }
        if let Some((frame, children)) = self.frames.pop() {
            let inline = match frame {
                Frame::Emphasis => Inline::Emphasis { children },
                Frame::Strong => Inline::Strong { children },
                Frame::Link(destination) => Inline::Link {
                    destination,
                    children,
                },
                Frame::Image(destination) => Inline::Image {
                    destination,
                    alt: children,
                },
                Frame::Root => return,
            };
            self.push(inline);
        }
    }

    fn finish(mut self) -> Option<Paragraph> {
        while self.frames.len() > 1 {
            self.close();
        }
        let text = self.frames.pop().map(|(_, c)| c).unwrap_or_default();
        match self.target {
            Target::Heading(level) => Some(Paragraph::Heading { level, text }),
            Target::Text if text.is_empty() => None,
            Target::Text => Some(Paragraph::Text { text }),
        }
    }
}

struct DocumentBuilder {
    blocks: Vec<Block>,
    inline: Option<InlineRun>,
    code: Option<(String, String)>,
    front_matter: Option<String>,
    in_front_matter: bool,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            blocks: vec![Block::Document(Vec::new())],
            inline: None,
            code: None,
            front_matter: None,
            in_front_matter: false,
        }
    }
}

impl DocumentBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_front_matter {
                    self.front_matter.get_or_insert_with(String::new).push_str(&text);
                } else if let Some((_, literal)) = self.code.as_mut() {
                    literal.push_str(&text);
                } else {
                    self.push_inline(Inline::plain(text.to_string()));
                }
            }
            Event::Code(code) => self.push_inline(Inline::Code {
                text: code.to_string(),
            }),
            Event::SoftBreak | Event::HardBreak => self.push_inline(Inline::plain(" ")),
            Event::Rule => {
                self.finish_inline();
                self.push_paragraph(Paragraph::Rule);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.finish_inline();
                self.inline = Some(InlineRun::new(Target::Text));
            }
            Tag::Heading { level, .. } => {
                self.finish_inline();
                self.inline = Some(InlineRun::new(Target::Heading(level as u8)));
            }
            Tag::BlockQuote(_) => {
                self.finish_inline();
                self.blocks.push(Block::Quote(Vec::new()));
            }
            Tag::List(start) => {
                self.finish_inline();
                self.blocks.push(Block::List {
                    ordered: start.is_some(),
                    items: Vec::new(),
                });
            }
            Tag::Item => {
                self.finish_inline();
                self.blocks.push(Block::Item(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.finish_inline();
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some((info, String::new()));
            }
            Tag::Emphasis => self.open_inline(Frame::Emphasis),
            Tag::Strong => self.open_inline(Frame::Strong),
            Tag::Link { dest_url, .. } => self.open_inline(Frame::Link(dest_url.to_string())),
            Tag::Image { dest_url, .. } => self.open_inline(Frame::Image(dest_url.to_string())),
            Tag::MetadataBlock(_) => self.in_front_matter = true,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => self.finish_inline(),
            TagEnd::BlockQuote(_) => {
                self.finish_inline();
                if let Some(Block::Quote(children)) = self.pop_block() {
                    self.push_paragraph(Paragraph::Quote { children });
                }
            }
            TagEnd::List(_) => {
                self.finish_inline();
                if let Some(Block::List { ordered, items }) = self.pop_block() {
                    self.push_paragraph(Paragraph::List { ordered, items });
                }
            }
            TagEnd::Item => {
                self.finish_inline();
                if let Some(Block::Item(children)) = self.pop_block() {
                    if let Some(Block::List { items, .. }) = self.blocks.last_mut() {
                        items.push(children);
                    }
                }
            }
            TagEnd::CodeBlock => {
                if let Some((info, mut literal)) = self.code.take() {
                    if literal.ends_with('\n') {
                        literal.pop();
                    }
                    self.push_paragraph(Paragraph::Code { literal, info });
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link | TagEnd::Image => {
                if let Some(run) = self.inline.as_mut() {
                    run.close();
                }
            }
            TagEnd::MetadataBlock(_) => self.in_front_matter = false,
            _ => {}
        }
    }

    fn pop_block(&mut self) -> Option<Block> {
        if self.blocks.len() <= 1 {
            return None;
        }
        self.blocks.pop()
    }

    // Tight list items carry text without a paragraph tag, so inline content
    // arriving outside a run opens one.
    fn push_inline(&mut self, inline: Inline) {
        self.inline
            .get_or_insert_with(|| InlineRun::new(Target::Text))
            .push(inline);
    }

    fn open_inline(&mut self, frame: Frame) {
        self.inline
            .get_or_insert_with(|| InlineRun::new(Target::Text))
            .open(frame);
    }

    fn finish_inline(&mut self) {
        if let Some(paragraph) = self.inline.take().and_then(InlineRun::finish) {
            self.push_paragraph(paragraph);
        }
    }

    fn push_paragraph(&mut self, paragraph: Paragraph) {
        match self.blocks.last_mut() {
            Some(Block::Document(children) | Block::Quote(children) | Block::Item(children)) => {
                children.push(paragraph)
            }
            Some(Block::List { items, .. }) => items.push(vec![paragraph]),
            None => {}
        }
    }

    fn finish(mut self) -> (Option<String>, Vec<Paragraph>) {
        self.finish_inline();
        while self.blocks.len() > 1 {
            match self.blocks.pop() {
                Some(Block::Quote(children)) => self.push_paragraph(Paragraph::Quote { children }),
                Some(Block::List { ordered, items }) => {
                    self.push_paragraph(Paragraph::List { ordered, items })
                }
                Some(Block::Item(children)) => {
                    if let Some(Block::List { items, .. }) = self.blocks.last_mut() {
                        items.push(children);
                    }
                }
                Some(Block::Document(_)) | None => {}
            }
        }
        let paragraphs = match self.blocks.pop() {
            Some(Block::Document(children)) => children,
            _ => Vec::new(),
        };
        (self.front_matter, paragraphs)
    }
}
