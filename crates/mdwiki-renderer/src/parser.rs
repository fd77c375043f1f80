//! Markdown parsing into a [`Document`] tree.
//!
//! `pulldown-cmark` produces a flat event stream; [`parse`] folds it into
//! nested nodes with a frame stack. Reference-style links are kept as
//! [`Node::RefLink`] (including links whose definition is missing) so the
//! renderer performs its own resolution against the definitions appended to
//! the root.

use pulldown_cmark::{BrokenLink, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag};

use crate::ast::{Document, HtmlKind, LinkKind, ListKind, Node, Reference};
use crate::error::ParseError;
use crate::util::heading_level_to_num;

/// Default maximum nesting of blocks and inlines.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Markdown parsing options.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Treat every newline inside a paragraph as a line break.
    pub hard_wraps: bool,
    /// Reject documents nesting deeper than this.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            hard_wraps: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    fn extensions() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_WIKILINKS
    }
}

/// Parse Markdown text into a document tree.
///
/// # Errors
///
/// Returns [`ParseError::TooDeep`] if the document nests deeper than
/// `options.max_depth`.
pub fn parse(markdown: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let mut parser = Parser::new_with_broken_link_callback(
        markdown,
        ParseOptions::extensions(),
        Some(unresolved_reference),
    );

    let mut references = Vec::new();
    for (label, def) in parser.reference_definitions().iter() {
        let reference = Reference {
            label: inline_nodes(label, options)?,
            url: def.dest.to_string(),
            title: def.title.as_ref().map(ToString::to_string),
        };
        references.push((def.span.start, reference));
    }
    references.sort_by_key(|(start, _)| *start);

    let mut builder = TreeBuilder::new(options);
    for event in parser.by_ref() {
        builder.event(event)?;
    }

    let mut children = builder.finish();
    children.extend(references.into_iter().map(|(_, r)| Node::Reference(r)));
    Ok(Document::new(children))
}

/// Parse a reference label or key as inline Markdown.
///
/// Labels are rendered through the same inline rules as link text, so
/// `[**Jenkins**]` and its definition normalize to the same key. Text that
/// does not form a single paragraph is kept literally.
fn inline_nodes(text: &str, options: &ParseOptions) -> Result<Vec<Node>, ParseError> {
    let mut builder = TreeBuilder::new(options);
    for event in Parser::new_ext(text, ParseOptions::extensions()) {
        builder.event(event)?;
    }

    let mut nodes = builder.finish();
    if let [Node::Paragraph { .. }] = nodes.as_slice()
        && let Some(Node::Paragraph { children }) = nodes.pop()
    {
        return Ok(children);
    }
    Ok(vec![Node::text(text)])
}

/// Keep links to undefined references as links with an empty target.
///
/// Without this the parser would flatten `[text][missing]` into plain text
/// and the renderer could not apply its own fallback.
fn unresolved_reference<'a>(_link: BrokenLink<'a>) -> Option<(CowStr<'a>, CowStr<'a>)> {
    Some((CowStr::Borrowed(""), CowStr::Borrowed("")))
}

/// Node under construction.
enum Open {
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock(Option<String>),
    HtmlBlock,
    List(ListKind),
    Item,
    Emphasis,
    Strong,
    Strike,
    Link {
        kind: LinkKind,
        url: String,
        title: Option<String>,
    },
    RefLink {
        key: Option<Vec<Node>>,
        separator: Option<String>,
    },
    Image {
        url: String,
        title: Option<String>,
    },
    RefImage {
        key: Option<Vec<Node>>,
        separator: Option<String>,
    },
    Table,
    TableHead,
    TableRow,
    TableCell,
    DefinitionList,
    DefinitionTerm,
    Definition,
    Container,
    /// Content without a tree representation (footnotes, metadata).
    Dropped,
}

struct Frame {
    open: Open,
    children: Vec<Node>,
}

struct TreeBuilder {
    stack: Vec<Frame>,
    root: Vec<Node>,
    options: ParseOptions,
}

impl TreeBuilder {
    fn new(options: &ParseOptions) -> Self {
        Self {
            stack: Vec::new(),
            root: Vec::new(),
            options: options.clone(),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), ParseError> {
        match event {
            Event::Start(tag) => self.start(tag)?,
            Event::End(_) => self.end(),
            Event::Text(text) => self.push(Node::text(text.into_string())),
            Event::Code(code) => self.push(Node::Code {
                text: code.into_string(),
            }),
            Event::Html(html) => self.push(Node::Html {
                kind: HtmlKind::Block,
                html: html.into_string(),
            }),
            Event::InlineHtml(html) => self.push(Node::Html {
                kind: HtmlKind::Inline,
                html: html.into_string(),
            }),
            Event::SoftBreak => {
                if self.options.hard_wraps {
                    self.push(Node::LineBreak);
                } else {
                    self.push(Node::text(" "));
                }
            }
            Event::HardBreak => self.push(Node::LineBreak),
            Event::Rule => self.push(Node::HorizontalRule),
            Event::FootnoteReference(_)
            | Event::TaskListMarker(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not supported
            }
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), ParseError> {
        let limit = self.options.max_depth;
        if self.stack.len() >= limit {
            return Err(ParseError::TooDeep { limit });
        }

        let open = match tag {
            Tag::Paragraph => Open::Paragraph,
            Tag::Heading { level, .. } => Open::Heading(heading_level_to_num(level)),
            Tag::BlockQuote(_) => Open::BlockQuote,
            Tag::CodeBlock(kind) => Open::CodeBlock(match kind {
                CodeBlockKind::Fenced(info) => {
                    info.split_whitespace().next().map(ToOwned::to_owned)
                }
                CodeBlockKind::Indented => None,
            }),
            Tag::HtmlBlock => Open::HtmlBlock,
            Tag::List(start) => Open::List(if start.is_some() {
                ListKind::Ordered
            } else {
                ListKind::Bulleted
            }),
            Tag::Item => Open::Item,
            Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => Open::Dropped,
            Tag::DefinitionList => Open::DefinitionList,
            Tag::DefinitionListTitle => Open::DefinitionTerm,
            Tag::DefinitionListDefinition => Open::Definition,
            Tag::Table(_) => Open::Table,
            Tag::TableHead => Open::TableHead,
            Tag::TableRow => Open::TableRow,
            Tag::TableCell => Open::TableCell,
            Tag::Emphasis => Open::Emphasis,
            Tag::Strong => Open::Strong,
            Tag::Strikethrough => Open::Strike,
            Tag::Superscript | Tag::Subscript => Open::Container,
            Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            } => {
                let title = non_empty(title);
                let url = dest_url.into_string();
                match link_type {
                    LinkType::Inline => Open::Link {
                        kind: LinkKind::Explicit,
                        url,
                        title,
                    },
                    LinkType::Autolink => Open::Link {
                        kind: LinkKind::Automatic,
                        url,
                        title,
                    },
                    LinkType::Email => Open::Link {
                        kind: LinkKind::Mail,
                        url,
                        title,
                    },
                    LinkType::WikiLink { .. } => Open::Link {
                        kind: LinkKind::Wiki,
                        url,
                        title,
                    },
                    LinkType::Reference | LinkType::ReferenceUnknown => Open::RefLink {
                        key: Some(inline_nodes(&id, &self.options)?),
                        separator: Some(String::new()),
                    },
                    LinkType::Collapsed | LinkType::CollapsedUnknown => Open::RefLink {
                        key: None,
                        separator: Some(String::new()),
                    },
                    LinkType::Shortcut | LinkType::ShortcutUnknown => Open::RefLink {
                        key: None,
                        separator: None,
                    },
                }
            }
            Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            } => match link_type {
                LinkType::Reference | LinkType::ReferenceUnknown => Open::RefImage {
                    key: Some(inline_nodes(&id, &self.options)?),
                    separator: Some(String::new()),
                },
                LinkType::Collapsed | LinkType::CollapsedUnknown => Open::RefImage {
                    key: None,
                    separator: Some(String::new()),
                },
                LinkType::Shortcut | LinkType::ShortcutUnknown => Open::RefImage {
                    key: None,
                    separator: None,
                },
                LinkType::Inline
                | LinkType::Autolink
                | LinkType::Email
                | LinkType::WikiLink { .. } => Open::Image {
                    url: dest_url.into_string(),
                    title: non_empty(title),
                },
            },
        };

        self.stack.push(Frame {
            open,
            children: Vec::new(),
        });
        Ok(())
    }

    fn end(&mut self) {
        let Some(Frame { open, children }) = self.stack.pop() else {
            return;
        };

        let node = match open {
            Open::Paragraph => Node::Paragraph { children },
            Open::Heading(level) => Node::Heading { level, children },
            Open::BlockQuote => Node::BlockQuote { children },
            Open::CodeBlock(tag) => Node::Verbatim {
                tag,
                text: concat_text(&children),
            },
            Open::HtmlBlock => Node::Html {
                kind: HtmlKind::Block,
                html: children
                    .iter()
                    .filter_map(|child| match child {
                        Node::Html { html, .. } => Some(html.as_str()),
                        _ => None,
                    })
                    .collect(),
            },
            Open::List(kind) => Node::List { kind, children },
            Open::Item => Node::ListItem { children },
            Open::Emphasis => Node::emphasis(false, children),
            Open::Strong => Node::emphasis(true, children),
            Open::Strike => Node::Strike { children },
            Open::Link { kind, url, title } => Node::Link {
                kind,
                url,
                title,
                children,
            },
            Open::RefLink { key, separator } => Node::RefLink {
                key,
                separator,
                children,
            },
            Open::Image { url, title } => Node::Image {
                url,
                title,
                alt: children,
            },
            Open::RefImage { key, separator } => Node::RefImage {
                key,
                separator,
                alt: children,
            },
            Open::Table => Node::Table { children },
            Open::TableHead => Node::TableHeader { children },
            Open::TableRow => Node::TableRow { children },
            Open::TableCell => Node::TableCell { children },
            Open::DefinitionList => Node::DefinitionList { children },
            Open::DefinitionTerm => Node::DefinitionTerm { children },
            Open::Definition => Node::Definition { children },
            Open::Container => Node::Container { children },
            Open::Dropped => return,
        };
        self.push(node);
    }

    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        // The event stream is balanced; this only matters for a truncated one.
        while !self.stack.is_empty() {
            self.end();
        }
        self.root
    }
}

fn non_empty(value: CowStr<'_>) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.into_string())
    }
}

fn concat_text(children: &[Node]) -> String {
    children
        .iter()
        .filter_map(|child| match child {
            Node::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
