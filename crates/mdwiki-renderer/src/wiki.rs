//! Confluence wiki markup renderer.
//!
//! Walks a [`Document`] and emits wiki markup:
//!
//! | Markdown | Wiki markup |
//! |----------|-------------|
//! | `## Title` | `h2. Title` |
//! | `*em*` / `**strong**` / `~~strike~~` | `_em_` / `*strong*` / `-strike-` |
//! | `[text](url)` | `[text\|url]` |
//! | `![alt](src "title")` | `!src\|alt=title!` |
//! | nested `-` / `1.` lists | `**` / `##` markers per depth |
//! | `> quote` | `bq. quote` |
//! | fenced code | `{code}` or `{code:lang}` |
//! | `---` | `----` |
//!
//! Tables, definition lists and raw HTML are dropped. Malformed input never
//! fails a conversion: unclosed emphasis, dangling references and
//! unparsable targets each have a literal fallback rendering.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

use url::Url;

use crate::ast::{Document, LinkKind, Node, Reference};
use crate::error::RenderError;
use crate::link::{DefaultLinkRenderer, LinkRenderer, Rendering};
use crate::state::{ListStack, ReferenceTable};
use crate::util::escape_wiki;
use crate::verbatim::SerializerRegistry;

/// Result of rendering a document.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered wiki markup, trimmed.
    pub markup: String,
    /// Abbreviations defined in the document, label to expansion.
    ///
    /// Collected for callers; expansions are not substituted into the text.
    pub abbreviations: HashMap<String, String>,
}

/// Renders a document tree to Confluence wiki markup.
///
/// A renderer performs exactly one conversion: [`render`](Self::render)
/// consumes it, so per-document state never leaks into the next document.
///
/// # Example
///
/// ```
/// use mdwiki_renderer::{ParseOptions, WikiRenderer, parse};
///
/// let doc = parse("## Usage\n\n![shot](img/a.png)", &ParseOptions::default()).unwrap();
/// let result = WikiRenderer::new("https://raw.githubusercontent.com/org/repo/master")
///     .unwrap()
///     .render(&doc);
///
/// assert_eq!(
///     result.markup,
///     "h2. Usage\n\n!https://raw.githubusercontent.com/org/repo/master/img/a.png!"
/// );
/// ```
pub struct WikiRenderer<L: LinkRenderer = DefaultLinkRenderer> {
    resource_root: Url,
    link_renderer: L,
    registry: SerializerRegistry,
}

impl WikiRenderer {
    /// Create a renderer resolving relative targets against `resource_root`.
    ///
    /// A trailing `/` is appended when missing so the last path segment is
    /// treated as a directory.
    ///
    /// The root must be an absolute URL with a scheme. Relative roots such as
    /// `docs/` are rejected; use a `file://` URL for local directories.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidResourceRoot`] if the root is not an
    /// absolute URL.
    pub fn new(resource_root: &str) -> Result<Self, RenderError> {
        let root = if resource_root.ends_with('/') {
            resource_root.to_owned()
        } else {
            format!("{resource_root}/")
        };
        let resource_root =
            Url::parse(&root).map_err(|source| RenderError::InvalidResourceRoot {
                url: root.clone(),
                source,
            })?;

        Ok(Self {
            resource_root,
            link_renderer: DefaultLinkRenderer,
            registry: SerializerRegistry::default(),
        })
    }
}

impl<L: LinkRenderer> WikiRenderer<L> {
    /// Replace the link renderer.
    #[must_use]
    pub fn with_link_renderer<M: LinkRenderer>(self, link_renderer: M) -> WikiRenderer<M> {
        WikiRenderer {
            resource_root: self.resource_root,
            link_renderer,
            registry: self.registry,
        }
    }

    /// Replace the verbatim serializer registry.
    #[must_use]
    pub fn with_registry(mut self, registry: SerializerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Resource root with its trailing `/`.
    #[must_use]
    pub fn resource_root(&self) -> &Url {
        &self.resource_root
    }

    /// Render a document and return the trimmed markup.
    pub fn render(self, document: &Document) -> RenderResult {
        let mut visitor = Visitor {
            resource_root: &self.resource_root,
            links: &self.link_renderer,
            registry: &self.registry,
            lists: ListStack::default(),
            references: ReferenceTable::default(),
            abbreviations: HashMap::new(),
        };

        visitor.collect_definitions(&document.children);

        let mut out = String::with_capacity(4096);
        visitor.visit_children(&document.children, &mut out);

        tracing::debug!(
            nodes = document.children.len(),
            references = visitor.references.len(),
            bytes = out.len(),
            "rendered document to wiki markup"
        );

        RenderResult {
            markup: out.trim().to_owned(),
            abbreviations: visitor.abbreviations,
        }
    }
}

/// Render `document` with default settings and return the markup.
///
/// # Errors
///
/// Returns [`RenderError::InvalidResourceRoot`] if `resource_root` is not an
/// absolute URL.
pub fn to_wiki(document: &Document, resource_root: &str) -> Result<String, RenderError> {
    Ok(WikiRenderer::new(resource_root)?.render(document).markup)
}

/// Traversal state for one conversion.
struct Visitor<'r, 'doc, L> {
    resource_root: &'r Url,
    links: &'r L,
    registry: &'r SerializerRegistry,
    lists: ListStack,
    references: ReferenceTable<'doc>,
    abbreviations: HashMap<String, String>,
}

impl<'doc, L: LinkRenderer> Visitor<'_, 'doc, L> {
    /// Fill the reference and abbreviation tables from top-level definitions.
    fn collect_definitions(&mut self, children: &'doc [Node]) {
        for child in children {
            if let Node::Reference(reference) = child {
                let label = self.render_to_string(&reference.label);
                self.references.insert(&label, reference);
            }
        }
        for child in children {
            if let Node::Abbreviation(abbreviation) = child {
                let label = self.render_to_string(&abbreviation.label);
                let expansion = self.render_to_string(&abbreviation.expansion);
                self.abbreviations.insert(label, expansion);
            }
        }
    }

    fn visit_children(&mut self, children: &[Node], out: &mut String) {
        for child in children {
            self.visit(child, out);
        }
    }

    /// Render nodes into a fresh buffer.
    fn render_to_string(&mut self, children: &[Node]) -> String {
        let mut buf = String::new();
        self.visit_children(children, &mut buf);
        buf
    }

    /// Render list item content with its blocks on consecutive lines.
    ///
    /// A blank line would end the wiki list, so paragraphs and nested lists
    /// are trimmed and joined by single newlines. Inline runs between blocks
    /// stay together.
    fn render_item_content(&mut self, children: &[Node]) -> String {
        let mut parts = Vec::new();
        let mut inline = String::new();
        for child in children {
            if child.is_block() {
                parts.push(std::mem::take(&mut inline));
                parts.push(self.render_to_string(std::slice::from_ref(child)));
            } else {
                self.visit(child, &mut inline);
            }
        }
        parts.push(inline);

        parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[allow(clippy::too_many_lines)]
    fn visit(&mut self, node: &Node, out: &mut String) {
        match node {
            Node::Heading { level, children } => {
                write!(out, "\n\nh{}. ", (*level).clamp(1, 6)).unwrap();
                self.visit_children(children, out);
                out.push('\n');
            }
            Node::Paragraph { children } => {
                out.push('\n');
                self.visit_children(children, out);
                out.push('\n');
            }
            Node::BlockQuote { children } => {
                let content = self.render_to_string(children);
                let content = content.trim();
                if content.contains("\n\n") {
                    write!(out, "\n{{quote}}\n{content}\n{{quote}}\n").unwrap();
                } else if !content.is_empty() {
                    write!(out, "\nbq. {content}\n").unwrap();
                }
            }
            Node::List { kind, children } => {
                self.lists.push(*kind);
                self.visit_children(children, out);
                self.lists.pop();
            }
            Node::ListItem { children } => {
                let marker = self.lists.marker();
                let content = self.render_item_content(children);
                write!(out, "\n{marker} {content}").unwrap();
            }
            Node::Emphasis {
                strong,
                closed,
                chars,
                children,
            } => {
                if *closed {
                    let marker = if *strong { '*' } else { '_' };
                    out.push(marker);
                    self.visit_children(children, out);
                    out.push(marker);
                } else {
                    // Never closed: the opening characters are ordinary text.
                    out.push_str(chars);
                    self.visit_children(children, out);
                }
            }
            Node::Strike { children } => {
                out.push('-');
                self.visit_children(children, out);
                out.push('-');
            }
            Node::Link {
                kind,
                url,
                title,
                children,
            } => {
                let text = self.render_to_string(children);
                let rendering = match kind {
                    LinkKind::Explicit => self.links.explicit(url, title.as_deref(), &text),
                    LinkKind::Automatic => self.links.automatic(url),
                    LinkKind::Mail => self.links.mail(url),
                    LinkKind::Wiki => self.links.wiki(url, &text),
                };
                self.print_link(&rendering, out);
            }
            Node::RefLink {
                key,
                separator,
                children,
            } => {
                let text = self.render_to_string(children);
                let key_text = match key {
                    Some(key) => self.render_to_string(key),
                    None => text.clone(),
                };
                if let Some(reference) = self.references.get(&key_text) {
                    let rendering =
                        self.links
                            .reference(&reference.url, reference.title.as_deref(), &text);
                    self.print_link(&rendering, out);
                } else {
                    tracing::debug!(key = %key_text, "reference link has no definition");
                    write!(out, "[{text}]").unwrap();
                    print_fallback_key(
                        key.as_ref().map(|_| key_text.as_str()),
                        separator.as_deref(),
                        out,
                    );
                }
            }
            Node::Image { url, title, .. } => {
                self.print_image(url, title.as_deref(), out);
            }
            Node::RefImage {
                key,
                separator,
                alt,
            } => {
                let alt_text = self.render_to_string(alt);
                let key_text = match key {
                    Some(key) => self.render_to_string(key),
                    None => alt_text.clone(),
                };
                if let Some(Reference { url, title, .. }) = self.references.get(&key_text) {
                    self.print_image(url, title.as_deref(), out);
                } else {
                    tracing::debug!(key = %key_text, "reference image has no definition");
                    write!(out, "![{alt_text}]").unwrap();
                    print_fallback_key(
                        key.as_ref().map(|_| key_text.as_str()),
                        separator.as_deref(),
                        out,
                    );
                }
            }
            Node::Code { text } => self.registry.serialize(None, text, out),
            Node::Verbatim { tag, text } => self.registry.serialize(tag.as_deref(), text, out),
            Node::HorizontalRule => out.push_str("\n----\n"),
            Node::LineBreak => out.push('\n'),
            Node::Nbsp => out.push(' '),
            Node::Text { text } => out.push_str(&escape_wiki(text)),
            Node::Container { children } => self.visit_children(children, out),
            // Definitions are consumed up front; the rest has no wiki form.
            Node::Abbreviation(_)
            | Node::Reference(_)
            | Node::DefinitionList { .. }
            | Node::DefinitionTerm { .. }
            | Node::Definition { .. }
            | Node::Html { .. }
            | Node::Table { .. }
            | Node::TableHeader { .. }
            | Node::TableBody { .. }
            | Node::TableRow { .. }
            | Node::TableCell { .. }
            | Node::TableCaption { .. }
            | Node::TableColumn => {}
        }
    }

    fn print_link(&self, rendering: &Rendering, out: &mut String) {
        let href = self.resolve(&rendering.href);
        write!(out, "[{}|{href}]", rendering.text).unwrap();
    }

    fn print_image(&self, url: &str, title: Option<&str>, out: &mut String) {
        let src = self.resolve(url);
        match title {
            Some(title) if !title.is_empty() => write!(out, "!{src}|alt={title}!").unwrap(),
            _ => write!(out, "!{src}!").unwrap(),
        }
    }

    /// Resolve a relative target against the resource root.
    ///
    /// Absolute and unparsable targets are returned unchanged.
    fn resolve<'a>(&self, target: &'a str) -> Cow<'a, str> {
        match Url::parse(target) {
            Ok(_) => Cow::Borrowed(target),
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.resource_root.join(target) {
                Ok(resolved) => Cow::Owned(resolved.into()),
                Err(err) => {
                    tracing::debug!(target, %err, "cannot resolve relative target");
                    Cow::Borrowed(target)
                }
            },
            Err(err) => {
                tracing::debug!(target, %err, "unparsable link target");
                Cow::Borrowed(target)
            }
        }
    }
}

/// Write the second bracket pair of an unresolved reference, if it had one.
fn print_fallback_key(key: Option<&str>, separator: Option<&str>, out: &mut String) {
    if let Some(separator) = separator {
        out.push_str(separator);
        out.push('[');
        if let Some(key) = key {
            out.push_str(key);
        }
        out.push(']');
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::{Abbreviation, HtmlKind, ListKind};
    use crate::parser::{ParseOptions, parse};
    use crate::verbatim::{TagMatcher, VerbatimSerializer};

    const ROOT: &str = "https://raw.githubusercontent.com/org/repo/master/";

    fn render(markdown: &str) -> String {
        let doc = parse(markdown, &ParseOptions::default()).unwrap();
        to_wiki(&doc, ROOT).unwrap()
    }

    fn render_nodes(children: Vec<Node>) -> RenderResult {
        WikiRenderer::new(ROOT)
            .unwrap()
            .render(&Document::new(children))
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(render("Hello, world!"), "Hello, world!");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(render("One\n\nTwo"), "One\n\nTwo");
    }

    #[test]
    fn test_paragraph_text_is_escaped() {
        assert_eq!(render("use {braces} and a|b"), r"use \{braces\} and a\|b");
    }

    #[test]
    fn test_paragraph_wrapped_in_newlines() {
        let result = render_nodes(vec![
            Node::paragraph(vec![Node::text("a")]),
            Node::paragraph(vec![Node::text("b")]),
        ]);
        assert_eq!(result.markup, "a\n\nb");
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6 {
            let markdown = format!("{} Title", "#".repeat(level));
            assert_eq!(render(&markdown), format!("h{level}. Title"));
        }
    }

    #[test]
    fn test_heading_followed_by_paragraph() {
        assert_eq!(render("# Title\n\nBody"), "h1. Title\n\nBody");
    }

    #[test]
    fn test_emphasis_and_strong() {
        assert_eq!(render("*em* and **strong**"), "_em_ and *strong*");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(render("~~gone~~"), "-gone-");
    }

    #[test]
    fn test_unclosed_emphasis_is_literal() {
        let result = render_nodes(vec![Node::paragraph(vec![Node::Emphasis {
            strong: false,
            closed: false,
            chars: "*".to_owned(),
            children: vec![Node::text("bold without close")],
        }])]);
        assert_eq!(result.markup, "*bold without close");
    }

    #[test]
    fn test_unclosed_emphasis_from_markdown() {
        assert_eq!(render("*bold without close"), "*bold without close");
    }

    #[test]
    fn test_bulleted_list() {
        assert_eq!(render("- a\n- b"), "* a\n* b");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(render("1. a\n2. b"), "# a\n# b");
    }

    #[test]
    fn test_nested_list_depth() {
        assert_eq!(render("- a\n  - b\n    - c"), "* a\n** b\n*** c");
    }

    #[test]
    fn test_switching_list_type_resets_depth() {
        assert_eq!(render("1. one\n   - sub\n2. two"), "# one\n* sub\n# two");
    }

    #[test]
    fn test_loose_list_item_keeps_marker_on_text_line() {
        assert_eq!(render("- a\n\n- b"), "* a\n* b");
    }

    #[test]
    fn test_loose_nested_list_has_no_blank_line() {
        assert_eq!(render("- a\n\n  - b"), "* a\n** b");
    }

    #[test]
    fn test_list_item_code_keeps_blank_lines() {
        assert_eq!(
            render("- a\n\n  ```\n  x\n\n  y\n  ```"),
            "* a\n{code}x\n\ny\n{code}"
        );
    }

    #[test]
    fn test_list_item_inline_run_stays_on_one_line() {
        assert_eq!(render("- a *b* `c`"), "* a _b_ {code}c{code}");
    }

    #[test]
    fn test_explicit_link_absolute() {
        assert_eq!(
            render("[Jenkins](https://jenkins.io)"),
            "[Jenkins|https://jenkins.io]"
        );
    }

    #[test]
    fn test_explicit_link_relative_is_resolved() {
        assert_eq!(
            render("[docs](docs/usage.md)"),
            format!("[docs|{ROOT}docs/usage.md]")
        );
    }

    #[test]
    fn test_link_text_keeps_formatting() {
        assert_eq!(
            render("[**bold** link](https://example.com)"),
            "[*bold* link|https://example.com]"
        );
    }

    #[test]
    fn test_automatic_link() {
        assert_eq!(
            render("<https://jenkins.io>"),
            "[https://jenkins.io|https://jenkins.io]"
        );
    }

    #[test]
    fn test_automatic_link_text_is_escaped() {
        assert_eq!(
            render("<https://example.com/a|b>"),
            r"[https://example.com/a\|b|https://example.com/a|b]"
        );
    }

    #[test]
    fn test_mail_link() {
        assert_eq!(
            render("<dev@example.com>"),
            "[dev@example.com|mailto:dev@example.com]"
        );
    }

    #[test]
    fn test_wiki_link_node() {
        let result = render_nodes(vec![Node::paragraph(vec![Node::Link {
            kind: LinkKind::Wiki,
            url: "Getting Started".to_owned(),
            title: None,
            children: vec![Node::text("Getting Started")],
        }])]);
        assert_eq!(
            result.markup,
            format!("[Getting Started|{ROOT}Getting-Started.html]")
        );
    }

    #[test]
    fn test_reference_link_resolved() {
        let markdown = "[text][foo]\n\n[foo]: http://example.com \"Title\"";
        assert_eq!(render(markdown), "[text|http://example.com]");
    }

    #[test]
    fn test_reference_link_case_insensitive_key() {
        let markdown = "[text][The Docs]\n\n[the docs]: docs/index.md";
        assert_eq!(render(markdown), format!("[text|{ROOT}docs/index.md]"));
    }

    #[test]
    fn test_reference_label_with_emphasis() {
        let markdown = "See [**Jenkins**].\n\n[**jenkins**]: https://jenkins.io";
        assert_eq!(render(markdown), "See [*Jenkins*|https://jenkins.io].");
    }

    #[test]
    fn test_reference_label_with_code_span() {
        let markdown = "See [`mvn`][].\n\n[`mvn`]: https://maven.apache.org";
        assert_eq!(
            render(markdown),
            "See [{code}mvn{code}|https://maven.apache.org]."
        );
    }

    #[test]
    fn test_reference_key_with_emphasis() {
        let markdown = "[docs][**Guide**]\n\n[**guide**]: docs/guide.md";
        assert_eq!(render(markdown), format!("[docs|{ROOT}docs/guide.md]"));
    }

    #[test]
    fn test_reference_link_shortcut_resolved() {
        let markdown = "See [foo].\n\n[foo]: http://example.com";
        assert_eq!(render(markdown), "See [foo|http://example.com].");
    }

    #[test]
    fn test_dangling_reference_fallback() {
        assert_eq!(render("[text][bar]"), "[text][bar]");
    }

    #[test]
    fn test_dangling_collapsed_reference_fallback() {
        assert_eq!(render("[text][]"), "[text][]");
    }

    #[test]
    fn test_dangling_shortcut_reference_fallback() {
        assert_eq!(render("[just brackets]"), "[just brackets]");
    }

    #[test]
    fn test_reference_fallback_keeps_separator() {
        let result = render_nodes(vec![Node::RefLink {
            key: Some(vec![Node::text("bar")]),
            separator: Some(" ".to_owned()),
            children: vec![Node::text("text")],
        }]);
        assert_eq!(result.markup, "[text] [bar]");
    }

    #[test]
    fn test_image_relative_is_resolved() {
        assert_eq!(
            render("![logo](img/a.png)"),
            "!https://raw.githubusercontent.com/org/repo/master/img/a.png!"
        );
    }

    #[test]
    fn test_image_absolute_unchanged() {
        assert_eq!(
            render("![logo](https://other.example/a.png)"),
            "!https://other.example/a.png!"
        );
    }

    #[test]
    fn test_image_title_becomes_alt() {
        assert_eq!(
            render("![x](https://other.example/a.png \"Logo\")"),
            "!https://other.example/a.png|alt=Logo!"
        );
    }

    #[test]
    fn test_reference_image() {
        let markdown = "![shot][s]\n\n[s]: img/shot.png";
        assert_eq!(render(markdown), format!("!{ROOT}img/shot.png!"));
    }

    #[test]
    fn test_dangling_reference_image_fallback() {
        let result = render_nodes(vec![Node::RefImage {
            key: Some(vec![Node::text("missing")]),
            separator: Some(String::new()),
            alt: vec![Node::text("shot")],
        }]);
        assert_eq!(result.markup, "![shot][missing]");
    }

    #[test]
    fn test_unparsable_target_passed_through() {
        let result = render_nodes(vec![Node::Image {
            url: "http://[::1".to_owned(),
            title: None,
            alt: Vec::new(),
        }]);
        assert_eq!(result.markup, "!http://[::1!");
    }

    #[test]
    fn test_code_block_recognized_language() {
        assert_eq!(
            render("```java\nclass A {}\n```"),
            "{code:java}class A {}\n{code}"
        );
    }

    #[test]
    fn test_code_block_unrecognized_language() {
        assert_eq!(
            render("```rust\nlet a = [1 | 2];\n```"),
            "{code}let a = [1 | 2];\n{code}"
        );
    }

    #[test]
    fn test_code_block_without_language() {
        assert_eq!(render("```\nplain *text*\n```"), "{code}plain *text*\n{code}");
    }

    #[test]
    fn test_code_span() {
        assert_eq!(render("run `mvn {x}`"), "run {code}mvn {x}{code}");
    }

    #[test]
    fn test_custom_registry() {
        struct NoFormat;

        impl VerbatimSerializer for NoFormat {
            fn serialize(&self, _tag: Option<&str>, content: &str, out: &mut String) {
                write!(out, "{{noformat}}{content}{{noformat}}").unwrap();
            }
        }

        let doc = parse("```text\nlog\n```", &ParseOptions::default()).unwrap();
        let registry =
            SerializerRegistry::default().register(TagMatcher::one_of(["text"]), NoFormat);
        let result = WikiRenderer::new(ROOT)
            .unwrap()
            .with_registry(registry)
            .render(&doc);
        assert_eq!(result.markup, "{noformat}log\n{noformat}");
    }

    #[test]
    fn test_custom_link_renderer() {
        struct Absolute;

        impl LinkRenderer for Absolute {
            fn explicit(&self, url: &str, _title: Option<&str>, text: &str) -> Rendering {
                Rendering::new(text.to_uppercase(), format!("/pages/{url}"))
            }
        }

        let doc = parse("[a](b)", &ParseOptions::default()).unwrap();
        let result = WikiRenderer::new("https://wiki.example.com/space")
            .unwrap()
            .with_link_renderer(Absolute)
            .render(&doc);
        assert_eq!(result.markup, "[A|https://wiki.example.com/pages/b]");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(render("> quoted"), "bq. quoted");
    }

    #[test]
    fn test_blockquote_multiple_paragraphs() {
        assert_eq!(render("> one\n>\n> two"), "{quote}\none\n\ntwo\n{quote}");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(render("a\n\n---\n\nb"), "a\n\n----\n\nb");
    }

    #[test]
    fn test_soft_break_is_hard_with_hard_wraps() {
        assert_eq!(render("a\nb"), "a\nb");
    }

    #[test]
    fn test_nbsp_and_line_break() {
        let result = render_nodes(vec![Node::paragraph(vec![
            Node::text("a"),
            Node::Nbsp,
            Node::text("b"),
            Node::LineBreak,
            Node::text("c"),
        ])]);
        assert_eq!(result.markup, "a b\nc");
    }

    #[test]
    fn test_table_only_document_is_empty() {
        assert_eq!(render("| A | B |\n|---|---|\n| 1 | 2 |"), "");
    }

    #[test]
    fn test_html_is_dropped() {
        assert_eq!(render("<div>raw</div>\n\ntext <b>x</b>"), "text x");
    }

    #[test]
    fn test_container_visits_children() {
        let result = render_nodes(vec![Node::Container {
            children: vec![
                Node::text("a"),
                Node::Container {
                    children: vec![Node::text("b")],
                },
            ],
        }]);
        assert_eq!(result.markup, "ab");
    }

    #[test]
    fn test_unsupported_nodes_render_nothing() {
        let text = || vec![Node::text("dropped")];
        let result = render_nodes(vec![
            Node::DefinitionList {
                children: vec![
                    Node::DefinitionTerm { children: text() },
                    Node::Definition { children: text() },
                ],
            },
            Node::DefinitionTerm { children: text() },
            Node::Definition { children: text() },
            Node::Table {
                children: vec![
                    Node::TableCaption { children: text() },
                    Node::TableColumn,
                    Node::TableHeader {
                        children: vec![Node::TableRow {
                            children: vec![Node::TableCell { children: text() }],
                        }],
                    },
                    Node::TableBody {
                        children: vec![Node::TableRow {
                            children: vec![Node::TableCell { children: text() }],
                        }],
                    },
                ],
            },
            Node::TableBody { children: text() },
            Node::TableCaption { children: text() },
            Node::TableColumn,
            Node::Html {
                kind: HtmlKind::Block,
                html: "<p>dropped</p>".to_owned(),
            },
            Node::paragraph(vec![
                Node::text("kept"),
                Node::Html {
                    kind: HtmlKind::Inline,
                    html: "<br>".to_owned(),
                },
            ]),
        ]);
        assert_eq!(result.markup, "kept");
    }

    #[test]
    fn test_abbreviations_recorded_not_substituted() {
        let result = render_nodes(vec![
            Node::Abbreviation(Abbreviation {
                label: vec![Node::text("HTML")],
                expansion: vec![Node::text("Hyper Text Markup Language")],
            }),
            Node::paragraph(vec![Node::text("HTML rocks")]),
        ]);
        assert_eq!(result.markup, "HTML rocks");
        assert_eq!(
            result.abbreviations.get("HTML").map(String::as_str),
            Some("Hyper Text Markup Language")
        );
    }

    #[test]
    fn test_list_item_outside_list() {
        let result = render_nodes(vec![Node::ListItem {
            children: vec![Node::text("orphan")],
        }]);
        assert_eq!(result.markup, "* orphan");
    }

    #[test]
    fn test_hand_built_nested_lists() {
        let inner = Node::List {
            kind: ListKind::Ordered,
            children: vec![Node::ListItem {
                children: vec![Node::text("x")],
            }],
        };
        let outer = Node::List {
            kind: ListKind::Ordered,
            children: vec![Node::ListItem {
                children: vec![Node::text("top"), inner],
            }],
        };
        assert_eq!(render_nodes(vec![outer]).markup, "# top\n## x");
    }

    #[test]
    fn test_invalid_resource_root() {
        let err = WikiRenderer::new("not a url").err().unwrap();
        assert!(
            matches!(err, RenderError::InvalidResourceRoot { ref url, .. } if url == "not a url/"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_relative_resource_root_rejected() {
        let err = to_wiki(&Document::default(), "docs/").unwrap_err();
        assert!(
            matches!(
                err,
                RenderError::InvalidResourceRoot {
                    source: url::ParseError::RelativeUrlWithoutBase,
                    ..
                }
            ),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_resource_root_gets_trailing_slash() {
        let renderer = WikiRenderer::new("https://example.com/docs").unwrap();
        assert_eq!(renderer.resource_root().as_str(), "https://example.com/docs/");
    }
}
