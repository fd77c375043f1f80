//! Markdown document tree.
//!
//! The tree is the boundary between the Markdown parser and the wiki
//! renderer. [`crate::parse`] builds it from `pulldown-cmark` events, but any
//! parser producing the same node kinds can feed [`crate::WikiRenderer`].
//! With the `serde` feature enabled the whole tree can be (de)serialized.

/// Root of a parsed Markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Top-level nodes in document order.
    pub children: Vec<Node>,
}

impl Document {
    /// Create a document from its top-level nodes.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// Kind of a list node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    /// Numbered list, rendered with `#` markers.
    Ordered,
    /// Bulleted list, rendered with `*` markers.
    Bulleted,
}

impl ListKind {
    /// Marker character repeated once per nesting level.
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Self::Ordered => '#',
            Self::Bulleted => '*',
        }
    }
}

/// Kind of an inline link with an explicit or implicit target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkKind {
    /// `[text](url "title")`.
    Explicit,
    /// `<https://example.com>`.
    Automatic,
    /// `<user@example.com>`.
    Mail,
    /// `[[Page Name]]`.
    Wiki,
}

/// Whether a raw HTML fragment was inline or a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HtmlKind {
    Inline,
    Block,
}

/// Reference-link definition: `[label]: url "title"`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    /// Nodes forming the label the definition is referred to by.
    pub label: Vec<Node>,
    /// Link target.
    pub url: String,
    /// Optional link title.
    pub title: Option<String>,
}

/// Abbreviation definition: `*[HTML]: Hyper Text Markup Language`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Abbreviation {
    /// Abbreviated text.
    pub label: Vec<Node>,
    /// Expansion of the abbreviation.
    pub expansion: Vec<Node>,
}

/// A node of the document tree.
///
/// Every node owns its children, so a [`Document`] is always a finite tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "node", rename_all = "snake_case"))]
pub enum Node {
    /// Heading with level 1-6.
    Heading { level: u8, children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    BlockQuote { children: Vec<Node> },
    List { kind: ListKind, children: Vec<Node> },
    ListItem { children: Vec<Node> },
    /// Emphasis or strong run.
    ///
    /// `closed` is false when the opening `chars` were never matched by a
    /// closing delimiter.
    Emphasis {
        strong: bool,
        closed: bool,
        chars: String,
        children: Vec<Node>,
    },
    Strike { children: Vec<Node> },
    Link {
        kind: LinkKind,
        url: String,
        title: Option<String>,
        children: Vec<Node>,
    },
    /// Reference-style link: `[text][key]`, `[text][]` or `[text]`.
    ///
    /// `key` is `None` when the link text doubles as the key. `separator` is
    /// `Some` when a second bracket pair followed the text and holds the
    /// whitespace between the two pairs.
    RefLink {
        key: Option<Vec<Node>>,
        separator: Option<String>,
        children: Vec<Node>,
    },
    Image {
        url: String,
        title: Option<String>,
        alt: Vec<Node>,
    },
    /// Reference-style image: `![alt][key]`.
    RefImage {
        key: Option<Vec<Node>>,
        separator: Option<String>,
        alt: Vec<Node>,
    },
    /// Inline code span.
    Code { text: String },
    /// Fenced or indented code block with an optional type tag.
    Verbatim { tag: Option<String>, text: String },
    HorizontalRule,
    LineBreak,
    Nbsp,
    Text { text: String },
    Abbreviation(Abbreviation),
    Reference(Reference),
    DefinitionList { children: Vec<Node> },
    DefinitionTerm { children: Vec<Node> },
    Definition { children: Vec<Node> },
    Html { kind: HtmlKind, html: String },
    Table { children: Vec<Node> },
    TableHeader { children: Vec<Node> },
    TableBody { children: Vec<Node> },
    TableRow { children: Vec<Node> },
    TableCell { children: Vec<Node> },
    TableCaption { children: Vec<Node> },
    TableColumn,
    /// Generic node holding an ordered sequence of children.
    Container { children: Vec<Node> },
}

impl Node {
    /// Plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Paragraph wrapping the given inline nodes.
    #[must_use]
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::Paragraph { children }
    }

    /// Closed emphasis (`strong == false`) or strong run.
    #[must_use]
    pub fn emphasis(strong: bool, children: Vec<Node>) -> Self {
        Self::Emphasis {
            strong,
            closed: true,
            chars: if strong { "**" } else { "*" }.to_owned(),
            children,
        }
    }

    /// Whether the node is block-level content.
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Heading { .. }
                | Self::Paragraph { .. }
                | Self::BlockQuote { .. }
                | Self::List { .. }
                | Self::ListItem { .. }
                | Self::Verbatim { .. }
                | Self::HorizontalRule
                | Self::DefinitionList { .. }
                | Self::Html {
                    kind: HtmlKind::Block,
                    ..
                }
                | Self::Table { .. }
        )
    }
}
