//! Markdown to Confluence wiki markup conversion.
//!
//! The crate turns Markdown (typically a repository README) into the wiki
//! markup understood by Confluence's legacy renderer.
//!
//! # Architecture
//!
//! - [`parse`] folds `pulldown-cmark` events into a [`Document`] tree.
//! - [`WikiRenderer`] walks the tree once and emits markup, resolving
//!   relative links and images against a resource root URL.
//! - [`SerializerRegistry`] picks how code blocks are fenced by language tag.
//! - [`LinkRenderer`] decides link text and targets per link kind.
//! - [`render_source`] ties the pieces together for a named source file.
//!
//! # Example
//!
//! ```
//! use mdwiki_renderer::{ParseOptions, parse, to_wiki};
//!
//! let doc = parse("# Hello\n\n**Bold** and [docs](docs/index.md)", &ParseOptions::default())?;
//! let markup = to_wiki(&doc, "https://raw.githubusercontent.com/org/repo/master/")?;
//!
//! assert_eq!(
//!     markup,
//!     "h1. Hello\n\n*Bold* and [docs|https://raw.githubusercontent.com/org/repo/master/docs/index.md]"
//! );
//! # Ok::<(), mdwiki_renderer::RenderError>(())
//! ```

pub mod ast;
mod error;
mod link;
mod parser;
mod source;
mod state;
mod util;
mod verbatim;
mod wiki;

pub use ast::{Document, HtmlKind, LinkKind, ListKind, Node};
pub use error::{ParseError, RenderError};
pub use link::{DefaultLinkRenderer, LinkRenderer, Rendering};
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, parse};
pub use source::{
    SourceKind, SourceOptions, github_raw_root, missing_content_notice, plugin_repository,
    render_source,
};
pub use util::{escape_wiki, normalize_key};
pub use verbatim::{
    DEFAULT_CODE_LANGUAGES, LanguageCodeSerializer, PlainCodeSerializer, SerializerRegistry,
    TagMatcher, VerbatimSerializer,
};
pub use wiki::{RenderResult, WikiRenderer, to_wiki};
