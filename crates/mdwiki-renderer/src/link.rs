//! Link rendering.
//!
//! A [`LinkRenderer`] decides the visible text and raw target of every link
//! kind. The wiki renderer then resolves relative targets against the
//! resource root and wraps the result as `[text|target]`.

use crate::util::escape_wiki;

/// Visible text and target of a rendered link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendering {
    /// Link text shown to the reader.
    pub text: String,
    /// Link target before resource-root resolution.
    pub href: String,
}

impl Rendering {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Per-kind link rendering.
///
/// `text` arguments are already rendered wiki markup; `url` arguments are
/// raw targets from the document and must be escaped before being shown.
pub trait LinkRenderer {
    /// `[text](url)`.
    fn explicit(&self, url: &str, _title: Option<&str>, text: &str) -> Rendering {
        Rendering::new(text, url)
    }

    /// `<https://example.com>`.
    fn automatic(&self, url: &str) -> Rendering {
        Rendering::new(escape_wiki(url), url)
    }

    /// `<user@example.com>`.
    fn mail(&self, address: &str) -> Rendering {
        let href = if address.starts_with("mailto:") {
            address.to_owned()
        } else {
            format!("mailto:{address}")
        };
        Rendering::new(escape_wiki(address.trim_start_matches("mailto:")), href)
    }

    /// `[[Page Name]]` or `[[Page Name|text]]`.
    fn wiki(&self, page: &str, text: &str) -> Rendering {
        Rendering::new(text, format!("./{}.html", page.trim().replace(' ', "-")))
    }

    /// Reference-style link whose definition was found.
    fn reference(&self, url: &str, _title: Option<&str>, text: &str) -> Rendering {
        Rendering::new(text, url)
    }
}

/// Link renderer using the default rendering for every kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLinkRenderer;

impl LinkRenderer for DefaultLinkRenderer {}
