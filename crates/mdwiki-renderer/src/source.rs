//! Source documents fetched from a repository.
//!
//! README-style files are either Markdown, converted to wiki markup, or
//! plain text that is already valid wiki content and passed through as-is.

use crate::error::RenderError;
use crate::parser::{ParseOptions, parse};
use crate::verbatim::SerializerRegistry;
use crate::wiki::WikiRenderer;

/// Host serving raw repository files.
const GITHUB_RAW_HOST: &str = "https://raw.githubusercontent.com";

/// How a source file is turned into wiki markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Converted from Markdown.
    Markdown,
    /// Passed through unchanged.
    PlainText,
}

impl SourceKind {
    /// Classify a file by name: names ending in `.txt` and the exact name
    /// `README` are plain text.
    ///
    /// Matching is case-sensitive and applies to the whole name, so
    /// `NOTES.TXT` and `docs/README` are Markdown.
    #[must_use]
    #[allow(clippy::case_sensitive_file_extension_comparisons)]
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".txt") || name == "README" {
            Self::PlainText
        } else {
            Self::Markdown
        }
    }
}

/// Settings for [`render_source`].
#[derive(Debug)]
pub struct SourceOptions {
    /// Base URL for relative links and images.
    pub resource_root: String,
    /// Markdown parsing options.
    pub parse: ParseOptions,
    /// Language tags rendered as `{code:<lang>}`.
    pub code_languages: Vec<String>,
}

impl SourceOptions {
    /// Options with default parsing and code languages.
    pub fn new(resource_root: impl Into<String>) -> Self {
        Self {
            resource_root: resource_root.into(),
            parse: ParseOptions::default(),
            code_languages: crate::verbatim::DEFAULT_CODE_LANGUAGES
                .iter()
                .map(|lang| (*lang).to_owned())
                .collect(),
        }
    }
}

/// Render a source file to wiki markup according to its [`SourceKind`].
///
/// # Errors
///
/// Returns [`RenderError::InvalidResourceRoot`] for a bad resource root and
/// [`RenderError::Parse`] for Markdown nested past the configured depth.
/// Plain text never fails.
pub fn render_source(
    file_name: &str,
    content: &str,
    options: &SourceOptions,
) -> Result<String, RenderError> {
    match SourceKind::from_file_name(file_name) {
        SourceKind::PlainText => {
            tracing::debug!(file_name, "passing plain text through");
            Ok(content.to_owned())
        }
        SourceKind::Markdown => {
            let renderer = WikiRenderer::new(&options.resource_root)?
                .with_registry(SerializerRegistry::with_languages(&options.code_languages));
            let document = parse(content, &options.parse)?;
            tracing::debug!(file_name, nodes = document.children.len(), "parsed markdown");
            Ok(renderer.render(&document).markup)
        }
    }
}

/// Raw file root of a GitHub repository branch, with trailing `/`.
#[must_use]
pub fn github_raw_root(organization: &str, repository: &str, branch: &str) -> String {
    format!("{GITHUB_RAW_HOST}/{organization}/{repository}/{branch}/")
}

/// Repository name of a plugin: the name with a `-plugin` suffix.
#[must_use]
pub fn plugin_repository(name: &str) -> String {
    if name.ends_with("-plugin") {
        name.to_owned()
    } else {
        format!("{name}-plugin")
    }
}

/// Warning block shown in place of a file that could not be found.
#[must_use]
pub fn missing_content_notice(file_name: &str) -> String {
    format!(
        "h4. Github Markdown Content\n\
         {{warning:title=Cannot load Github Markdown Content}}\n\
         Could not find file named {file_name}\n\
         {{warning}}\n"
    )
}
