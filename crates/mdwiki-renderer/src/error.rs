//! Error types for Markdown parsing and wiki rendering.

/// Error while building a document tree from Markdown.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Input nests blocks or inlines deeper than the configured limit.
    #[error("document nesting exceeds the limit of {limit} levels")]
    TooDeep {
        /// Configured maximum depth.
        limit: usize,
    },
}

/// Error from converting a document to wiki markup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The resource root is not an absolute URL.
    #[error("invalid resource root {url:?}: {source}")]
    InvalidResourceRoot {
        /// Resource root as supplied, with the trailing `/` added.
        url: String,
        /// Underlying URL parse failure.
        source: url::ParseError,
    },

    /// Markdown could not be parsed into a document tree.
    #[error("markdown parse error: {0}")]
    Parse(#[from] ParseError),
}
