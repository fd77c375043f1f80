//! Verbatim block serializers.
//!
//! Code blocks and code spans are emitted through a [`SerializerRegistry`]:
//! an ordered list of `(TagMatcher, serializer)` entries checked in order,
//! ending in a mandatory fallback that handles every tag no entry claims.
//!
//! # Example
//!
//! ```
//! use mdwiki_renderer::{SerializerRegistry, TagMatcher, VerbatimSerializer};
//!
//! struct NoFormat;
//!
//! impl VerbatimSerializer for NoFormat {
//!     fn serialize(&self, _tag: Option<&str>, content: &str, out: &mut String) {
//!         out.push_str("{noformat}");
//!         out.push_str(content);
//!         out.push_str("{noformat}");
//!     }
//! }
//!
//! let registry = SerializerRegistry::default()
//!     .register(TagMatcher::one_of(["text", "log"]), NoFormat);
//!
//! let mut out = String::new();
//! registry.serialize(Some("log"), "started\n", &mut out);
//! assert_eq!(out, "{noformat}started\n{noformat}");
//! ```

/// Language tags rendered with a tagged `{code:<lang>}` fence by default.
pub const DEFAULT_CODE_LANGUAGES: &[&str] = &["java", "ruby", "python", "javascript"];

/// Strategy for emitting one verbatim block.
pub trait VerbatimSerializer {
    /// Write `content` wrapped in a code fence to `out`.
    ///
    /// `content` is written unchanged; wiki escaping never applies inside a
    /// code fence.
    fn serialize(&self, tag: Option<&str>, content: &str, out: &mut String);
}

/// `{code}` fence without a language.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainCodeSerializer;

impl VerbatimSerializer for PlainCodeSerializer {
    fn serialize(&self, _tag: Option<&str>, content: &str, out: &mut String) {
        out.push_str("{code}");
        out.push_str(content);
        out.push_str("{code}");
    }
}

/// `{code:<lang>}` fence carrying the block's type tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct LanguageCodeSerializer;

impl VerbatimSerializer for LanguageCodeSerializer {
    fn serialize(&self, tag: Option<&str>, content: &str, out: &mut String) {
        match tag {
            Some(tag) => {
                out.push_str("{code:");
                out.push_str(tag);
                out.push('}');
            }
            None => out.push_str("{code}"),
        }
        out.push_str(content);
        out.push_str("{code}");
    }
}

/// Predicate selecting the blocks a serializer handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagMatcher {
    /// Every block, tagged or not.
    Any,
    /// Blocks whose tag is one of these (exact match).
    OneOf(Vec<String>),
}

impl TagMatcher {
    /// Matcher for a fixed set of tags.
    pub fn one_of<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(tags.into_iter().map(Into::into).collect())
    }

    /// Check whether a block with `tag` is handled.
    #[must_use]
    pub fn matches(&self, tag: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(tags) => tag.is_some_and(|tag| tags.iter().any(|t| t == tag)),
        }
    }
}

/// Ordered serializer lookup with a mandatory fallback.
pub struct SerializerRegistry {
    entries: Vec<(TagMatcher, Box<dyn VerbatimSerializer>)>,
    fallback: Box<dyn VerbatimSerializer>,
}

impl SerializerRegistry {
    /// Registry with no entries; every block goes to `fallback`.
    pub fn new<S: VerbatimSerializer + 'static>(fallback: S) -> Self {
        Self {
            entries: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Default registry recognizing `languages` instead of
    /// [`DEFAULT_CODE_LANGUAGES`].
    pub fn with_languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PlainCodeSerializer)
            .register(TagMatcher::one_of(languages), LanguageCodeSerializer)
    }

    /// Append an entry, checked after every entry registered before it.
    #[must_use]
    pub fn register<S: VerbatimSerializer + 'static>(
        mut self,
        matcher: TagMatcher,
        serializer: S,
    ) -> Self {
        self.entries.push((matcher, Box::new(serializer)));
        self
    }

    /// Find the serializer for a block tag.
    #[must_use]
    pub fn lookup(&self, tag: Option<&str>) -> &dyn VerbatimSerializer {
        self.entries
            .iter()
            .find(|(matcher, _)| matcher.matches(tag))
            .map_or(self.fallback.as_ref(), |(_, serializer)| serializer.as_ref())
    }

    /// Serialize a block with the serializer registered for its tag.
    pub fn serialize(&self, tag: Option<&str>, content: &str, out: &mut String) {
        self.lookup(tag).serialize(tag, content, out);
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::with_languages(DEFAULT_CODE_LANGUAGES.iter().copied())
    }
}

impl std::fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field(
                "matchers",
                &self.entries.iter().map(|(m, _)| m).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn serialize(registry: &SerializerRegistry, tag: Option<&str>, content: &str) -> String {
        let mut out = String::new();
        registry.serialize(tag, content, &mut out);
        out
    }

    #[test]
    fn test_recognized_language_carries_tag() {
        let registry = SerializerRegistry::default();
        assert_eq!(
            serialize(&registry, Some("java"), "class A {}\n"),
            "{code:java}class A {}\n{code}"
        );
    }

    #[test]
    fn test_unrecognized_language_uses_plain_fence() {
        let registry = SerializerRegistry::default();
        assert_eq!(
            serialize(&registry, Some("rust"), "fn main() {}\n"),
            "{code}fn main() {}\n{code}"
        );
    }

    #[test]
    fn test_missing_tag_uses_plain_fence() {
        let registry = SerializerRegistry::default();
        assert_eq!(serialize(&registry, None, "x"), "{code}x{code}");
    }

    #[test]
    fn test_content_is_not_escaped() {
        let registry = SerializerRegistry::default();
        let content = "a | b [c] {d} \\e *f*";
        assert_eq!(
            serialize(&registry, Some("python"), content),
            format!("{{code:python}}{content}{{code}}")
        );
    }

    #[test]
    fn test_with_languages_replaces_defaults() {
        let registry = SerializerRegistry::with_languages(["rust"]);
        assert_eq!(serialize(&registry, Some("rust"), "x"), "{code:rust}x{code}");
        assert_eq!(serialize(&registry, Some("java"), "x"), "{code}x{code}");
    }

    #[test]
    fn test_entries_checked_in_order() {
        struct Marker(&'static str);

        impl VerbatimSerializer for Marker {
            fn serialize(&self, _tag: Option<&str>, _content: &str, out: &mut String) {
                out.push_str(self.0);
            }
        }

        let registry = SerializerRegistry::new(Marker("fallback"))
            .register(TagMatcher::one_of(["sh"]), Marker("first"))
            .register(TagMatcher::Any, Marker("any"))
            .register(TagMatcher::one_of(["sh"]), Marker("shadowed"));

        assert_eq!(serialize(&registry, Some("sh"), ""), "first");
        assert_eq!(serialize(&registry, Some("go"), ""), "any");
        assert_eq!(serialize(&registry, None, ""), "any");
    }

    #[test]
    fn test_tag_matcher() {
        let matcher = TagMatcher::one_of(["ruby"]);
        assert!(matcher.matches(Some("ruby")));
        assert!(!matcher.matches(Some("Ruby")));
        assert!(!matcher.matches(None));
        assert!(TagMatcher::Any.matches(None));
    }
}
