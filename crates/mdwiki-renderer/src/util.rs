//! Shared utility functions for wiki rendering.

use pulldown_cmark::HeadingLevel;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Normalize a reference key for lookup.
///
/// Drops spaces, tabs and newlines and lowercases the rest, so
/// `[Foo Bar]` and `[foobar]` refer to the same definition.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\t'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Escape characters that open wiki macros, links or table cells.
///
/// `*`, `_` and `-` are left alone: they only format when paired, and
/// escaping them would mangle ordinary prose.
#[must_use]
pub fn escape_wiki(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '{' | '}' | '[' | ']' | '|') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
