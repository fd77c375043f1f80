//! Per-conversion state tracked while walking the document tree.

use std::collections::HashMap;

use crate::ast::{ListKind, Reference};
use crate::util::normalize_key;

/// Stack of enclosing list kinds, innermost last.
#[derive(Debug, Default)]
pub(crate) struct ListStack {
    kinds: Vec<ListKind>,
}

impl ListStack {
    pub(crate) fn push(&mut self, kind: ListKind) {
        self.kinds.push(kind);
    }

    pub(crate) fn pop(&mut self) {
        self.kinds.pop();
    }

    /// Marker prefix for an item of the innermost list.
    ///
    /// Counts only the contiguous run of the innermost kind from the top of
    /// the stack: a bulleted list inside a numbered list starts over at `*`.
    /// An item outside any list renders as a top-level bullet.
    pub(crate) fn marker(&self) -> String {
        let kind = self.kinds.last().copied().unwrap_or(ListKind::Bulleted);
        let depth = self.kinds.iter().rev().take_while(|k| **k == kind).count();
        std::iter::repeat_n(kind.marker(), depth.max(1)).collect()
    }
}

/// Reference definitions keyed by normalized label.
#[derive(Debug, Default)]
pub(crate) struct ReferenceTable<'doc> {
    entries: HashMap<String, &'doc Reference>,
}

impl<'doc> ReferenceTable<'doc> {
    /// Record a definition under the rendered label.
    ///
    /// A later definition with the same key replaces the earlier one.
    pub(crate) fn insert(&mut self, label: &str, reference: &'doc Reference) {
        self.entries.insert(normalize_key(label), reference);
    }

    /// Look up a definition by rendered key.
    pub(crate) fn get(&self, key: &str) -> Option<&'doc Reference> {
        self.entries.get(&normalize_key(key)).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
