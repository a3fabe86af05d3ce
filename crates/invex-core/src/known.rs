//! Read-only set of known-valid identifiers.

use std::collections::HashSet;

/// An immutable catalog of valid part identifiers.
///
/// Populated once, before any extraction run, from an external parts
/// catalog; only membership testing is exposed. Values are normalized
/// (trimmed, case-folded) on insert and on lookup, so OCR case noise
/// does not defeat a match. The set is never mutated afterwards and can
/// be shared freely across extraction runs on different documents.
#[derive(Debug, Clone, Default)]
pub struct KnownIdentifierSet {
    ids: HashSet<String>,
}

impl KnownIdentifierSet {
    /// Build the set from any iterator of identifiers.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = ids
            .into_iter()
            .map(|s| normalize(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { ids }
    }

    /// Membership test against the normalized identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(&normalize(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KnownIdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_uppercase()
}
