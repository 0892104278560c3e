//! Exclude set value object
//!
//! Relative paths (posix separators, case-sensitive, exact match) that the
//! mirror neither deletes remotely nor uploads.

use std::collections::BTreeSet;

/// Set of relative paths exempted from mirroring.
///
/// Entries are compared as exact relative paths, never as globs. An entry
/// naming a directory also shields everything below it (see [`ExcludeSet::covers`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    entries: BTreeSet<String>,
}

impl ExcludeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalise a configured entry: `\` becomes `/`, surrounding `/` are dropped.
    fn normalize(entry: &str) -> String {
        entry.replace('\\', "/").trim_matches('/').to_string()
    }

    pub fn insert(&mut self, entry: impl AsRef<str>) {
        let entry = Self::normalize(entry.as_ref());
        if !entry.is_empty() {
            self.entries.insert(entry);
        }
    }

    /// Exact match of a relative path against the set
    pub fn contains(&self, relative: &str) -> bool {
        self.entries.contains(relative)
    }

    /// True when `relative` or one of its ancestors is in the set
    pub fn covers(&self, relative: &str) -> bool {
        if self.contains(relative) {
            return true;
        }
        relative
            .match_indices('/')
            .any(|(idx, _)| self.entries.contains(&relative[..idx]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExcludeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}
