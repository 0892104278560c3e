//! Asset minification
//!
//! Manifest rules map a root pattern to a `;`-separated list of file-name
//! globs. A root ending in `*` is searched recursively, any other root only
//! at its top level. Matches from all rules are collected into one
//! de-duplicated [`MinifyTask`], then each file is rewritten in place.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::domain::ports::{AssetKind, AssetTransformer, PublishEvent, PublishEventSink};
use crate::error::{PublishError, PublishResult};

/// Split a root pattern into its directory and whether to recurse.
fn split_root_pattern(root_pattern: &str) -> (&str, bool) {
    let recursive = root_pattern.ends_with('*');
    (root_pattern.trim_end_matches('*'), recursive)
}

fn build_filter(filter: &str) -> PublishResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in filter.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|e| PublishError::Minify {
                file: PathBuf::from(pattern),
                message: format!("invalid filter: {}", e),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| PublishError::Minify {
        file: PathBuf::from(filter),
        message: format!("invalid filter: {}", e),
    })
}

/// Files under `base/root_pattern` whose name matches `filter`, sorted by path.
pub fn resolve_targets(base: &Path, root_pattern: &str, filter: &str) -> PublishResult<Vec<PathBuf>> {
    let (root, recursive) = split_root_pattern(root_pattern);
    let root = base.join(root);
    if !root.is_dir() {
        return Err(PublishError::Minify {
            file: root,
            message: "directory not found".to_string(),
        });
    }

    let filter = build_filter(filter)?;
    if filter.is_empty() {
        return Ok(Vec::new());
    }

    let mut walker = WalkBuilder::new(&root);
    walker
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b));
    if !recursive {
        walker.max_depth(Some(1));
    }

    let mut targets = Vec::new();
    for entry in walker.build() {
        let entry = entry.map_err(|e| PublishError::Minify {
            file: root.clone(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if filter.is_match(entry.file_name()) {
            targets.push(entry.into_path());
        }
    }
    Ok(targets)
}

/// De-duplicated list of files pending minification, in discovery order.
#[derive(Debug, Default)]
pub struct MinifyTask {
    pending: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl MinifyTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the matches of every rule, resolved against `base`.
    pub fn from_rules<'a, I>(base: &Path, rules: I) -> PublishResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut task = Self::new();
        for (root_pattern, filter) in rules {
            let added = task.add_rule(base, root_pattern, filter)?;
            tracing::debug!(root = %root_pattern, filter = %filter, added, "resolved minify rule");
        }
        Ok(task)
    }

    /// Add the targets of one rule; returns how many were new.
    pub fn add_rule(&mut self, base: &Path, root_pattern: &str, filter: &str) -> PublishResult<usize> {
        let mut added = 0;
        for path in resolve_targets(base, root_pattern, filter)? {
            if self.add(path) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Add one file. Paths are canonicalised so overlapping rules collapse.
    pub fn add(&mut self, path: PathBuf) -> bool {
        let key = fs::canonicalize(&path).unwrap_or(path);
        if self.seen.insert(key.clone()) {
            self.pending.push(key);
            true
        } else {
            false
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Minify every pending file; returns how many were rewritten.
    pub fn run(
        self,
        transformer: &dyn AssetTransformer,
        events: &dyn PublishEventSink,
    ) -> PublishResult<usize> {
        let mut minified = 0;
        for path in self.pending {
            if minify_file(&path, transformer)? {
                events.on_event(PublishEvent::Minified { path });
                minified += 1;
            }
        }
        Ok(minified)
    }
}

/// Minify one file in place. Unsupported extensions are skipped (`Ok(false)`).
pub fn minify_file(path: &Path, transformer: &dyn AssetTransformer) -> PublishResult<bool> {
    let Some(kind) = AssetKind::from_path(path) else {
        tracing::debug!(path = %path.display(), "no transform for extension, skipped");
        return Ok(false);
    };

    let bytes = fs::read(path)?;
    let source = String::from_utf8(bytes).map_err(|_| PublishError::Minify {
        file: path.to_path_buf(),
        message: "file is not valid UTF-8".to_string(),
    })?;

    let output = transformer
        .transform(kind, &source)
        .map_err(|message| PublishError::Minify {
            file: path.to_path_buf(),
            message,
        })?;

    fs::write(path, output)?;
    Ok(true)
}
