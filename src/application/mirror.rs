//! Remote mirror
//!
//! Makes the remote destination an exact copy of the local output tree,
//! minus the exclude set, by replacement: every non-excluded remote entry is
//! deleted, then the local tree is uploaded in two walks (directories first,
//! then files).

use std::error::Error as _;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use ignore::{DirEntry, WalkBuilder};

use crate::domain::ports::{PublishEvent, PublishEventSink, RemoteFileSystem, TransferError};
use crate::domain::value_objects::{join_remote, relative_posix, relative_remote, ExcludeSet};
use crate::error::PublishResult;

/// Counts from one mirror run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub deleted: usize,
    pub excluded: usize,
    pub directories: usize,
    pub uploaded: usize,
}

pub struct RemoteMirror<'a> {
    client: &'a dyn RemoteFileSystem,
    destination: &'a str,
    exclude: &'a ExcludeSet,
    events: &'a dyn PublishEventSink,
    summary: MirrorSummary,
}

impl<'a> RemoteMirror<'a> {
    pub fn new(
        client: &'a dyn RemoteFileSystem,
        destination: &'a str,
        exclude: &'a ExcludeSet,
        events: &'a dyn PublishEventSink,
    ) -> Self {
        Self {
            client,
            destination,
            exclude,
            events,
            summary: MirrorSummary::default(),
        }
    }

    pub fn summary(&self) -> MirrorSummary {
        self.summary
    }

    /// Delete everything below `dir` that is not excluded, children first.
    ///
    /// Returns `true` when `dir` was left empty. A directory holding an
    /// excluded entry is kept.
    pub fn delete_remote(&mut self, dir: &str) -> PublishResult<bool> {
        let mut cleared = true;
        for entry in self.client.list(dir)? {
            if entry.is_pseudo() {
                continue;
            }
            let relative = relative_remote(&entry.full_path, self.destination)
                .unwrap_or_else(|| entry.name.clone());

            if self.exclude.covers(&relative) {
                tracing::debug!(path = %entry.full_path, "excluded from remote cleanup");
                self.excluded(entry.full_path);
                cleared = false;
                continue;
            }

            if entry.is_dir() {
                if !self.delete_remote(&entry.full_path)? {
                    cleared = false;
                    continue;
                }
                self.events.on_event(PublishEvent::RemoteDeleted {
                    path: entry.full_path.clone(),
                });
                self.client.remove_dir(&entry.full_path)?;
            } else {
                self.events.on_event(PublishEvent::RemoteDeleted {
                    path: entry.full_path.clone(),
                });
                self.client.remove_file(&entry.full_path)?;
            }
            self.summary.deleted += 1;
        }
        Ok(cleared)
    }

    /// Upload the local tree: every directory is created before any file is sent.
    pub fn upload_local(&mut self, local_root: &Path) -> PublishResult<()> {
        self.client.create_dir(self.destination)?;

        for entry in walk(local_root) {
            let entry = entry?;
            if entry.depth() == 0 || !is_dir(&entry) {
                continue;
            }
            let Some(relative) = self.admit(&entry, local_root) else {
                continue;
            };
            let remote = join_remote(self.destination, &relative);
            self.client.create_dir(&remote)?;
            self.events
                .on_event(PublishEvent::DirectoryCreated { path: remote });
            self.summary.directories += 1;
        }

        for entry in walk(local_root) {
            let entry = entry?;
            if is_dir(&entry) {
                continue;
            }
            let Some(relative) = self.admit(&entry, local_root) else {
                continue;
            };
            let remote = join_remote(self.destination, &relative);
            let mut file = File::open(entry.path()).map_err(|source| TransferError::Local {
                path: entry.path().to_path_buf(),
                source,
            })?;
            self.client.upload(&mut file, &remote)?;
            self.events.on_event(PublishEvent::FileUploaded { path: remote });
            self.summary.uploaded += 1;
        }
        Ok(())
    }

    /// Relative path of a local entry, or `None` when the exclude set covers it.
    ///
    /// Only the excluded entry itself is reported, not its descendants.
    fn admit(&mut self, entry: &DirEntry, local_root: &Path) -> Option<String> {
        let relative = relative_posix(entry.path(), local_root)?;
        if self.exclude.contains(&relative) {
            self.excluded(join_remote(self.destination, &relative));
            return None;
        }
        if self.exclude.covers(&relative) {
            return None;
        }
        Some(relative)
    }

    fn excluded(&mut self, path: String) {
        self.events.on_event(PublishEvent::Excluded { path });
        self.summary.excluded += 1;
    }
}

fn walk(root: &Path) -> impl Iterator<Item = Result<DirEntry, TransferError>> + '_ {
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .map(move |entry| entry.map_err(|e| walk_error(root, e)))
}

fn walk_error(root: &Path, err: ignore::Error) -> TransferError {
    let path = error_path(&err).unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .map(os_error)
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
    TransferError::Local { path, source }
}

/// Strip the walker's path context from an error, keeping the OS error.
fn os_error(err: io::Error) -> io::Error {
    let code = err
        .get_ref()
        .and_then(|inner| inner.source())
        .and_then(|source| source.downcast_ref::<io::Error>())
        .and_then(io::Error::raw_os_error);
    match code {
        Some(code) => io::Error::from_raw_os_error(code),
        None => err,
    }
}

/// Innermost path an `ignore` error was raised for
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, err } => error_path(err).or(Some(path.as_path())),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
}

/// Remove the local output tree. Only called after a successful upload.
pub fn cleanup_output(output_dir: &Path) -> PublishResult<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
        tracing::info!(path = %output_dir.display(), "removed local output");
    }
    Ok(())
}
