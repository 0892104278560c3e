//! File transfer over an SSH session
//!
//! Implements the RemoteFileSystem port with plain POSIX commands run through
//! the session's control master.

use std::io::Read;

use crate::domain::ports::{RemoteEntry, RemoteFileSystem, TransferError};
use crate::domain::value_objects::join_remote;

use super::session::{shell_quote, SshSession};

/// File-transfer client bound to its own SSH session
pub struct SshFileTransfer {
    session: SshSession,
}

impl SshFileTransfer {
    pub fn new(session: SshSession) -> Self {
        Self { session }
    }

    fn run(&self, operation: &'static str, path: &str, command: &str) -> Result<String, TransferError> {
        let output = self.session.exec(command)?;
        if !output.success() {
            return Err(TransferError::remote(operation, path, output.stderr.trim()));
        }
        Ok(output.stdout)
    }

    /// Parse `ls -1Ap` output: one name per line, directories end with `/`.
    fn parse_listing(dir: &str, listing: &str) -> Vec<RemoteEntry> {
        listing
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| match line.strip_suffix('/') {
                Some(name) => RemoteEntry::directory(name, join_remote(dir, name)),
                None => RemoteEntry::file(line, join_remote(dir, line)),
            })
            .filter(|entry| !entry.is_pseudo())
            .collect()
    }
}

impl RemoteFileSystem for SshFileTransfer {
    fn list(&self, dir: &str) -> Result<Vec<RemoteEntry>, TransferError> {
        let quoted = shell_quote(dir);
        let command = format!("if [ -d {q} ]; then ls -1Ap {q}; fi", q = quoted);
        let listing = self.run("list", dir, &command)?;
        Ok(Self::parse_listing(dir, &listing))
    }

    fn create_dir(&self, path: &str) -> Result<(), TransferError> {
        self.run("mkdir", path, &format!("mkdir -p {}", shell_quote(path)))
            .map(|_| ())
    }

    fn remove_file(&self, path: &str) -> Result<(), TransferError> {
        self.run("rm", path, &format!("rm -f {}", shell_quote(path)))
            .map(|_| ())
    }

    fn remove_dir(&self, path: &str) -> Result<(), TransferError> {
        self.run("rmdir", path, &format!("rmdir {}", shell_quote(path)))
            .map(|_| ())
    }

    fn upload(&self, source: &mut dyn Read, path: &str) -> Result<(), TransferError> {
        let command = format!("cat > {}", shell_quote(path));
        let output = self.session.exec_with_input(&command, source)?;
        if !output.success() {
            return Err(TransferError::remote("upload", path, output.stderr.trim()));
        }
        Ok(())
    }
}
