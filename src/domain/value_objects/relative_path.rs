//! Relative path helpers
//!
//! The exclude set and remote paths always use `/`, whatever the local
//! platform separator is.

use std::path::Path;

/// Path of `path` below `root`, joined with `/` and without a leading separator.
///
/// Returns `None` when `path` is not inside `root`. The root itself maps to "".
pub fn relative_posix(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Path of a remote entry relative to the remote destination root.
pub fn relative_remote(full_path: &str, root: &str) -> Option<String> {
    let full_path = full_path.replace('\\', "/");
    let base = root.replace('\\', "/");
    let base = base.trim_end_matches('/');
    let rest = full_path.strip_prefix(base)?;
    if !rest.is_empty() && !rest.starts_with('/') {
        // "/srv/site2" is not below "/srv/site"
        return None;
    }
    Some(rest.trim_start_matches('/').to_string())
}

/// Join a relative posix path onto a remote root.
pub fn join_remote(root: &str, relative: &str) -> String {
    let base = root.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    match (base.is_empty(), relative.is_empty()) {
        (true, true) => "/".to_string(),
        (_, true) => base.to_string(),
        _ => format!("{}/{}", base, relative),
    }
}
