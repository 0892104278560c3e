//! Manifest loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PublishError, PublishResult};

use super::types::PublishConfig;

/// File name of the manifest inside the project directory
pub const MANIFEST_FILE_NAME: &str = ".publisher";

/// Non-fatal manifest warning (e.g. an unknown key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the ignored key, e.g. `Upload.Hots`
    pub key: String,
    pub file: PathBuf,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown key '{}' in {} (ignored)",
            self.key,
            self.file.display()
        )
    }
}

/// Path of the manifest for a project rooted at `project_root`
pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(MANIFEST_FILE_NAME)
}

/// Load a manifest, failing on anything but a valid file.
pub fn load(path: &Path) -> PublishResult<PublishConfig> {
    load_with_warnings(path).map(|(config, _)| config)
}

/// Load a manifest and collect non-fatal warnings.
pub fn load_with_warnings(path: &Path) -> PublishResult<(PublishConfig, Vec<ConfigWarning>)> {
    if !path.is_file() {
        return Err(PublishError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let (config, unknown) = parse(&content).map_err(|message| PublishError::config(path, message))?;

    config
        .validate()
        .map_err(|message| PublishError::config(path, message))?;

    let warnings = unknown
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((config, warnings))
}

/// Parse manifest text, returning the config and the paths of ignored keys.
pub fn parse(content: &str) -> Result<(PublishConfig, Vec<String>), String> {
    // Manifests written by Windows editors often start with a BOM.
    let content = content.trim_start_matches('\u{feff}');

    let mut unknown_paths = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(content);
    let config: PublishConfig = serde_ignored::deserialize(&mut deserializer, |p| {
        // Option layers render as `?` segments: "Upload.?.Hots"
        unknown_paths.push(p.to_string().replace(".?", ""));
    })
    .map_err(|e| e.to_string())?;
    deserializer.end().map_err(|e| e.to_string())?;

    Ok((config, unknown_paths))
}
