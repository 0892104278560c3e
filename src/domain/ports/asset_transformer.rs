//! AssetTransformer port - opaque per-extension minification

use std::path::Path;

/// Text assets that have a minify transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

impl AssetKind {
    /// Kind by file extension, compared case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "css" => Some(Self::Stylesheet),
            "js" => Some(Self::Script),
            _ => None,
        }
    }
}

/// Rewrites asset source text; `Err` carries the transform's message.
pub trait AssetTransformer {
    fn transform(&self, kind: AssetKind, source: &str) -> Result<String, String>;
}
