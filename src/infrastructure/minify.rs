//! Minifier-backed asset transformer

use crate::domain::ports::{AssetKind, AssetTransformer};

/// Minifies stylesheets and scripts with the `minifier` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinifierTransformer;

impl AssetTransformer for MinifierTransformer {
    fn transform(&self, kind: AssetKind, source: &str) -> Result<String, String> {
        match kind {
            AssetKind::Stylesheet => minifier::css::minify(source)
                .map(|minified| minified.to_string())
                .map_err(|e| e.to_string()),
            AssetKind::Script => Ok(minifier::js::minify(source).to_string()),
        }
    }
}
