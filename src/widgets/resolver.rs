//! Widget Asset Resolution
//!
//! Locates the HTML document for a logical widget name inside the build
//! output directory. Lookup order, first hit wins:
//!
//! 1. `<dir>/<name>.html`
//! 2. `<dir>/<name>-*.html`, taking the lexicographically greatest file name
//! 3. `<dir>/index.html`
//!
//! Rule 2 treats the greatest name as the latest build. Hashed suffixes do not
//! sort by build time, so this only picks a deterministic variant.

use super::error::WidgetAssetError;
use std::path::{Path, PathBuf};

/// File name of the shared default document
const INDEX_DOCUMENT: &str = "index.html";

/// Which lookup rule produced a resolved asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    Exact,
    SuffixedVariant,
    IndexFallback,
}

/// A located widget document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub path: PathBuf,
    pub rule: ResolutionRule,
}

/// Resolves logical widget names against a build output directory.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    assets_dir: PathBuf,
}

impl AssetResolver {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Directory searched by this resolver
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Finds the HTML file for `logical_name`.
    pub async fn resolve(&self, logical_name: &str) -> Result<ResolvedAsset, WidgetAssetError> {
        let exact = self.assets_dir.join(format!("{logical_name}.html"));
        if is_file(&exact).await {
            return Ok(ResolvedAsset {
                path: exact,
                rule: ResolutionRule::Exact,
            });
        }

        if let Some(path) = self.find_latest_variant(logical_name).await {
            return Ok(ResolvedAsset {
                path,
                rule: ResolutionRule::SuffixedVariant,
            });
        }

        let index = self.assets_dir.join(INDEX_DOCUMENT);
        if is_file(&index).await {
            return Ok(ResolvedAsset {
                path: index,
                rule: ResolutionRule::IndexFallback,
            });
        }

        Err(WidgetAssetError::NotFound {
            name: logical_name.to_string(),
            dir: self.assets_dir.clone(),
        })
    }

    /// Finds `<name>-*.html` variants and returns the greatest by file name.
    async fn find_latest_variant(&self, logical_name: &str) -> Option<PathBuf> {
        // A missing directory just means there are no variants.
        let mut entries = tokio::fs::read_dir(&self.assets_dir).await.ok()?;

        let prefix = format!("{logical_name}-");
        let mut variants = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if matches_variant(name, &prefix) && is_file(&path).await {
                variants.push(path);
            }
        }

        variants.sort();
        variants.pop()
    }
}

fn matches_variant(file_name: &str, prefix: &str) -> bool {
    file_name.len() >= prefix.len() + ".html".len()
        && file_name.starts_with(prefix)
        && file_name.ends_with(".html")
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str) {
        fs::write(dir.join(name), format!("<!-- {name} -->")).unwrap();
    }

    #[tokio::test]
    async fn exact_match_wins_over_variants_and_index() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "flights.html");
        write(dir.path(), "flights-zzz.html");
        write(dir.path(), "index.html");

        let resolved = AssetResolver::new(dir.path()).resolve("flights").await.unwrap();

        assert_eq!(resolved.path, dir.path().join("flights.html"));
        assert_eq!(resolved.rule, ResolutionRule::Exact);
    }

    #[tokio::test]
    async fn greatest_suffixed_variant_is_picked() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "flights-2c1f.html");
        write(dir.path(), "flights-a93b.html");
        write(dir.path(), "flights-0ffe.html");
        write(dir.path(), "index.html");

        let resolver = AssetResolver::new(dir.path());
        for _ in 0..3 {
            let resolved = resolver.resolve("flights").await.unwrap();
            assert_eq!(resolved.path, dir.path().join("flights-a93b.html"));
            assert_eq!(resolved.rule, ResolutionRule::SuffixedVariant);
        }
    }

    #[tokio::test]
    async fn variants_of_other_widgets_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "flightsx-1.html");
        write(dir.path(), "flights-1.css");
        write(dir.path(), "index.html");

        let resolved = AssetResolver::new(dir.path()).resolve("flights").await.unwrap();

        assert_eq!(resolved.rule, ResolutionRule::IndexFallback);
    }

    #[tokio::test]
    async fn index_document_is_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.html");

        let resolved = AssetResolver::new(dir.path()).resolve("flights").await.unwrap();

        assert_eq!(resolved.path, dir.path().join("index.html"));
        assert_eq!(resolved.rule, ResolutionRule::IndexFallback);
    }

    #[tokio::test]
    async fn missing_asset_reports_name_and_directory() {
        let dir = tempfile::tempdir().unwrap();

        let err = AssetResolver::new(dir.path())
            .resolve("flights")
            .await
            .unwrap_err();

        match err {
            WidgetAssetError::NotFound { name, dir: searched } => {
                assert_eq!(name, "flights");
                assert_eq!(searched, dir.path());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("dist");

        let err = AssetResolver::new(&missing).resolve("index").await.unwrap_err();

        assert!(matches!(err, WidgetAssetError::NotFound { .. }));
    }
}
