//! Widget HTML Cache
//!
//! Memoizes resolve + inline per logical asset name for the lifetime of the
//! process. Concurrent lookups of the same name share one build.

use super::{error::WidgetAssetError, inliner::inline_assets, resolver::AssetResolver};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Process-lifetime cache of self-contained widget documents.
#[derive(Debug)]
pub struct WidgetCache {
    resolver: AssetResolver,
    /// One cell per logical name; the cell serializes the build for its key.
    entries: DashMap<String, Arc<OnceCell<String>>>,
    /// Resolve + inline runs started, successful or not
    builds: AtomicUsize,
}

impl WidgetCache {
    pub fn new(resolver: AssetResolver) -> Self {
        Self {
            resolver,
            entries: DashMap::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// Returns the inlined HTML for `logical_name`, building it on first use.
    ///
    /// A failed build is not cached, so a later call retries.
    pub async fn get_or_build(&self, logical_name: &str) -> Result<String, WidgetAssetError> {
        // Clone the cell out so no map shard stays locked across the await.
        let cell = self
            .entries
            .entry(logical_name.to_string())
            .or_default()
            .clone();

        if let Some(html) = cell.get() {
            tracing::trace!(asset = logical_name, "widget cache hit");
            return Ok(html.clone());
        }

        let html = cell.get_or_try_init(|| self.build(logical_name)).await?;
        Ok(html.clone())
    }

    /// Number of names with a cached document
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of resolve + inline runs so far
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    async fn build(&self, logical_name: &str) -> Result<String, WidgetAssetError> {
        self.builds.fetch_add(1, Ordering::Relaxed);
        let resolved = self.resolver.resolve(logical_name).await?;
        tracing::info!(
            asset = logical_name,
            path = %resolved.path.display(),
            rule = ?resolved.rule,
            "resolved widget asset"
        );

        let html = tokio::fs::read_to_string(&resolved.path)
            .await
            .map_err(|source| WidgetAssetError::Read {
                path: resolved.path.clone(),
                source,
            })?;

        Ok(inline_assets(&html, self.resolver.assets_dir()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join_all;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("index.html"),
            r#"<script type="module" src="/main.js"></script>"#,
        )
        .unwrap();
        fs::write(dir.path().join("main.js"), "export {};").unwrap();
        dir
    }

    #[tokio::test]
    async fn builds_inlined_document() {
        let dir = fixture();
        let cache = WidgetCache::new(AssetResolver::new(dir.path()));

        let html = cache.get_or_build("index").await.unwrap();

        assert_eq!(html, "<script type=\"module\">\nexport {};\n</script>");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn serves_cached_document_after_files_change() {
        let dir = fixture();
        let cache = WidgetCache::new(AssetResolver::new(dir.path()));

        let first = cache.get_or_build("index").await.unwrap();
        fs::remove_file(dir.path().join("index.html")).unwrap();
        let second = cache.get_or_build("index").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn concurrent_lookups_agree() {
        let dir = fixture();
        let cache = WidgetCache::new(AssetResolver::new(dir.path()));

        let results = join_all((0..8).map(|_| cache.get_or_build("index"))).await;

        let first = results[0].as_ref().unwrap();
        assert!(results.iter().all(|r| r.as_ref().unwrap() == first));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.build_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_tasks_share_one_build() {
        let dir = fixture();
        let cache = Arc::new(WidgetCache::new(AssetResolver::new(dir.path())));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get_or_build("index").await.unwrap() })
            })
            .collect();
        let results = join_all(handles).await;

        assert!(results.iter().all(|r| r.as_ref().unwrap() == results[0].as_ref().unwrap()));
        assert_eq!(cache.build_count(), 1);

        cache.get_or_build("index").await.unwrap();
        assert_eq!(cache.build_count(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = WidgetCache::new(AssetResolver::new(dir.path()));

        assert!(cache.get_or_build("index").await.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.build_count(), 1);

        fs::write(dir.path().join("index.html"), "<p>ready</p>").unwrap();
        assert_eq!(cache.get_or_build("index").await.unwrap(), "<p>ready</p>");
    }
}
