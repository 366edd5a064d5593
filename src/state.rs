//! Application State
//!
//! The immutable snapshot built once at startup and shared by every
//! request handler.

use crate::error::StartupError;
use crate::mcp::dispatcher::McpDispatcher;
use crate::offers::OfferStore;
use crate::widgets::{AssetResolver, WidgetCache, WidgetRegistry, WidgetSeed};
use std::path::Path;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Widget registry and offer store. Neither changes after construction.
#[derive(Debug)]
pub struct AppState {
    pub widgets: WidgetRegistry,
    pub offers: OfferStore,
}

impl AppState {
    pub fn new(widgets: WidgetRegistry, offers: OfferStore) -> Self {
        Self { widgets, offers }
    }

    /// Builds the registry for `seeds` from `assets_dir` and seeds the
    /// offer catalog.
    pub async fn load(assets_dir: &Path, seeds: &[WidgetSeed]) -> Result<Self, StartupError> {
        tracing::info!(assets_dir = %assets_dir.display(), "building widget registry");

        let cache = WidgetCache::new(AssetResolver::new(assets_dir));
        let widgets = WidgetRegistry::build(seeds, &cache).await?;
        let offers = OfferStore::seeded()?;

        tracing::info!(
            widgets = widgets.len(),
            offers = offers.len(),
            "application state ready"
        );
        Ok(Self::new(widgets, offers))
    }

    /// Protocol dispatcher over this snapshot
    pub fn dispatcher(&self) -> McpDispatcher<'_> {
        McpDispatcher::new(&self.widgets, &self.offers)
    }
}
