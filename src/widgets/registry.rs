//! Widget Registry
//!
//! The frozen set of widgets served by this process, indexed by tool
//! identifier and by template URI.

use super::{
    cache::WidgetCache,
    error::WidgetAssetError,
    models::{WidgetDescriptor, WidgetSeed},
};
use futures_util::future::try_join_all;
use std::collections::HashMap;

/// Immutable widget catalog. Both indices point into the same sequence.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: Vec<WidgetDescriptor>,
    by_identifier: HashMap<String, usize>,
    by_template_uri: HashMap<String, usize>,
}

impl WidgetRegistry {
    /// Builds every seeded widget through `cache`.
    ///
    /// Widgets are built concurrently; the first asset failure aborts the
    /// whole registry.
    pub async fn build(
        seeds: &[WidgetSeed],
        cache: &WidgetCache,
    ) -> Result<Self, WidgetAssetError> {
        let widgets = try_join_all(seeds.iter().map(|seed| async move {
            let html = cache.get_or_build(seed.asset_name).await?;
            Ok::<_, WidgetAssetError>(WidgetDescriptor::from_seed(seed, html))
        }))
        .await?;

        Ok(Self::from_descriptors(widgets))
    }

    /// Indexes already-built descriptors. Later duplicates shadow earlier ones.
    pub fn from_descriptors(widgets: Vec<WidgetDescriptor>) -> Self {
        let by_identifier = widgets
            .iter()
            .enumerate()
            .map(|(index, widget)| (widget.identifier.clone(), index))
            .collect();
        let by_template_uri = widgets
            .iter()
            .enumerate()
            .map(|(index, widget)| (widget.template_uri.clone(), index))
            .collect();

        Self {
            widgets,
            by_identifier,
            by_template_uri,
        }
    }

    pub fn by_identifier(&self, identifier: &str) -> Option<&WidgetDescriptor> {
        self.by_identifier
            .get(identifier)
            .map(|&index| &self.widgets[index])
    }

    pub fn by_template_uri(&self, uri: &str) -> Option<&WidgetDescriptor> {
        self.by_template_uri
            .get(uri)
            .map(|&index| &self.widgets[index])
    }

    /// Widgets in registration order
    pub fn iter(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
