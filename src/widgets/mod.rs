//! Widget Domain Module
//!
//! This module turns build output on disk into the widgets the server
//! advertises:
//! - Asset resolution with suffix and index fallbacks
//! - Inlining of module scripts and stylesheets
//! - A per-name cache of finished documents
//! - The frozen registry of widget descriptors

pub mod cache;
pub mod error;
pub mod inliner;
pub mod models;
pub mod registry;
pub mod resolver;

// Re-export commonly used types for convenience
pub use cache::WidgetCache;
pub use error::WidgetAssetError;
pub use models::{WidgetDescriptor, WidgetSeed, FLIGHT_OFFERS_WIDGET_ID, WIDGET_SEEDS};
pub use registry::WidgetRegistry;
pub use resolver::AssetResolver;
