//! Startup errors
//!
//! Everything here is fatal: the binary logs it and exits non-zero.
//! Per-request failures are shaped into protocol results instead.

use crate::config::ConfigError;
use crate::offers::CatalogError;
use crate::widgets::WidgetAssetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    WidgetAsset(#[from] WidgetAssetError),

    #[error("offer catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
