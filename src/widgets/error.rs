//! Widget asset errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating or reading a widget's HTML asset.
///
/// Raised only while the registry is being built; the server refuses to
/// start when any widget is missing its document.
#[derive(Debug, Error)]
pub enum WidgetAssetError {
    #[error(
        "widget HTML for \"{name}\" not found in {}; build the app bundle before starting the server",
        dir.display()
    )]
    NotFound { name: String, dir: PathBuf },

    #[error("failed to read widget asset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
