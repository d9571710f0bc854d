//! Error type for the fallible edges of the crate: reading config and
//! catalog files, and encoding layout fingerprints.
//!
//! Degenerate geometry, artwork exhaustion and failed asset loads are not
//! errors; they show up as absent output or as an [`crate::assets::AssetState`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode layout: {0}")]
    Encode(#[from] bincode::Error),

    #[error("invalid gallery config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}
