//! Deck building error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::layout::LayoutError;

/// Result type for deck operations.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors raised by renderer collaborators.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer does not know how to produce this asset.
    #[error("Unsupported asset '{0}'")]
    UnsupportedAsset(String),

    /// The rendering backend failed.
    #[error("Rendering failed: {0}")]
    Backend(String),

    /// Plan serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading or planning a deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Definition file could not be read.
    #[error("Failed to read deck definition {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Definition is not valid YAML for the schema.
    #[error("Invalid deck definition: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Definition parsed but is inconsistent.
    #[error("Invalid deck definition: {0}")]
    Invalid(String),

    /// A slide needs a generated asset but no asset renderer is configured.
    #[error("Slide {slide} requests a generated asset but no asset renderer is available")]
    NoAssetRenderer { slide: usize },

    /// Layout failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A renderer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
