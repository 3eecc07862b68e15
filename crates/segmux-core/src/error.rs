//! Error types for segmux-core

use thiserror::Error;

/// Result type alias for segmux operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the segmux multiplexer and server
#[derive(Debug, Error)]
pub enum Error {
    /// Pattern rejected at registration
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] segmux_router::PatternError),

    /// Trie could not be rendered
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error (native only)
    #[cfg(feature = "native")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Hyper error (native only)
    #[cfg(feature = "native")]
    #[error("HTTP error: {0}")]
    Hyper(#[from] hyper::Error),

    /// Invalid response head
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),
}
