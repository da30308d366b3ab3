//! Error types for the retrieval workflow.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the retrieval workflow.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Unrecognized model profile name.
    #[error("unknown model profile: {0}")]
    UnknownProfile(String),

    /// File position outside the retained file list.
    #[error("no codebase file at position {position} (codebase has {count} files)")]
    FilePosition { position: usize, count: usize },

    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] semsearch_embeddings::EmbeddingError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
