//! Error types for document operations.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the document store.
///
/// Per-id lookups never produce these; they report a missing target through
/// `bool`/`Option` returns instead. Only missing aggregate context is fatal.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A layer was created before any canvas existed.
    #[error("Canvas not initialized")]
    CanvasNotInitialized,
    /// A project operation ran without a current project.
    #[error("No project to save")]
    NoProject,
    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
