//! Error types for the persistence layer.

use std::path::PathBuf;

use typedex_core::BuildError;

/// Errors that can occur while reading or writing resources.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A file or directory operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A type name cannot be used as a file name.
    #[error("type name {type_name:?} is not a plain slug")]
    UnsafeTypeName {
        /// The rejected name.
        type_name: String,
    },

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored source dataset failed record-set validation.
    #[error("stored source dataset is invalid: {0}")]
    Integrity(#[from] BuildError),
}
