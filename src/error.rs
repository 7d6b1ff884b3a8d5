//! Error taxonomy for the memory store and its collaborators.
//!
//! Every variant is recoverable; nothing here should terminate the process.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the store, the media helpers and the search seam.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Image bytes could not be decoded or re-encoded.
    #[error("image encoding failed: {reason}")]
    EncodingFailed { reason: String },

    /// A filesystem read, write or move failed.
    #[error("i/o failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record's `.thumb` existence marker is missing.
    #[error("no such memory: {0}")]
    RecordNotFound(String),

    /// The full-text index could not be reached or answered with an error.
    #[error("search index unavailable: {0}")]
    IndexUnavailable(String),

    /// A newer filter query was issued while this one was in flight.
    #[error("search query superseded by a newer one")]
    Superseded,
}

impl StoreError {
    pub fn encoding(reason: impl Into<String>) -> Self {
        Self::EncodingFailed {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
