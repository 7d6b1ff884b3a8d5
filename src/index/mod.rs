//! Full-text search over transcripts.
//!
//! The store delegates matching to an index keyed by record identifier and
//! transcript text. Two backends behind one trait: an in-process map and a
//! remote HTTP index service, selected by configuration.

pub mod local;
pub mod remote;

pub use local::LocalSearchIndex;
pub use remote::RemoteSearchIndex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::HappyDaysConfig;
use crate::error::Result;
use crate::store::RecordId;

/// One searchable memory: identifier, transcript text, thumbnail reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: RecordId,
    pub text: String,
    pub thumbnail: Option<PathBuf>,
}

/// Trait for full-text indexes answering case-insensitive substring queries.
#[async_trait]
pub trait Index: Send + Sync {
    /// Add or replace the entry for a record.
    async fn index(&self, entry: IndexEntry) -> Result<()>;

    /// Identifiers whose indexed text contains `text` (case-insensitive).
    async fn query(&self, text: &str) -> Result<Vec<RecordId>>;

    /// Number of indexed records.
    async fn count(&self) -> Result<usize>;
}

/// Configured index backend.
pub enum SearchIndex {
    Local(LocalSearchIndex),
    Remote(RemoteSearchIndex),
}

impl SearchIndex {
    pub fn from_config(config: &HappyDaysConfig) -> Self {
        if config.use_remote_index {
            tracing::info!(url = %config.index_url, "using remote search index");
            SearchIndex::Remote(RemoteSearchIndex::new(config.index_url.clone()))
        } else {
            tracing::info!("using in-process search index");
            SearchIndex::Local(LocalSearchIndex::new())
        }
    }
}

#[async_trait]
impl Index for SearchIndex {
    async fn index(&self, entry: IndexEntry) -> Result<()> {
        match self {
            Self::Local(i) => i.index(entry).await,
            Self::Remote(i) => i.index(entry).await,
        }
    }

    async fn query(&self, text: &str) -> Result<Vec<RecordId>> {
        match self {
            Self::Local(i) => i.query(text).await,
            Self::Remote(i) => i.query(text).await,
        }
    }

    async fn count(&self) -> Result<usize> {
        match self {
            Self::Local(i) => i.count().await,
            Self::Remote(i) => i.count().await,
        }
    }
}
