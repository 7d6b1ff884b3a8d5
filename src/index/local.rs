//! In-process search index.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::index::{Index, IndexEntry};
use crate::store::RecordId;

/// Substring index held in memory, keyed by record identifier.
///
/// Only records with a transcript are ever present, so a query can never
/// return a memory without one.
#[derive(Default)]
pub struct LocalSearchIndex {
    entries: Arc<RwLock<HashMap<RecordId, IndexEntry>>>,
}

impl LocalSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Index for LocalSearchIndex {
    async fn index(&self, entry: IndexEntry) -> Result<()> {
        debug!(id = %entry.id, chars = entry.text.len(), "indexing memory");
        self.entries.write().await.insert(entry.id.clone(), entry);
        Ok(())
    }

    async fn query(&self, text: &str) -> Result<Vec<RecordId>> {
        let needle = text.to_lowercase();
        let entries = self.entries.read().await;
        let mut ids: Vec<RecordId> = entries
            .values()
            .filter(|e| e.text.to_lowercase().contains(&needle))
            .map(|e| e.id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(base: &str, text: &str) -> IndexEntry {
        IndexEntry {
            id: RecordId::new(base),
            text: text.to_string(),
            thumbnail: None,
        }
    }

    #[tokio::test]
    async fn test_query_is_case_insensitive_substring() {
        let index = LocalSearchIndex::new();
        index.index(entry("memory-1", "Walking In The Park")).await.unwrap();
        index.index(entry("memory-2", "birthday dinner")).await.unwrap();

        let hits = index.query("the park").await.unwrap();
        assert_eq!(hits, vec![RecordId::new("memory-1")]);

        let hits = index.query("DINNER").await.unwrap();
        assert_eq!(hits, vec![RecordId::new("memory-2")]);

        assert!(index.query("beach").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reindex_replaces_entry() {
        let index = LocalSearchIndex::new();
        index.index(entry("memory-1", "old words")).await.unwrap();
        index.index(entry("memory-1", "new words")).await.unwrap();

        assert_eq!(index.count().await.unwrap(), 1);
        assert!(index.query("old").await.unwrap().is_empty());
        assert_eq!(index.query("new").await.unwrap().len(), 1);
    }
}
