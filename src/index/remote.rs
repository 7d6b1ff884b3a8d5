//! HTTP client for an external search index service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::index::{Index, IndexEntry};
use crate::store::RecordId;

/// Talks to a search index service exposing `/index`, `/query` and `/count`.
///
/// Any transport or service error surfaces as [`StoreError::IndexUnavailable`].
pub struct RemoteSearchIndex {
    client: Client,
    url: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    ids: Vec<RecordId>,
}

#[derive(Deserialize)]
struct CountResponse {
    count: usize,
}

impl RemoteSearchIndex {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    fn unavailable(e: impl std::fmt::Display) -> StoreError {
        StoreError::IndexUnavailable(e.to_string())
    }
}

#[async_trait]
impl Index for RemoteSearchIndex {
    async fn index(&self, entry: IndexEntry) -> Result<()> {
        debug!(id = %entry.id, "indexing memory remotely");
        self.client
            .post(format!("{}/index", self.url))
            .json(&entry)
            .send()
            .await
            .map_err(Self::unavailable)?
            .error_for_status()
            .map_err(Self::unavailable)?;
        Ok(())
    }

    async fn query(&self, text: &str) -> Result<Vec<RecordId>> {
        let response: QueryResponse = self
            .client
            .post(format!("{}/query", self.url))
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(Self::unavailable)?
            .error_for_status()
            .map_err(Self::unavailable)?
            .json()
            .await
            .map_err(Self::unavailable)?;
        Ok(response.ids)
    }

    async fn count(&self) -> Result<usize> {
        let response: CountResponse = self
            .client
            .get(format!("{}/count", self.url))
            .send()
            .await
            .map_err(Self::unavailable)?
            .error_for_status()
            .map_err(Self::unavailable)?
            .json()
            .await
            .map_err(Self::unavailable)?;
        Ok(response.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_service_is_index_unavailable() {
        // Port 9 (discard) is not serving HTTP.
        let index = RemoteSearchIndex::new("http://127.0.0.1:9".to_string());
        let err = index.query("anything").await.unwrap_err();
        assert!(matches!(err, StoreError::IndexUnavailable(_)));
    }
}
