//! Memories pipeline.
//!
//! Glues the store, the speech seam and the search index into the capture
//! flow: pick a photo → record an annotation → transcribe → index → filter.
//! Listings always re-query the store; nothing mirrors the directory in
//! memory.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::index::{Index, IndexEntry};
use crate::media;
use crate::store::{MemoryRecord, MemoryStore, RecordId};
use crate::transcribe::Transcriber;

pub struct Memories {
    store: Arc<MemoryStore>,
    index: Arc<dyn Index>,
    transcriber: Arc<dyn Transcriber>,
    // Bumped by every non-empty filter query; a query whose generation is
    // stale by completion time has been superseded.
    query_generation: AtomicU64,
}

impl Memories {
    pub fn new(
        store: Arc<MemoryStore>,
        index: Arc<dyn Index>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            store,
            index,
            transcriber,
            query_generation: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Decode a captured photo and create its record.
    pub fn capture(&self, image_bytes: &[u8]) -> Result<RecordId> {
        let image = media::decode_image(image_bytes)?;
        self.store.create_record(&image)
    }

    /// Attach a finished recording, then transcribe and index it.
    ///
    /// Transcription and indexing failures are logged and non-fatal: the
    /// audio annotation (and, past that point, the transcript) stays
    /// committed. Returns the transcript text when one was produced.
    pub async fn annotate(&self, id: &RecordId, recording: &Path) -> Result<Option<String>> {
        self.store.attach_audio(id, recording)?;

        let audio = self.store.audio_path(id);
        let text = match self.transcriber.transcribe(&audio).await {
            Ok(text) => text,
            Err(e) => {
                warn!(%id, error = %e, "transcription failed; audio annotation kept");
                return Ok(None);
            }
        };

        self.store.attach_transcript(id, &text)?;
        let entry = IndexEntry {
            id: id.clone(),
            text: text.clone(),
            thumbnail: Some(self.store.thumbnail_path(id)),
        };
        if let Err(e) = self.index.index(entry).await {
            warn!(%id, error = %e, "indexing failed; transcript kept");
        }
        Ok(Some(text))
    }

    /// Filter memories by transcript text.
    ///
    /// An empty query is the full enumeration. A non-empty query runs against
    /// the index; if a newer query is issued while this one is in flight, this
    /// one finishes as [`StoreError::Superseded`] instead of delivering stale
    /// results.
    pub async fn search(&self, query: &str) -> Result<Vec<RecordId>> {
        // Every filter call supersedes whatever is in flight, the empty one
        // included; otherwise a cleared search box could still deliver stale
        // results from the previous query.
        let generation = self.query_generation.fetch_add(1, Ordering::SeqCst) + 1;
        if query.is_empty() {
            return self.store.enumerate();
        }

        let ids = self.index.query(query).await?;
        if self.query_generation.load(Ordering::SeqCst) != generation {
            return Err(StoreError::Superseded);
        }
        Ok(ids)
    }

    /// Record snapshot plus its transcript text, if any.
    pub fn open(&self, id: &RecordId) -> Result<(MemoryRecord, Option<String>)> {
        let record = self.store.record(id)?;
        let transcript = self.store.transcript(id)?;
        Ok((record, transcript))
    }

    /// Replay every stored transcript into the index.
    ///
    /// The in-process index starts empty, so this runs once at boot.
    pub async fn reindex(&self) -> Result<usize> {
        let mut indexed = 0;
        for id in self.store.enumerate()? {
            if let Some(text) = self.store.transcript(&id)? {
                let entry = IndexEntry {
                    id: id.clone(),
                    text,
                    thumbnail: Some(self.store.thumbnail_path(&id)),
                };
                self.index.index(entry).await?;
                indexed += 1;
            }
        }
        info!(indexed, "transcripts replayed into the index");
        Ok(indexed)
    }
}
