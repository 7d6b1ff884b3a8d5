//! Flat-directory memory store.
//!
//! Existence of a record is keyed entirely off its `.thumb` artifact:
//! enumeration scans for that suffix, creation commits it last, and removing
//! it makes the record disappear even if siblings remain.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::media;
use crate::store::record::{MemoryRecord, RecordId};

pub struct MemoryStore {
    root: PathBuf,
    // Serializes directory scans against create/attach. A single capture
    // cycle drives these serially anyway; the mutex only guards a filter
    // or enumerate racing a write.
    scan_lock: Mutex<()>,
}

impl MemoryStore {
    /// Open (creating if needed) the storage root.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self {
            root,
            scan_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn thumbnail_path(&self, id: &RecordId) -> PathBuf {
        self.root.join(id.thumbnail_name())
    }

    pub fn image_path(&self, id: &RecordId) -> PathBuf {
        self.root.join(id.image_name())
    }

    pub fn audio_path(&self, id: &RecordId) -> PathBuf {
        self.root.join(id.audio_name())
    }

    pub fn transcript_path(&self, id: &RecordId) -> PathBuf {
        self.root.join(id.transcript_name())
    }

    /// A record exists iff its thumbnail artifact does.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.thumbnail_path(id).exists()
    }

    /// List every record in the store, ordered by base name.
    pub fn enumerate(&self) -> Result<Vec<RecordId>> {
        let _guard = self.scan_lock.lock().unwrap();
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let name = entry.file_name();
            if let Some(id) = name.to_str().and_then(RecordId::from_thumbnail_name) {
                ids.push(id);
            }
        }
        ids.sort();
        debug!(count = ids.len(), "enumerated memories");
        Ok(ids)
    }

    /// Write the full image and its thumbnail under a fresh base name.
    ///
    /// The thumbnail is committed last. If it cannot be written the record
    /// never becomes visible, and the orphaned full image is cleaned up.
    pub fn create_record(&self, image: &DynamicImage) -> Result<RecordId> {
        let id = RecordId::generate();
        let _guard = self.scan_lock.lock().unwrap();

        let image_path = self.root.join(id.image_name());
        let jpeg = media::encode_jpeg(image)?;
        fs::write(&image_path, jpeg).map_err(|e| StoreError::io(&image_path, e))?;

        let thumb_path = self.root.join(id.thumbnail_name());
        let committed = media::encode_jpeg(&media::thumbnail(image)).and_then(|bytes| {
            fs::write(&thumb_path, bytes).map_err(|e| StoreError::io(&thumb_path, e))
        });
        if let Err(e) = committed {
            warn!(%id, error = %e, "thumbnail write failed; discarding capture");
            let _ = fs::remove_file(&image_path);
            return Err(e);
        }

        info!(%id, "memory record created");
        Ok(id)
    }

    /// Move a finished recording into place as the record's audio annotation,
    /// replacing any previous one.
    ///
    /// The source is validated first so a failed attach leaves the previous
    /// annotation untouched. The replacement itself is remove-old-then-move,
    /// matching the store's accepted crash window.
    pub fn attach_audio(&self, id: &RecordId, source: &Path) -> Result<()> {
        let _guard = self.scan_lock.lock().unwrap();
        if !self.contains(id) {
            return Err(StoreError::RecordNotFound(id.to_string()));
        }
        if !source.is_file() {
            return Err(StoreError::io(
                source,
                std::io::Error::new(std::io::ErrorKind::NotFound, "recording source missing"),
            ));
        }

        let dest = self.audio_path(id);
        if dest.exists() {
            fs::remove_file(&dest).map_err(|e| StoreError::io(&dest, e))?;
        }
        if fs::rename(source, &dest).is_err() {
            // Scratch dir may live on another filesystem.
            fs::copy(source, &dest).map_err(|e| StoreError::io(&dest, e))?;
            fs::remove_file(source).map_err(|e| StoreError::io(source, e))?;
        }

        info!(%id, "audio annotation attached");
        Ok(())
    }

    /// Overwrite the record's transcript artifact.
    pub fn attach_transcript(&self, id: &RecordId, text: &str) -> Result<()> {
        let _guard = self.scan_lock.lock().unwrap();
        if !self.contains(id) {
            return Err(StoreError::RecordNotFound(id.to_string()));
        }
        let path = self.transcript_path(id);
        fs::write(&path, text).map_err(|e| StoreError::io(&path, e))?;
        info!(%id, chars = text.len(), "transcript attached");
        Ok(())
    }

    /// Read the transcript, if one has been attached.
    pub fn transcript(&self, id: &RecordId) -> Result<Option<String>> {
        if !self.contains(id) {
            return Err(StoreError::RecordNotFound(id.to_string()));
        }
        let path = self.transcript_path(id);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::io(&path, e))
    }

    /// Snapshot of which artifacts the record currently has.
    pub fn record(&self, id: &RecordId) -> Result<MemoryRecord> {
        if !self.contains(id) {
            return Err(StoreError::RecordNotFound(id.to_string()));
        }
        let audio = self.audio_path(id);
        let transcript = self.transcript_path(id);
        Ok(MemoryRecord {
            id: id.clone(),
            thumbnail: self.thumbnail_path(id),
            image: self.image_path(id),
            audio: audio.exists().then_some(audio),
            transcript: transcript.exists().then_some(transcript),
        })
    }
}
