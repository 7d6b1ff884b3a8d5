//! Record identifiers and artifact naming.

use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Suffix of the thumbnail artifact; its presence defines the record.
pub const THUMBNAIL_SUFFIX: &str = "thumb";
/// Suffix of the full-resolution image artifact.
pub const IMAGE_SUFFIX: &str = "jpg";
/// Suffix of the audio annotation artifact.
pub const AUDIO_SUFFIX: &str = "m4a";
/// Suffix of the transcript artifact.
pub const TRANSCRIPT_SUFFIX: &str = "txt";

/// Base file name shared by all artifacts of one memory.
///
/// Derived from capture time; treated as opaque everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Fresh identifier for a capture happening now.
    ///
    /// Subsecond precision keeps back-to-back captures from colliding.
    pub fn generate() -> Self {
        let now = Utc::now();
        Self(format!(
            "memory-{}.{:09}",
            now.timestamp(),
            now.timestamp_subsec_nanos()
        ))
    }

    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Parse an untrusted base name, e.g. from a URL path segment.
    ///
    /// Rejects anything that could resolve outside the flat storage root.
    pub fn parse(base: &str) -> Option<Self> {
        if base.is_empty()
            || base.contains(['/', '\\', '\0'])
            || base.contains("..")
        {
            return None;
        }
        Some(Self(base.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the base name from a directory entry, if it is a thumbnail.
    pub fn from_thumbnail_name(file_name: &str) -> Option<Self> {
        file_name
            .strip_suffix(&format!(".{}", THUMBNAIL_SUFFIX))
            .map(|base| Self(base.to_string()))
    }

    pub fn thumbnail_name(&self) -> String {
        format!("{}.{}", self.0, THUMBNAIL_SUFFIX)
    }

    pub fn image_name(&self) -> String {
        format!("{}.{}", self.0, IMAGE_SUFFIX)
    }

    pub fn audio_name(&self) -> String {
        format!("{}.{}", self.0, AUDIO_SUFFIX)
    }

    pub fn transcript_name(&self) -> String {
        format!("{}.{}", self.0, TRANSCRIPT_SUFFIX)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of one memory's on-disk artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryRecord {
    pub id: RecordId,
    pub thumbnail: PathBuf,
    pub image: PathBuf,
    /// Present only when an audio annotation has been attached.
    pub audio: Option<PathBuf>,
    /// Present only after a successful transcription.
    pub transcript: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names_share_the_base() {
        let id = RecordId::new("memory-1590000000.123");
        assert_eq!(id.thumbnail_name(), "memory-1590000000.123.thumb");
        assert_eq!(id.image_name(), "memory-1590000000.123.jpg");
        assert_eq!(id.audio_name(), "memory-1590000000.123.m4a");
        assert_eq!(id.transcript_name(), "memory-1590000000.123.txt");
    }

    #[test]
    fn test_parse_rejects_path_escapes() {
        assert!(RecordId::parse("memory-1590000000.123").is_some());
        assert!(RecordId::parse("").is_none());
        assert!(RecordId::parse("..").is_none());
        assert!(RecordId::parse("../elsewhere").is_none());
        assert!(RecordId::parse("nested/memory-1.000").is_none());
        assert!(RecordId::parse("nested\\memory-1.000").is_none());
    }

    #[test]
    fn test_thumbnail_name_roundtrip() {
        let id = RecordId::generate();
        let recovered = RecordId::from_thumbnail_name(&id.thumbnail_name()).unwrap();
        assert_eq!(recovered, id);
        assert!(RecordId::from_thumbnail_name(&id.image_name()).is_none());
    }
}
