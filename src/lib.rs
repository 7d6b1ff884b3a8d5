//! Happy Days memory engine
//!
//! Captured photos become "memories": sibling files in one flat directory
//! sharing a base name — `{base}.thumb` (existence marker), `{base}.jpg`,
//! optional `{base}.m4a` audio annotation and `{base}.txt` transcript.
//! The crate provides:
//! - Flat-directory memory store keyed off the thumbnail artifact
//! - Image decode + thumbnail resize for capture
//! - Scratch audio recording and a speech-to-text seam
//! - Full-text transcript search (in-process or remote index)
//! - An axum HTTP surface over the pipeline

pub mod audio;
pub mod config;
pub mod error;
pub mod index;
pub mod media;
pub mod memories;
pub mod server;
pub mod store;
pub mod transcribe;

// Re-exports for convenience
pub use config::HappyDaysConfig;
pub use error::StoreError;
pub use index::{Index, SearchIndex};
pub use memories::Memories;
pub use store::{MemoryRecord, MemoryStore, RecordId};
pub use transcribe::Transcriber;
