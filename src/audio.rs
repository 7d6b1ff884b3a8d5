//! Scratch audio recording.
//!
//! The recorder buffers PCM pushed by the caller and commits it to a fresh
//! scratch file on finish. The committed file is what
//! [`MemoryStore::attach_audio`](crate::store::MemoryStore::attach_audio)
//! consumes; the store never looks inside it.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Recording sample rate, matching the original capture settings.
pub const SAMPLE_RATE: u32 = 44_100;
/// Interleaved stereo.
pub const CHANNELS: u16 = 2;

pub struct AudioRecorder {
    scratch_dir: PathBuf,
    buffered_pcm: Vec<i16>,
}

impl AudioRecorder {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Result<Self> {
        let scratch_dir = scratch_dir.into();
        std::fs::create_dir_all(&scratch_dir).map_err(|e| StoreError::io(&scratch_dir, e))?;
        Ok(Self {
            scratch_dir,
            buffered_pcm: Vec::new(),
        })
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Append interleaved samples from the capture callback.
    pub fn push_samples(&mut self, pcm: &[i16]) {
        self.buffered_pcm.extend_from_slice(pcm);
    }

    pub fn is_empty(&self) -> bool {
        self.buffered_pcm.is_empty()
    }

    /// Commit the buffered samples to a uniquely named scratch file and
    /// return its path. The buffer is drained; the recorder can be reused.
    pub fn finish(&mut self) -> Result<PathBuf> {
        let path = self
            .scratch_dir
            .join(format!("recording-{}.wav", Uuid::new_v4()));
        let spec = WavSpec {
            channels: CHANNELS,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(&path, spec)
            .map_err(|e| StoreError::io(&path, std::io::Error::other(e)))?;
        let pcm = std::mem::take(&mut self.buffered_pcm);
        debug!(samples = pcm.len(), path = %path.display(), "committing recording");
        for sample in pcm {
            writer
                .write_sample(sample)
                .map_err(|e| StoreError::io(&path, std::io::Error::other(e)))?;
        }
        writer
            .finalize()
            .map_err(|e| StoreError::io(&path, std::io::Error::other(e)))?;

        info!(path = %path.display(), "recording finished");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finish_writes_unique_scratch_files() {
        let dir = TempDir::new().unwrap();
        let mut recorder = AudioRecorder::new(dir.path()).unwrap();

        recorder.push_samples(&[0, 100, -100, 200]);
        let first = recorder.finish().unwrap();
        assert!(first.is_file());
        assert!(recorder.is_empty());

        recorder.push_samples(&[1, 2]);
        let second = recorder.finish().unwrap();
        assert_ne!(first, second);

        let reader = hound::WavReader::open(&first).unwrap();
        assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
        assert_eq!(reader.spec().channels, CHANNELS);
        assert_eq!(reader.len(), 4);
    }
}
