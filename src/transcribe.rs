//! Speech-to-text seam.
//!
//! Transcription is performed by an external speech service; the crate only
//! ships the trait and an HTTP client for it.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// Turns a finished audio annotation into final text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> Result<String>;
}

/// Client for a speech service taking raw audio bytes and answering
/// `{ "text": … }`.
pub struct HttpTranscriber {
    client: Client,
    url: String,
    locale: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl HttpTranscriber {
    pub fn new(url: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            locale: locale.into(),
        }
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String> {
        let bytes = tokio::fs::read(audio)
            .await
            .with_context(|| format!("reading recording {}", audio.display()))?;
        debug!(bytes = bytes.len(), locale = %self.locale, "sending audio to speech service");

        let response: TranscriptionResponse = self
            .client
            .post(&self.url)
            .query(&[("locale", self.locale.as_str())])
            .body(bytes)
            .send()
            .await
            .context("speech service unreachable")?
            .error_for_status()
            .context("speech service rejected the recording")?
            .json()
            .await
            .context("malformed speech service response")?;

        info!(chars = response.text.len(), "transcription received");
        Ok(response.text)
    }
}
