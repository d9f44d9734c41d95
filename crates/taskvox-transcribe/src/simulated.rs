//! Simulated task extraction backend.
//!
//! Stands in for a real transcription service: waits a configurable
//! delay, then returns a canned extraction. Both the delay and the
//! content are injected here rather than baked into the controller, so
//! swapping in a real backend touches nothing but construction.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use taskvox_core::{TaskCategory, TaskDraft};
use tracing::debug;

use crate::{Extraction, Result, TaskTranscriber, TranscribeError};

const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Backend that fabricates a fixed extraction after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedTranscriber {
    delay: Duration,
    transcript: String,
    draft: TaskDraft,
    failure: Option<String>,
}

impl SimulatedTranscriber {
    /// Create a backend with the given delay and the stock extraction.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            transcript: "I've scheduled a meeting with the design team at 3 PM to discuss \
                         the latest UI updates."
                .to_string(),
            draft: TaskDraft::new("New meeting with the design team", TaskCategory::Work)
                .with_description("Discuss the latest UI updates")
                .with_time("3:00 PM"),
            failure: None,
        }
    }

    /// Create a backend that fails every request, for exercising the
    /// processing-failure path.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Override the fabricated extraction.
    pub fn with_extraction(mut self, transcript: impl Into<String>, draft: TaskDraft) -> Self {
        self.transcript = transcript.into();
        self.draft = draft;
        self
    }
}

impl Default for SimulatedTranscriber {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl TaskTranscriber for SimulatedTranscriber {
    async fn transcribe(&self, audio: Bytes) -> Result<Extraction> {
        if audio.is_empty() {
            return Err(TranscribeError::EmptyRecording);
        }

        debug!(
            audio_bytes = audio.len(),
            delay = ?self.delay,
            "Simulating task extraction"
        );

        tokio::time::sleep(self.delay).await;

        if let Some(message) = &self.failure {
            return Err(TranscribeError::TranscriptionFailed(message.clone()));
        }

        Ok(Extraction {
            transcript: self.transcript.clone(),
            draft: self.draft.clone(),
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio() -> Bytes {
        Bytes::from_static(b"RIFFfakewav")
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_after_configured_delay() {
        let transcriber = SimulatedTranscriber::new(Duration::from_millis(250));
        let started = tokio::time::Instant::now();
        let extraction = transcriber.transcribe(audio()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
        assert!(!extraction.transcript.is_empty());
        assert_eq!(extraction.draft.category, TaskCategory::Work);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_extraction_is_returned_verbatim() {
        let draft = TaskDraft::new("Buy groceries", TaskCategory::Shopping).with_time("5:00 PM");
        let transcriber = SimulatedTranscriber::new(Duration::ZERO)
            .with_extraction("Pick up groceries at five.", draft);
        let extraction = transcriber.transcribe(audio()).await.unwrap();
        assert_eq!(extraction.transcript, "Pick up groceries at five.");
        assert_eq!(extraction.draft.title, "Buy groceries");
        assert_eq!(extraction.draft.category, TaskCategory::Shopping);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_backend_errors() {
        let transcriber = SimulatedTranscriber::failing("service unavailable");
        let err = transcriber.transcribe(audio()).await.unwrap_err();
        assert!(matches!(err, TranscribeError::TranscriptionFailed(_)));
    }

    #[tokio::test]
    async fn empty_audio_is_rejected() {
        let transcriber = SimulatedTranscriber::new(Duration::ZERO);
        let err = transcriber.transcribe(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, TranscribeError::EmptyRecording));
    }
}
