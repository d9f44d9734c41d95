//! Task extraction backend library for taskvox.
//!
//! This crate provides a trait-based abstraction for turning a finished
//! voice recording into a new task. The only backend in this version is
//! a simulated one; a real speech-to-text service would implement the
//! same trait and be swapped in at the application boundary.

mod simulated;

use async_trait::async_trait;
pub use bytes::Bytes;
pub use simulated::SimulatedTranscriber;
use taskvox_core::TaskDraft;
use thiserror::Error;

/// Errors that can occur during task extraction.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("empty recording")]
    EmptyRecording,

    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
}

/// Result type for transcription operations.
pub type Result<T> = std::result::Result<T, TranscribeError>;

/// What a backend produces from a recording: the transcript sentence for
/// display and the task extracted from it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub transcript: String,
    pub draft: TaskDraft,
}

/// Trait for task extraction backends.
///
/// Implement this trait to add new backends (a real transcription
/// service, a local model, etc.)
#[async_trait]
pub trait TaskTranscriber: Send + Sync {
    /// Turn raw audio into a transcript and a task draft.
    ///
    /// # Arguments
    /// * `audio` - Raw audio data (WAV) as reference-counted bytes.
    ///             Use `Bytes::from(vec)` to convert from Vec<u8>
    ///             (zero-copy); cloning Bytes is O(1).
    async fn transcribe(&self, audio: Bytes) -> Result<Extraction>;

    /// Returns the name of this backend for logging/debugging.
    fn name(&self) -> &str;
}
