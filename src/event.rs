//! Events flowing from the processing pipeline back into the UI loop.

use taskvox_transcribe::Extraction;

/// Completions produced by background processing, drained by the UI loop
/// once per tick.
#[derive(Debug)]
pub enum AppEvent {
    /// A recording finished processing and produced a task.
    ExtractionReady(Extraction),
    /// Processing failed; the payload has been discarded.
    ProcessingFailed(String),
}
