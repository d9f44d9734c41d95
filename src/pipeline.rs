//! Processing pipeline for finished recordings. Accepts the finalized
//! audio payload, runs the task-extraction backend on a background
//! runtime, and reports completions to the UI loop as [`AppEvent`]s.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Instant;

use bytes::Bytes;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::event::AppEvent;
use taskvox_transcribe::{Extraction, TaskTranscriber};

type ExtractionTask = tokio::task::JoinHandle<taskvox_transcribe::Result<Extraction>>;

/// Drives task extraction off the UI thread. One recording is in flight
/// at most; the caller's state machine enforces that.
pub struct TranscribePipeline {
    runtime: Runtime,
    transcriber: Arc<dyn TaskTranscriber>,
    extraction_handles: mpsc::UnboundedSender<ExtractionTask>,
}

impl TranscribePipeline {
    /// Create a new pipeline instance around the given backend.
    pub fn new(
        transcriber: Arc<dyn TaskTranscriber>,
        event_sender: Sender<AppEvent>,
    ) -> anyhow::Result<Self> {
        // Set up tokio runtime
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        // Start the results collector.
        let extraction_handles = start_results_collector(&runtime, event_sender);

        Ok(Self {
            runtime,
            transcriber,
            extraction_handles,
        })
    }

    /// Submits a finished recording to the processing pipeline. This is
    /// non-blocking; completion arrives later as an [`AppEvent`].
    pub fn submit(&self, audio: Vec<u8>) -> anyhow::Result<()> {
        info!(
            bytes = audio.len(),
            backend = self.transcriber.name(),
            "audio submitted"
        );

        let transcriber = self.transcriber.clone();
        let audio = Bytes::from(audio);

        // Spawn a new task to handle the extraction
        let handle = self.runtime.spawn(extract(transcriber, audio));

        // Send the extraction task to the collector
        self.extraction_handles.send(handle)?;
        Ok(())
    }
}

/// Helper to call the extraction backend and collect some basic stats.
async fn extract(
    transcriber: Arc<dyn TaskTranscriber>,
    audio: Bytes,
) -> taskvox_transcribe::Result<Extraction> {
    let before = Instant::now();
    let result = transcriber.transcribe(audio).await;
    info!(duration = ?before.elapsed(), ok = result.is_ok(), "extraction completed");
    result
}

fn start_results_collector(
    runtime: &Runtime,
    event_sender: Sender<AppEvent>,
) -> mpsc::UnboundedSender<ExtractionTask> {
    let (task_sender, mut task_receiver) = tokio::sync::mpsc::unbounded_channel::<ExtractionTask>();

    runtime.spawn(async move {
        while let Some(task) = task_receiver.recv().await {
            let event = match task.await {
                Ok(Ok(extraction)) => {
                    info!("Transcript: {}", extraction.transcript);
                    AppEvent::ExtractionReady(extraction)
                }
                Ok(Err(e)) => {
                    // Error-level logging happens when the UI handles the
                    // event, so the failure surfaces exactly once.
                    debug!("extraction failed: {:?}", e);
                    AppEvent::ProcessingFailed(e.to_string())
                }
                Err(e) => {
                    debug!("extraction task panicked: {:?}", e);
                    AppEvent::ProcessingFailed("processing task failed".to_string())
                }
            };
            event_sender.send(event).ok();
        }

        debug!("results collector task ended");
    });

    task_sender
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::time::Duration;

    use taskvox_transcribe::SimulatedTranscriber;

    use super::*;

    #[test]
    fn submit_delivers_extraction_through_collector() {
        let (tx, rx) = channel();
        let pipeline = TranscribePipeline::new(
            Arc::new(SimulatedTranscriber::new(Duration::ZERO)),
            tx,
        )
        .unwrap();

        pipeline.submit(b"RIFFfakewav".to_vec()).unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        match event {
            AppEvent::ExtractionReady(extraction) => {
                assert!(!extraction.transcript.is_empty());
                assert!(!extraction.draft.title.is_empty());
            }
            other => panic!("expected an extraction, got {other:?}"),
        }
    }

    #[test]
    fn submit_reports_backend_failure() {
        let (tx, rx) = channel();
        let pipeline = TranscribePipeline::new(
            Arc::new(SimulatedTranscriber::failing("service unavailable")),
            tx,
        )
        .unwrap();

        pipeline.submit(b"RIFFfakewav".to_vec()).unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, AppEvent::ProcessingFailed(_)));
    }

    #[test]
    fn completions_arrive_in_submission_order() {
        let (tx, rx) = channel();
        let pipeline = TranscribePipeline::new(
            Arc::new(SimulatedTranscriber::new(Duration::ZERO)),
            tx,
        )
        .unwrap();

        pipeline.submit(b"RIFFfirst".to_vec()).unwrap();
        pipeline.submit(b"RIFFsecond".to_vec()).unwrap();

        for _ in 0..2 {
            let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert!(matches!(event, AppEvent::ExtractionReady(_)));
        }
    }
}
