//! Application state: the task list, the category filter, and the
//! recording lifecycle state machine.
//!
//! The state machine owns the only path into Recording and Processing,
//! so "one recording at a time" holds no matter how the trigger is
//! invoked. Every failure path lands back in Idle; none is fatal.

use tracing::{debug, error, info, warn};

use crate::event::AppEvent;
use crate::notify::{self, Severity};
use crate::pipeline::TranscribePipeline;
use taskvox_audio::{Capture, CaptureHandle};
use taskvox_core::{
    CategoryFilter, Config, RecorderState, Task, TaskCategory, TaskDraft, TaskStore,
};

pub struct App {
    store: TaskStore,
    filter: CategoryFilter,
    selected: usize,
    state: RecorderState,
    last_transcript: Option<String>,
    capture: Box<dyn Capture>,
    active_recording: Option<Box<dyn CaptureHandle>>,
    pipeline: TranscribePipeline,
    notifications: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(capture: Box<dyn Capture>, pipeline: TranscribePipeline, config: &Config) -> Self {
        Self {
            store: TaskStore::new(),
            filter: CategoryFilter::All,
            selected: 0,
            state: RecorderState::Idle,
            last_transcript: None,
            capture,
            active_recording: None,
            pipeline,
            notifications: config.notifications(),
            should_quit: false,
        }
    }

    /// Seed the demo schedule shown on first launch.
    pub fn seed_demo_tasks(&mut self) {
        self.store.add(
            TaskDraft::new("Team Meeting", TaskCategory::Work)
                .with_description("Discuss project milestones")
                .with_time("2:00 PM"),
        );
        self.store.add(
            TaskDraft::new("Review Documentation", TaskCategory::Work)
                .with_description("Update API documentation")
                .with_time("4:30 PM"),
        );
        self.store.add(
            TaskDraft::new("Gym Session", TaskCategory::Health)
                .with_description("Cardio and strength training")
                .with_time("6:00 PM"),
        );
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn last_transcript(&self) -> Option<&str> {
        self.last_transcript.as_deref()
    }

    /// Tasks visible under the current filter, in store order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.store.filtered(self.filter)
    }

    /// Index of the selected task within the visible list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The record button. Idle starts a recording, Recording stops one
    /// and hands the payload to processing, Processing ignores the
    /// trigger entirely.
    pub fn toggle_recording(&mut self) {
        match self.state {
            RecorderState::Idle => match self.capture.start() {
                Ok(handle) => {
                    self.active_recording = Some(handle);
                    self.state = RecorderState::Recording;
                    info!("Recording started");
                    self.toast(
                        Severity::Info,
                        "Recording started",
                        "Speak clearly into your microphone",
                    );
                }
                Err(e) => {
                    // Device failure never leaves Idle.
                    error!("Could not access microphone. Please check permissions. ({e})");
                }
            },
            RecorderState::Recording => {
                let Some(mut recording) = self.active_recording.take() else {
                    // Recording without a handle should be unreachable,
                    // but resetting beats wedging the machine.
                    warn!("Recording state had no active capture handle");
                    self.state = RecorderState::Idle;
                    return;
                };
                match recording.finish() {
                    Ok(Some(data)) if !data.is_empty() => match self.pipeline.submit(data) {
                        Ok(()) => self.state = RecorderState::Processing,
                        Err(e) => {
                            error!("Failed to submit audio for processing: {e:?}");
                            self.state = RecorderState::Idle;
                        }
                    },
                    Ok(_) => {
                        warn!("Recording finished but no audio was captured");
                        self.state = RecorderState::Idle;
                    }
                    Err(e) => {
                        error!("Failed to finish recording: {e}");
                        self.state = RecorderState::Idle;
                    }
                }
            }
            RecorderState::Processing => {
                debug!("recording trigger ignored while processing");
            }
        }
    }

    /// Apply a pipeline completion.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ExtractionReady(extraction) => {
                let id = self.store.add(extraction.draft);
                info!(%id, "Task created from recording");
                self.last_transcript = Some(extraction.transcript);
                self.state = RecorderState::Idle;
                self.toast(
                    Severity::Info,
                    "Task created",
                    "New task has been added to your schedule",
                );
            }
            AppEvent::ProcessingFailed(message) => {
                self.state = RecorderState::Idle;
                error!("Could not process the recording: {message}");
            }
        }
    }

    pub fn select_next(&mut self) {
        let len = self.visible_tasks().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Flip completion on the selected task.
    pub fn toggle_selected_completed(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle_completed(&id);
        }
    }

    /// Delete the selected task and confirm it to the user.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(task) = self.store.remove(&id) {
            info!(id = %task.id, title = %task.title, "Task deleted");
            self.toast(
                Severity::Info,
                "Task deleted",
                "The task has been removed from your schedule",
            );
        }
        self.clamp_selection();
    }

    pub fn next_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected = 0;
    }

    pub fn prev_filter(&mut self) {
        self.filter = self.filter.prev();
        self.selected = 0;
    }

    fn selected_id(&self) -> Option<taskvox_core::TaskId> {
        self.visible_tasks().get(self.selected).map(|t| t.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn toast(&self, severity: Severity, summary: &str, body: &str) {
        if self.notifications {
            notify::notify(severity, summary, body);
        }
    }
}
