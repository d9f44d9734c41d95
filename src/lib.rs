// Re-export from sub-crates
pub use taskvox_audio::{Capture, CaptureHandle, Recorder, RecorderError, RecordingHandle};
pub use taskvox_core::{
    APP_NAME, APP_NAME_PRETTY, CategoryFilter, Config, ConfigManager, DEFAULT_LOG_LEVEL,
    RecorderState, Task, TaskCategory, TaskDraft, TaskId, TaskStore,
};
pub use taskvox_transcribe::{
    Extraction, SimulatedTranscriber, TaskTranscriber, TranscribeError,
};

// App-specific modules
pub mod app;
pub mod event;
pub mod notify;
pub mod pipeline;
pub mod ui;

// Version from this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
