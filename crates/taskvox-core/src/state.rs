//! Recording lifecycle state types.

/// The current state of the voice-capture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// Idle, not recording
    #[default]
    Idle,
    /// Actively recording audio
    Recording,
    /// Turning the finished recording into a task
    Processing,
}

impl RecorderState {
    /// Short status label for display.
    pub fn label(&self) -> &'static str {
        match self {
            RecorderState::Idle => "Ready",
            RecorderState::Recording => "Listening",
            RecorderState::Processing => "Processing",
        }
    }
}
