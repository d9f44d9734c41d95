//! Core types and configuration for taskvox.
//!
//! This crate provides platform-agnostic types that can be used across
//! all taskvox sub-crates.

mod config;
mod state;
mod store;
mod task;

pub use config::{Config, ConfigManager};
pub use state::RecorderState;
pub use store::{CategoryFilter, TaskStore};
pub use task::{Task, TaskCategory, TaskDraft, TaskId, UnknownCategory};

/// Application name
pub const APP_NAME: &str = "taskvox";

/// Pretty application name for display
pub const APP_NAME_PRETTY: &str = "Taskvox";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
