//! Desktop notifications: the app's toast surface.
//!
//! Two producers feed it: explicit success toasts ("Task created") and a
//! tracing layer that mirrors WARN/ERROR events, so anything surfaced as
//! an error in the log is also user-visible.

use notify_rust::{Notification, Urgency};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber, error};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::{APP_NAME, APP_NAME_PRETTY};

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn urgency(self) -> Urgency {
        match self {
            Severity::Info => Urgency::Low,
            Severity::Warning => Urgency::Normal,
            Severity::Error => Urgency::Critical,
        }
    }
}

/// Send a fire-and-forget system notification. Failures are logged, not
/// propagated; there is nothing the caller can do about a missing
/// notification daemon.
pub fn notify(severity: Severity, summary: &str, body: &str) {
    Notification::new()
        .appname(APP_NAME)
        .summary(&format!("{} - {}", APP_NAME_PRETTY, summary))
        .body(body)
        .urgency(severity.urgency())
        .show()
        .map_err(|e| error!("Failed to send notification: {}", e))
        .ok();
}

/// Visitor to extract the message field from tracing events.
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }
}

/// Tracing layer that mirrors warnings and errors as notifications.
#[derive(Debug, Default)]
pub struct NotificationLayer {}

impl NotificationLayer {
    pub fn new() -> Self {
        Self {}
    }
}

fn should_notify(level: Level) -> Option<(Severity, &'static str)> {
    match level {
        Level::ERROR => Some((Severity::Error, "error")),
        Level::WARN => Some((Severity::Warning, "warning")),
        _ => None,
    }
}

impl<S: Subscriber> Layer<S> for NotificationLayer {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        let level = *event.metadata().level();

        if let Some((severity, summary)) = should_notify(level) {
            let mut visitor = MessageVisitor { message: None };
            event.record(&mut visitor);

            if let Some(message) = visitor.message {
                notify(severity, summary, &message);
            }
        }
    }
}
