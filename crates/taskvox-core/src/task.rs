//! Task data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Closed set of categories a task can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Personal,
    Shopping,
    Health,
    Other,
}

impl TaskCategory {
    /// Every category, in display order.
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Work,
        TaskCategory::Personal,
        TaskCategory::Shopping,
        TaskCategory::Health,
        TaskCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Work => "Work",
            TaskCategory::Personal => "Personal",
            TaskCategory::Shopping => "Shopping",
            TaskCategory::Health => "Health",
            TaskCategory::Other => "Other",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" => Ok(TaskCategory::Work),
            "personal" => Ok(TaskCategory::Personal),
            "shopping" => Ok(TaskCategory::Shopping),
            "health" => Ok(TaskCategory::Health),
            "other" => Ok(TaskCategory::Other),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Error for parsing an unrecognized category name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown task category: {0}")]
pub struct UnknownCategory(pub String);

/// Opaque unique task identifier. Uniqueness within the live collection
/// is the only invariant; the store assigns these from a monotonic
/// counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        TaskId(n.to_string())
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scheduled item in the user's list. Only `completed` is ever mutated
/// after insertion; everything else is fixed at creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display string like "2:00 PM"; never parsed or validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Local>,
    pub category: TaskCategory,
}

/// A task minus its identity: what a transcriber extracts and what the
/// store accepts, assigning `id` and `created_at` at insertion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub category: TaskCategory,
}

impl TaskDraft {
    /// Create a draft with just a title and category.
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            title: title.into(),
            description: None,
            time: None,
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("work".parse::<TaskCategory>().unwrap(), TaskCategory::Work);
        assert_eq!(
            "Health".parse::<TaskCategory>().unwrap(),
            TaskCategory::Health
        );
        assert!("errands".parse::<TaskCategory>().is_err());
    }

    #[test]
    fn category_display_round_trips() {
        for category in TaskCategory::ALL {
            let parsed: TaskCategory = category.label().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn draft_builders_set_fields() {
        let draft = TaskDraft::new("Team Meeting", TaskCategory::Work)
            .with_description("Discuss project milestones")
            .with_time("2:00 PM");
        assert_eq!(draft.title, "Team Meeting");
        assert_eq!(draft.description.as_deref(), Some("Discuss project milestones"));
        assert_eq!(draft.time.as_deref(), Some("2:00 PM"));
    }
}
