//! In-memory task collection and category filtering.
//!
//! The store lives for the process lifetime; insertion order is display
//! order. Mutations are limited to appending, toggling the completion
//! flag, and removal. User-visible side effects (notifications) belong
//! to the caller so the store stays testable on its own.

use chrono::Local;

use crate::task::{Task, TaskCategory, TaskDraft, TaskId};

/// Ordered in-memory collection of tasks.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a task built from the draft, assigning the next id and the
    /// insertion timestamp. No dedup check; always succeeds.
    pub fn add(&mut self, draft: TaskDraft) -> TaskId {
        self.next_id += 1;
        let id = TaskId::from(self.next_id);
        self.tasks.push(Task {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            time: draft.time,
            completed: false,
            created_at: Local::now(),
            category: draft.category,
        });
        id
    }

    /// Flip the completion flag on the matching task. Returns whether a
    /// task matched; an unknown id is a silent no-op.
    pub fn toggle_completed(&mut self, id: &TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == *id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove and return the matching task; `None` on an unknown id.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == *id)?;
        Some(self.tasks.remove(index))
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The subsequence of tasks matching the filter, in store order.
    /// Pure; an empty result is a valid state, not an error.
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }
}

/// Category selection for the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every task, regardless of category.
    #[default]
    All,
    /// Only tasks filed under the given category.
    Only(TaskCategory),
}

impl CategoryFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category == *category,
        }
    }

    /// The next filter in display order, wrapping back to `All`.
    pub fn next(self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Only(TaskCategory::ALL[0]),
            CategoryFilter::Only(category) => {
                let position = TaskCategory::ALL.iter().position(|c| *c == category);
                match position {
                    Some(i) if i + 1 < TaskCategory::ALL.len() => {
                        CategoryFilter::Only(TaskCategory::ALL[i + 1])
                    }
                    _ => CategoryFilter::All,
                }
            }
        }
    }

    /// The previous filter in display order, wrapping to the last
    /// category.
    pub fn prev(self) -> CategoryFilter {
        match self {
            CategoryFilter::All => {
                CategoryFilter::Only(TaskCategory::ALL[TaskCategory::ALL.len() - 1])
            }
            CategoryFilter::Only(category) => {
                let position = TaskCategory::ALL.iter().position(|c| *c == category);
                match position {
                    Some(0) | None => CategoryFilter::All,
                    Some(i) => CategoryFilter::Only(TaskCategory::ALL[i - 1]),
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add(
            TaskDraft::new("Team Meeting", TaskCategory::Work)
                .with_description("Discuss project milestones")
                .with_time("2:00 PM"),
        );
        store.add(
            TaskDraft::new("Review Documentation", TaskCategory::Work)
                .with_description("Update API documentation")
                .with_time("4:30 PM"),
        );
        store.add(
            TaskDraft::new("Gym Session", TaskCategory::Health)
                .with_description("Cardio and strength training")
                .with_time("6:00 PM"),
        );
        store
    }

    #[test]
    fn add_preserves_call_order_and_count() {
        let mut store = TaskStore::new();
        for i in 0..5 {
            store.add(TaskDraft::new(format!("task {i}"), TaskCategory::Other));
        }
        assert_eq!(store.len(), 5);
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["task 0", "task 1", "task 2", "task 3", "task 4"]);
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut store = seeded_store();
        let ids: Vec<_> = store.tasks().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        // ids keep advancing after a removal
        store.remove(&TaskId::from("3"));
        let id = store.add(TaskDraft::new("next", TaskCategory::Other));
        assert_eq!(id.as_str(), "4");
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut store = seeded_store();
        let id = TaskId::from("1");
        let before = store.get(&id).unwrap().completed;
        assert!(store.toggle_completed(&id));
        assert_eq!(store.get(&id).unwrap().completed, !before);
        assert!(store.toggle_completed(&id));
        assert_eq!(store.get(&id).unwrap().completed, before);
    }

    #[test]
    fn unknown_id_is_a_silent_noop() {
        let mut store = seeded_store();
        let missing = TaskId::from("99");
        assert!(!store.toggle_completed(&missing));
        assert!(store.remove(&missing).is_none());
        assert_eq!(store.len(), 3);
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Team Meeting", "Review Documentation", "Gym Session"]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut store = seeded_store();
        let removed = store.remove(&TaskId::from("2")).unwrap();
        assert_eq!(removed.title, "Review Documentation");
        let ids: Vec<_> = store.tasks().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn filter_all_returns_everything_in_order() {
        let store = seeded_store();
        let all = store.filtered(CategoryFilter::All);
        assert_eq!(all.len(), store.len());
        for (filtered, task) in all.iter().zip(store.tasks()) {
            assert_eq!(filtered.id, task.id);
        }
    }

    #[test]
    fn filter_by_category_returns_matching_subsequence() {
        let store = seeded_store();
        let work = store.filtered(CategoryFilter::Only(TaskCategory::Work));
        assert_eq!(work.len(), 2);
        assert_eq!(work[0].title, "Team Meeting");
        assert_eq!(work[1].title, "Review Documentation");

        let health = store.filtered(CategoryFilter::Only(TaskCategory::Health));
        assert_eq!(health.len(), 1);
        assert_eq!(health[0].title, "Gym Session");

        // empty result is a valid state, not an error
        let shopping = store.filtered(CategoryFilter::Only(TaskCategory::Shopping));
        assert!(shopping.is_empty());
    }

    #[test]
    fn filter_cycle_visits_every_category_and_wraps() {
        let mut filter = CategoryFilter::All;
        let mut seen = Vec::new();
        for _ in 0..=TaskCategory::ALL.len() {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(seen.last(), Some(&CategoryFilter::All));
        for category in TaskCategory::ALL {
            assert!(seen.contains(&CategoryFilter::Only(category)));
        }
        // prev undoes next
        assert_eq!(CategoryFilter::All.next().prev(), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::Only(TaskCategory::Other).next(),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::All.prev(),
            CategoryFilter::Only(TaskCategory::Other)
        );
    }
}
