//! Standalone task (todo) model.
//!
//! # Invariants
//! - Tasks are independent of projects.
//! - `deadline` is an absolute instant; day bucketing happens in projections.

use super::{new_entity_id, Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One todo item with a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub deadline: DateTime<Utc>,
    pub completed: bool,
}

impl Entity for Task {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Task {
    /// Creates a pending task with a fresh id.
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            id: new_entity_id(),
            title: title.into(),
            deadline,
            completed: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Partial update for a task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPatch};
    use chrono::{TimeZone, Utc};

    #[test]
    fn patch_only_touches_provided_fields() {
        let deadline = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut task = Task::new("draft", deadline);
        let id = task.id;

        TaskPatch {
            title: Some("final".to_string()),
            ..TaskPatch::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.id, id);
        assert_eq!(task.title, "final");
        assert_eq!(task.deadline, deadline);
        assert!(!task.completed);
    }
}
