//! Kanban operations over one project's cards.
//!
//! # Invariants
//! - Moving a card rewrites its column only; list order is never changed.
//! - Column membership is a filter over `Project::tasks`, not a stored list.
//! - Unknown card ids are reported as `false`/`None`, never as errors.

use crate::model::project::{KanbanColumn, Project, ProjectTask};
use crate::model::EntityId;

/// Appends a card in `column` and returns its id.
pub fn add_task(project: &mut Project, content: impl Into<String>, column: KanbanColumn) -> EntityId {
    let task = ProjectTask::new(content, column);
    let id = task.id;
    project.tasks.push(task);
    id
}

/// Moves a card to `to`. Returns whether the card exists.
pub fn move_task(project: &mut Project, task_id: EntityId, to: KanbanColumn) -> bool {
    match project.task_mut(task_id) {
        Some(task) => {
            task.column = to;
            true
        }
        None => false,
    }
}

/// Replaces a card's content. Returns whether the card exists.
pub fn update_task_content(
    project: &mut Project,
    task_id: EntityId,
    content: impl Into<String>,
) -> bool {
    match project.task_mut(task_id) {
        Some(task) => {
            task.content = content.into();
            true
        }
        None => false,
    }
}

/// Removes a card. Returns whether a card was removed.
pub fn remove_task(project: &mut Project, task_id: EntityId) -> bool {
    let before = project.tasks.len();
    project.tasks.retain(|task| task.id != task_id);
    project.tasks.len() != before
}

/// Cards in `column`, in project list order.
pub fn column_tasks(project: &Project, column: KanbanColumn) -> Vec<&ProjectTask> {
    project
        .tasks
        .iter()
        .filter(|task| task.column == column)
        .collect()
}

/// Card count per column, in board order.
pub fn column_counts(project: &Project) -> [(KanbanColumn, usize); 3] {
    KanbanColumn::ALL.map(|column| {
        let count = project
            .tasks
            .iter()
            .filter(|task| task.column == column)
            .count();
        (column, count)
    })
}

/// Completion summary of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectProgress {
    pub done: usize,
    pub total: usize,
}

impl ProjectProgress {
    pub fn of(project: &Project) -> Self {
        Self {
            done: column_tasks(project, KanbanColumn::Done).len(),
            total: project.tasks.len(),
        }
    }

    /// Done fraction in `0.0..=1.0`; `0.0` for an empty project.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }

    /// Whole percent, truncated.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}
