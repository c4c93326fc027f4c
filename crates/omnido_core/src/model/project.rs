//! Kanban project model.
//!
//! # Responsibility
//! - Define projects and the project-owned task cards.
//! - Define the closed set of kanban columns.
//!
//! # Invariants
//! - A project task always sits in exactly one of `todo|doing|done`.
//! - Card order is the order of `Project::tasks`; there is no separate rank.

use super::{new_entity_id, Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed kanban workflow column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KanbanColumn {
    /// Not started.
    Todo,
    /// Being worked on.
    Doing,
    /// Finished.
    Done,
}

impl KanbanColumn {
    /// Columns in board order.
    pub const ALL: [KanbanColumn; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// Stable wire name of the column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }
}

impl Display for KanbanColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a kanban column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColumnError(pub String);

impl Display for ParseColumnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown kanban column `{}`; expected todo|doing|done",
            self.0
        )
    }
}

impl Error for ParseColumnError {}

impl FromStr for KanbanColumn {
    type Err = ParseColumnError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(ParseColumnError(value.to_string())),
        }
    }
}

/// One kanban card owned by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTask {
    pub id: EntityId,
    pub content: String,
    /// Serialized as `columnId` to match saved collections.
    #[serde(rename = "columnId")]
    pub column: KanbanColumn,
}

impl ProjectTask {
    pub fn new(content: impl Into<String>, column: KanbanColumn) -> Self {
        Self {
            id: new_entity_id(),
            content: content.into(),
            column,
        }
    }
}

impl Entity for ProjectTask {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Kanban project with its ordered cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub tasks: Vec<ProjectTask>,
}

impl Project {
    /// Creates an empty project with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_tasks(name, Vec::new())
    }

    pub fn with_tasks(name: impl Into<String>, tasks: Vec<ProjectTask>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            tasks,
        }
    }

    pub fn task(&self, task_id: EntityId) -> Option<&ProjectTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub(crate) fn task_mut(&mut self, task_id: EntityId) -> Option<&mut ProjectTask> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }
}

impl Entity for Project {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
}

impl ProjectPatch {
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
    }
}
