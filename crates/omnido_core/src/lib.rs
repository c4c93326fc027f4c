//! Core state store for OmniDo.
//! This crate owns tasks, kanban projects, habits, notes and mind-maps, and is
//! the single source of truth for their invariants and persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::calendar::{day_key, local_day, parse_day_key};
pub use model::habit::{Habit, HabitPatch};
pub use model::mindmap::{
    MindMap, MindMapNode, MindMapPatch, NodePatch, NodeStatus, Position, DEFAULT_ROOT_POSITION,
};
pub use model::note::{Note, NoteDraft, NotePatch};
pub use model::project::{KanbanColumn, ParseColumnError, Project, ProjectPatch, ProjectTask};
pub use model::task::{Task, TaskPatch};
pub use model::{Entity, EntityId};
pub use repo::codec::{decode_collection, encode_collection, CodecError, CodecResult};
pub use repo::kv_repo::{
    CollectionKey, KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use service::agenda::{
    day_agenda, pending_count_on, upcoming_deadlines, DayAgenda, DeadlineReminder, TimeLeft,
    DEFAULT_REMINDER_LIMIT,
};
pub use service::kanban::ProjectProgress;
pub use service::note_projection::{derive_markdown_preview, MarkdownPreview};
pub use service::store::{EntityStore, PersistError, PersistResult};
pub use service::timeline::{build_timeline, DayBucket, Timeline};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
