//! Entity store: sole owner of the five productivity collections.
//!
//! # Responsibility
//! - Load every collection on open, falling back to seed data.
//! - Expose explicit command methods that mutate one collection and then
//!   write that whole collection through the key/value repository.
//! - Serve derived read projections computed from current state.
//!
//! # Invariants
//! - Every public mutating call ends with exactly one write of the owning
//!   collection, including calls that turn out to be no-ops.
//! - Unknown ids never produce errors; the call is a silent no-op.
//! - A failed write never rolls back memory: in-process state stays
//!   authoritative, the failure is logged, counted and kept for the caller.
//! - Mutation requires `&mut self`, so writes to a collection are serialized.

use crate::model::habit::{Habit, HabitPatch};
use crate::model::mindmap::{MindMap, MindMapNode, MindMapPatch, NodePatch, Position};
use crate::model::note::{Note, NoteDraft, NotePatch};
use crate::model::project::{KanbanColumn, Project, ProjectPatch};
use crate::model::task::{Task, TaskPatch};
use crate::model::{Entity, EntityId};
use crate::repo::codec::{decode_collection, encode_collection, CodecError, CodecResult};
use crate::repo::kv_repo::{CollectionKey, KvRepository, RepoError};
use crate::service::agenda::{self, DayAgenda, DeadlineReminder};
use crate::service::kanban::{self, ProjectProgress};
use crate::service::note_projection;
use crate::service::seed;
use crate::service::timeline::{build_timeline, Timeline};
use crate::service::tree;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PersistResult<T> = Result<T, PersistError>;

/// A collection could not be written through.
#[derive(Debug)]
pub enum PersistError {
    /// The in-memory collection could not be serialized.
    Encode {
        collection: CollectionKey,
        source: CodecError,
    },
    /// The repository refused or failed the write.
    Write {
        collection: CollectionKey,
        source: RepoError,
    },
}

impl PersistError {
    pub fn collection(&self) -> CollectionKey {
        match self {
            Self::Encode { collection, .. } | Self::Write { collection, .. } => *collection,
        }
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode { collection, source } => {
                write!(f, "failed to encode `{collection}`: {source}")
            }
            Self::Write { collection, source } => {
                write!(f, "failed to write `{collection}`: {source}")
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// In-memory owner of tasks, projects, habits, notes and mind-maps.
pub struct EntityStore<R: KvRepository> {
    repo: R,
    tasks: Vec<Task>,
    projects: Vec<Project>,
    habits: Vec<Habit>,
    notes: Vec<Note>,
    mind_maps: Vec<MindMap>,
    write_failures: u64,
    last_write_error: Option<PersistError>,
}

impl<R: KvRepository> EntityStore<R> {
    /// Loads every collection from `repo`, seeding the ones that are absent
    /// or unreadable. Loading performs no writes.
    pub fn open(repo: R) -> Self {
        Self::open_at(repo, Utc::now())
    }

    /// Like [`EntityStore::open`], with seed timestamps relative to `now`.
    pub fn open_at(repo: R, now: DateTime<Utc>) -> Self {
        let tasks = load_collection(&repo, CollectionKey::Tasks, || seed::seed_tasks(now));
        let projects = load_collection(&repo, CollectionKey::Projects, seed::seed_projects);
        let habits = load_collection(&repo, CollectionKey::Habits, seed::seed_habits);
        let notes = load_collection(&repo, CollectionKey::Notes, || seed::seed_notes(now));
        let mind_maps = load_collection(&repo, CollectionKey::MindMaps, seed::seed_mind_maps);

        info!(
            "event=store_open module=store status=ok tasks={} projects={} habits={} notes={} mindmaps={}",
            tasks.len(),
            projects.len(),
            habits.len(),
            notes.len(),
            mind_maps.len()
        );

        Self {
            repo,
            tasks,
            projects,
            habits,
            notes,
            mind_maps,
            write_failures: 0,
            last_write_error: None,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    pub fn into_repo(self) -> R {
        self.repo
    }

    // ----- reads -----

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn mind_maps(&self) -> &[MindMap] {
        &self.mind_maps
    }

    pub fn task(&self, id: EntityId) -> Option<&Task> {
        find(&self.tasks, id)
    }

    pub fn project(&self, id: EntityId) -> Option<&Project> {
        find(&self.projects, id)
    }

    pub fn habit(&self, id: EntityId) -> Option<&Habit> {
        find(&self.habits, id)
    }

    pub fn note(&self, id: EntityId) -> Option<&Note> {
        find(&self.notes, id)
    }

    pub fn mind_map(&self, id: EntityId) -> Option<&MindMap> {
        find(&self.mind_maps, id)
    }

    // ----- tasks -----

    pub fn add_task(&mut self, title: impl Into<String>, deadline: DateTime<Utc>) -> EntityId {
        let task = Task::new(title, deadline);
        let id = task.id;
        self.tasks.push(task);
        self.persist(CollectionKey::Tasks);
        id
    }

    pub fn update_task(&mut self, id: EntityId, patch: TaskPatch) {
        match find_mut(&mut self.tasks, id) {
            Some(task) => patch.apply_to(task),
            None => note_missing("update_task", id),
        }
        self.persist(CollectionKey::Tasks);
    }

    pub fn toggle_task(&mut self, id: EntityId) {
        match find_mut(&mut self.tasks, id) {
            Some(task) => task.toggle(),
            None => note_missing("toggle_task", id),
        }
        self.persist(CollectionKey::Tasks);
    }

    pub fn delete_task(&mut self, id: EntityId) {
        if !remove_by_id(&mut self.tasks, id) {
            note_missing("delete_task", id);
        }
        self.persist(CollectionKey::Tasks);
    }

    // ----- projects -----

    pub fn add_project(&mut self, name: impl Into<String>) -> EntityId {
        let project = Project::new(name);
        let id = project.id;
        self.projects.push(project);
        self.persist(CollectionKey::Projects);
        id
    }

    pub fn update_project(&mut self, id: EntityId, patch: ProjectPatch) {
        match find_mut(&mut self.projects, id) {
            Some(project) => patch.apply_to(project),
            None => note_missing("update_project", id),
        }
        self.persist(CollectionKey::Projects);
    }

    pub fn delete_project(&mut self, id: EntityId) {
        if !remove_by_id(&mut self.projects, id) {
            note_missing("delete_project", id);
        }
        self.persist(CollectionKey::Projects);
    }

    /// Appends a card to a project. `None` when the project is unknown.
    pub fn add_project_task(
        &mut self,
        project_id: EntityId,
        content: impl Into<String>,
        column: KanbanColumn,
    ) -> Option<EntityId> {
        let created = match find_mut(&mut self.projects, project_id) {
            Some(project) => Some(kanban::add_task(project, content, column)),
            None => {
                note_missing("add_project_task", project_id);
                None
            }
        };
        self.persist(CollectionKey::Projects);
        created
    }

    pub fn move_project_task(&mut self, project_id: EntityId, task_id: EntityId, to: KanbanColumn) {
        self.edit_project_task("move_project_task", project_id, task_id, |project| {
            kanban::move_task(project, task_id, to)
        });
    }

    pub fn update_project_task(
        &mut self,
        project_id: EntityId,
        task_id: EntityId,
        content: impl Into<String>,
    ) {
        let content = content.into();
        self.edit_project_task("update_project_task", project_id, task_id, |project| {
            kanban::update_task_content(project, task_id, content)
        });
    }

    pub fn remove_project_task(&mut self, project_id: EntityId, task_id: EntityId) {
        self.edit_project_task("remove_project_task", project_id, task_id, |project| {
            kanban::remove_task(project, task_id)
        });
    }

    fn edit_project_task(
        &mut self,
        op: &'static str,
        project_id: EntityId,
        task_id: EntityId,
        edit: impl FnOnce(&mut Project) -> bool,
    ) {
        match find_mut(&mut self.projects, project_id) {
            Some(project) => {
                if !edit(project) {
                    note_missing(op, task_id);
                }
            }
            None => note_missing(op, project_id),
        }
        self.persist(CollectionKey::Projects);
    }

    // ----- habits -----

    pub fn add_habit(&mut self, name: impl Into<String>) -> EntityId {
        let habit = Habit::new(name);
        let id = habit.id;
        self.habits.push(habit);
        self.persist(CollectionKey::Habits);
        id
    }

    pub fn update_habit(&mut self, id: EntityId, patch: HabitPatch) {
        match find_mut(&mut self.habits, id) {
            Some(habit) => patch.apply_to(habit),
            None => note_missing("update_habit", id),
        }
        self.persist(CollectionKey::Habits);
    }

    pub fn delete_habit(&mut self, id: EntityId) {
        if !remove_by_id(&mut self.habits, id) {
            note_missing("delete_habit", id);
        }
        self.persist(CollectionKey::Habits);
    }

    /// Flips the record for `day`; returns the new state, `None` if the
    /// habit is unknown.
    pub fn toggle_habit(&mut self, id: EntityId, day: NaiveDate) -> Option<bool> {
        let state = match find_mut(&mut self.habits, id) {
            Some(habit) => Some(habit.toggle_day(day)),
            None => {
                note_missing("toggle_habit", id);
                None
            }
        };
        self.persist(CollectionKey::Habits);
        state
    }

    /// Toggles the calendar day of `at`, as observed in its own time zone.
    pub fn toggle_habit_at<Tz: TimeZone>(&mut self, id: EntityId, at: &DateTime<Tz>) -> Option<bool> {
        self.toggle_habit(id, at.date_naive())
    }

    // ----- notes -----

    /// Adds a note at the front of the collection, stamped with the current
    /// instant.
    pub fn add_note(&mut self, draft: NoteDraft) -> EntityId {
        self.add_note_at(draft, Utc::now())
    }

    pub fn add_note_at(&mut self, draft: NoteDraft, created_at: DateTime<Utc>) -> EntityId {
        let note = draft.into_note(created_at);
        let id = note.id;
        self.notes.insert(0, note);
        self.persist(CollectionKey::Notes);
        id
    }

    pub fn update_note(&mut self, id: EntityId, patch: NotePatch) {
        match find_mut(&mut self.notes, id) {
            Some(note) => patch.apply_to(note),
            None => note_missing("update_note", id),
        }
        self.persist(CollectionKey::Notes);
    }

    pub fn delete_note(&mut self, id: EntityId) {
        if !remove_by_id(&mut self.notes, id) {
            note_missing("delete_note", id);
        }
        self.persist(CollectionKey::Notes);
    }

    // ----- mind-maps -----

    /// Creates a map with one root node named after it.
    pub fn add_mind_map(&mut self, name: impl Into<String>) -> EntityId {
        self.add_mind_map_at(name, Utc::now())
    }

    pub fn add_mind_map_at(&mut self, name: impl Into<String>, created_at: DateTime<Utc>) -> EntityId {
        let map = MindMap::with_root(name, created_at);
        let id = map.id;
        self.mind_maps.push(map);
        self.persist(CollectionKey::MindMaps);
        id
    }

    pub fn update_mind_map(&mut self, id: EntityId, patch: MindMapPatch) {
        match find_mut(&mut self.mind_maps, id) {
            Some(map) => patch.apply_to(map),
            None => note_missing("update_mind_map", id),
        }
        self.persist(CollectionKey::MindMaps);
    }

    pub fn delete_mind_map(&mut self, id: EntityId) {
        if !remove_by_id(&mut self.mind_maps, id) {
            note_missing("delete_mind_map", id);
        }
        self.persist(CollectionKey::MindMaps);
    }

    /// Adds an `Idea` node. `None` when the map is unknown, `parent_id`
    /// does not name a node of that map, or `position` is not finite.
    pub fn add_mind_map_node(
        &mut self,
        map_id: EntityId,
        title: impl Into<String>,
        position: Position,
        parent_id: Option<EntityId>,
    ) -> Option<EntityId> {
        let created = match find_mut(&mut self.mind_maps, map_id) {
            Some(_) if !position.is_finite() => {
                debug!(
                    "event=add_mind_map_node module=store status=noop reason=non_finite_position map={map_id}"
                );
                None
            }
            Some(map) => match parent_id {
                Some(parent) if map.node(parent).is_none() => {
                    note_missing("add_mind_map_node", parent);
                    None
                }
                _ => {
                    let node = MindMapNode::new(title, position, parent_id);
                    let id = node.id;
                    map.nodes.push(node);
                    Some(id)
                }
            },
            None => {
                note_missing("add_mind_map_node", map_id);
                None
            }
        };
        self.persist(CollectionKey::MindMaps);
        created
    }

    pub fn update_mind_map_node(&mut self, map_id: EntityId, node_id: EntityId, patch: NodePatch) {
        match find_mut(&mut self.mind_maps, map_id) {
            Some(map) => match map.node_mut(node_id) {
                Some(node) => patch.apply_to(node),
                None => note_missing("update_mind_map_node", node_id),
            },
            None => note_missing("update_mind_map_node", map_id),
        }
        self.persist(CollectionKey::MindMaps);
    }

    /// Deletes a node and its whole subtree; returns how many nodes went.
    pub fn delete_mind_map_node(&mut self, map_id: EntityId, node_id: EntityId) -> usize {
        let removed = match find_mut(&mut self.mind_maps, map_id) {
            Some(map) => tree::cascade_delete(&mut map.nodes, node_id),
            None => 0,
        };
        if removed == 0 {
            note_missing("delete_mind_map_node", node_id);
        }
        self.persist(CollectionKey::MindMaps);
        removed
    }

    // ----- derived views -----

    /// Timeline split around the current local day.
    pub fn timeline(&self) -> Timeline {
        build_timeline(&self.tasks, &Local::now())
    }

    pub fn timeline_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Timeline {
        build_timeline(&self.tasks, now)
    }

    pub fn upcoming_deadlines(&self, now: DateTime<Utc>, limit: usize) -> Vec<DeadlineReminder> {
        agenda::upcoming_deadlines(&self.tasks, now, limit)
    }

    pub fn day_agenda<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> DayAgenda {
        agenda::day_agenda(&self.tasks, day, tz)
    }

    pub fn project_progress(&self, project_id: EntityId) -> Option<ProjectProgress> {
        self.project(project_id).map(ProjectProgress::of)
    }

    /// Ids below `node_id` in one map; empty for unknown ids.
    pub fn mind_map_descendants(&self, map_id: EntityId, node_id: EntityId) -> Vec<EntityId> {
        self.mind_map(map_id)
            .map(|map| tree::descendant_ids(&map.nodes, node_id))
            .unwrap_or_default()
    }

    pub fn note_tags(&self) -> Vec<String> {
        note_projection::note_tags(&self.notes)
    }

    pub fn notes_with_tag(&self, tag: &str) -> Vec<&Note> {
        note_projection::notes_with_tag(&self.notes, tag)
    }

    // ----- persistence -----

    /// Serialized form of one collection, exactly as it would be written.
    pub fn encoded_collection(&self, key: CollectionKey) -> CodecResult<Vec<u8>> {
        match key {
            CollectionKey::Tasks => encode_collection(&self.tasks),
            CollectionKey::Projects => encode_collection(&self.projects),
            CollectionKey::Habits => encode_collection(&self.habits),
            CollectionKey::Notes => encode_collection(&self.notes),
            CollectionKey::MindMaps => encode_collection(&self.mind_maps),
        }
    }

    /// Rewrites every collection, stopping at the first failure.
    ///
    /// Used to retry after write failures.
    pub fn flush_all(&mut self) -> PersistResult<()> {
        for key in CollectionKey::ALL {
            self.write_collection(key)?;
        }
        Ok(())
    }

    /// Number of write failures since open.
    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }

    pub fn last_write_error(&self) -> Option<&PersistError> {
        self.last_write_error.as_ref()
    }

    /// Returns and clears the most recent write failure.
    pub fn take_write_error(&mut self) -> Option<PersistError> {
        self.last_write_error.take()
    }

    fn persist(&mut self, key: CollectionKey) {
        if let Err(err) = self.write_collection(key) {
            self.write_failures += 1;
            warn!(
                "event=collection_write module=store status=error collection={} failures={} error={}",
                key, self.write_failures, err
            );
            self.last_write_error = Some(err);
        }
    }

    fn write_collection(&mut self, key: CollectionKey) -> PersistResult<()> {
        let bytes = self
            .encoded_collection(key)
            .map_err(|source| PersistError::Encode {
                collection: key,
                source,
            })?;
        self.repo
            .put(key.as_str(), &bytes)
            .map_err(|source| PersistError::Write {
                collection: key,
                source,
            })?;
        debug!(
            "event=collection_write module=store status=ok collection={} bytes={}",
            key,
            bytes.len()
        );
        Ok(())
    }
}

fn load_collection<T, R>(repo: &R, key: CollectionKey, seed: impl FnOnce() -> Vec<T>) -> Vec<T>
where
    T: DeserializeOwned,
    R: KvRepository,
{
    match repo.get(key.as_str()) {
        Ok(Some(bytes)) => match decode_collection(&bytes) {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event=collection_load module=store status=fallback collection={} reason=decode_failed error={}",
                    key, err
                );
                seed()
            }
        },
        Ok(None) => {
            info!(
                "event=collection_load module=store status=seeded collection={} reason=absent",
                key
            );
            seed()
        }
        Err(err) => {
            warn!(
                "event=collection_load module=store status=fallback collection={} reason=read_failed error={}",
                key, err
            );
            seed()
        }
    }
}

fn find<T: Entity>(items: &[T], id: EntityId) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

fn find_mut<T: Entity>(items: &mut [T], id: EntityId) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: EntityId) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

fn note_missing(op: &'static str, id: EntityId) {
    debug!("event={op} module=store status=noop reason=not_found id={id}");
}
