use omnido_core::service::kanban::column_tasks;
use omnido_core::{
    decode_collection, EntityStore, KanbanColumn, MemoryKvRepository, Project, ProjectPatch,
    ProjectProgress,
};

fn store_with_board() -> (EntityStore<MemoryKvRepository>, omnido_core::EntityId) {
    let repo = MemoryKvRepository::new().with_entry("projects", b"[]".to_vec());
    let mut store = EntityStore::open(repo);
    let project = store.add_project("Release");
    (store, project)
}

#[test]
fn move_changes_column_only() {
    let (mut store, project) = store_with_board();
    let first = store
        .add_project_task(project, "write notes", KanbanColumn::Todo)
        .unwrap();
    let second = store
        .add_project_task(project, "tag build", KanbanColumn::Todo)
        .unwrap();
    let before = store.project(project).unwrap().tasks.clone();

    store.move_project_task(project, first, KanbanColumn::Doing);
    store.move_project_task(project, first, KanbanColumn::Done);
    store.move_project_task(project, second, KanbanColumn::Doing);

    let after = &store.project(project).unwrap().tasks;
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.content, new.content);
    }
    assert_eq!(after[0].column, KanbanColumn::Done);
    assert_eq!(after[1].column, KanbanColumn::Doing);
}

#[test]
fn column_order_follows_list_order() {
    let (mut store, project) = store_with_board();
    let a = store
        .add_project_task(project, "a", KanbanColumn::Todo)
        .unwrap();
    let b = store
        .add_project_task(project, "b", KanbanColumn::Doing)
        .unwrap();
    let c = store
        .add_project_task(project, "c", KanbanColumn::Todo)
        .unwrap();

    store.move_project_task(project, b, KanbanColumn::Todo);

    let board = store.project(project).unwrap();
    let todo: Vec<_> = column_tasks(board, KanbanColumn::Todo)
        .iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(todo, vec![a, b, c]);
    assert!(column_tasks(board, KanbanColumn::Doing).is_empty());
}

#[test]
fn update_and_remove_card() {
    let (mut store, project) = store_with_board();
    let card = store
        .add_project_task(project, "typo", KanbanColumn::Todo)
        .unwrap();

    store.update_project_task(project, card, "fixed");
    assert_eq!(
        store.project(project).unwrap().task(card).unwrap().content,
        "fixed"
    );

    store.remove_project_task(project, card);
    assert!(store.project(project).unwrap().tasks.is_empty());
}

#[test]
fn rename_and_progress() {
    let (mut store, project) = store_with_board();
    let done = store
        .add_project_task(project, "ship", KanbanColumn::Doing)
        .unwrap();
    store.add_project_task(project, "announce", KanbanColumn::Todo);
    store.move_project_task(project, done, KanbanColumn::Done);
    store.update_project(
        project,
        ProjectPatch {
            name: Some("Release 1.0".to_string()),
        },
    );

    assert_eq!(store.project(project).unwrap().name, "Release 1.0");
    let progress = store.project_progress(project).unwrap();
    assert_eq!(progress, ProjectProgress { done: 1, total: 2 });
    assert_eq!(progress.percent(), 50);
}

#[test]
fn every_board_change_is_written() {
    let (mut store, project) = store_with_board();
    let card = store
        .add_project_task(project, "card", KanbanColumn::Todo)
        .unwrap();
    store.move_project_task(project, card, KanbanColumn::Doing);

    let writes = store.repo().writes_for("projects");
    assert_eq!(writes.len(), 3);
    let saved: Vec<Project> = decode_collection(writes[2]).unwrap();
    assert_eq!(saved[0].tasks[0].column, KanbanColumn::Doing);

    let raw: serde_json::Value = serde_json::from_slice(writes[2]).unwrap();
    assert_eq!(raw[0]["tasks"][0]["columnId"], "doing");
}

#[test]
fn deleting_project_drops_its_cards() {
    let (mut store, project) = store_with_board();
    store.add_project_task(project, "card", KanbanColumn::Todo);

    store.delete_project(project);

    assert!(store.project(project).is_none());
    assert!(store.projects().is_empty());
}
