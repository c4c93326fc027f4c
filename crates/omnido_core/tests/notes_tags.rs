use chrono::{Duration, TimeZone, Utc};
use omnido_core::{
    derive_markdown_preview, EntityStore, MemoryKvRepository, Note, NoteDraft, NotePatch,
};

fn store() -> EntityStore<MemoryKvRepository> {
    EntityStore::open(MemoryKvRepository::new().with_entry("notes", b"[]".to_vec()))
}

fn draft(title: &str, tag: &str) -> NoteDraft {
    NoteDraft {
        title: title.to_string(),
        content: format!("# {title}\n\nbody"),
        tag: tag.to_string(),
        color_name: "blue".to_string(),
    }
}

#[test]
fn newest_note_is_first() {
    let mut store = store();
    let base = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
    let first = store.add_note_at(draft("first", "Ideas"), base);
    let second = store.add_note_at(draft("second", "Ideas"), base + Duration::minutes(5));

    let order: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(order, vec![second, first]);
    assert_eq!(store.note(first).unwrap().created_at, base);
}

#[test]
fn patch_keeps_creation_time() {
    let mut store = store();
    let created = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
    let id = store.add_note_at(draft("draft", "Ideas"), created);

    store.update_note(
        id,
        NotePatch {
            content: Some("rewritten".to_string()),
            tag: Some("Work".to_string()),
            ..NotePatch::default()
        },
    );

    let note = store.note(id).unwrap();
    assert_eq!(note.title, "draft");
    assert_eq!(note.content, "rewritten");
    assert_eq!(note.tag, "Work");
    assert_eq!(note.color_name, "blue");
    assert_eq!(note.created_at, created);
}

#[test]
fn tags_are_distinct_and_filterable() {
    let mut store = store();
    store.add_note(draft("a", "Work"));
    store.add_note(draft("b", "design"));
    store.add_note(draft("c", "work"));
    store.add_note(draft("d", "  "));

    assert_eq!(store.note_tags(), vec!["design".to_string(), "work".to_string()]);

    let work: Vec<&str> = store
        .notes_with_tag("WORK")
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(work, vec!["c", "a"]);
}

#[test]
fn saved_notes_use_date_field() {
    let mut store = store();
    let created = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
    store.add_note_at(draft("saved", "Ideas"), created);

    let writes = store.repo().writes_for("notes");
    let raw: serde_json::Value = serde_json::from_slice(writes[0]).unwrap();
    assert!(raw[0].get("date").is_some());
    assert_eq!(raw[0]["colorName"], "blue");

    let decoded: Vec<Note> = serde_json::from_value(raw).unwrap();
    assert_eq!(decoded[0].created_at, created);
}

#[test]
fn preview_comes_from_markdown_body() {
    let preview = derive_markdown_preview("## Sketch\n![cover](img/cover.png)\nSee [docs](https://x.y)");
    assert_eq!(preview.preview_image.as_deref(), Some("img/cover.png"));
    assert_eq!(preview.preview_text.as_deref(), Some("Sketch See docs"));
}

#[test]
fn delete_note_removes_only_that_note() {
    let mut store = store();
    let keep = store.add_note(draft("keep", "Ideas"));
    let drop = store.add_note(draft("drop", "Ideas"));

    store.delete_note(drop);

    assert!(store.note(drop).is_none());
    assert!(store.note(keep).is_some());
    assert_eq!(store.notes().len(), 1);
}
