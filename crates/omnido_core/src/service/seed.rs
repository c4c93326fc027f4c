//! Default collections installed when nothing readable is saved.
//!
//! Mind-maps start empty; every other collection gets a small sample so a
//! first launch has something to show.

use crate::model::habit::Habit;
use crate::model::mindmap::MindMap;
use crate::model::note::{Note, NoteDraft};
use crate::model::project::{KanbanColumn, Project, ProjectTask};
use crate::model::task::Task;
use chrono::{DateTime, Duration, Utc};

pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let mut tidy = Task::new("Tidy up the desk", now + Duration::hours(1));
    tidy.completed = true;
    vec![
        Task::new("Read The Design of Everyday Things", now + Duration::days(1)),
        tidy,
    ]
}

pub fn seed_projects() -> Vec<Project> {
    vec![Project::with_tasks(
        "App Design",
        vec![
            ProjectTask::new("Draw wireframes", KanbanColumn::Todo),
            ProjectTask::new("Pick the color palette", KanbanColumn::Doing),
            ProjectTask::new("Competitor analysis", KanbanColumn::Done),
        ],
    )]
}

pub fn seed_habits() -> Vec<Habit> {
    vec![Habit::new("Meditation"), Habit::new("Reading")]
}

pub fn seed_notes(now: DateTime<Utc>) -> Vec<Note> {
    vec![
        NoteDraft {
            title: "Minimal design principles".to_string(),
            content: "Design lives in **whitespace** and *breathing room*.".to_string(),
            tag: "Design".to_string(),
            color_name: "purple".to_string(),
        }
        .into_note(now),
        NoteDraft {
            title: "Storage".to_string(),
            content: "Try moving the saved collections into `SQLite` next.".to_string(),
            tag: "Dev".to_string(),
            color_name: "blue".to_string(),
        }
        .into_note(now - Duration::days(1)),
    ]
}

pub fn seed_mind_maps() -> Vec<MindMap> {
    Vec::new()
}
