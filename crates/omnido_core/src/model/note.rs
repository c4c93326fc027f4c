//! Inspiration note model.
//!
//! # Invariants
//! - `content` is raw markdown; previews are derived, never stored.
//! - The note collection is ordered newest-first by insertion.

use super::{new_entity_id, Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One freeform markdown note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    /// Creation instant, serialized as `date`.
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub tag: String,
    pub color_name: String,
}

impl Entity for Note {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Caller-supplied fields for a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: String,
    pub color_name: String,
}

impl NoteDraft {
    /// Builds the note, stamping it with `created_at`.
    pub fn into_note(self, created_at: DateTime<Utc>) -> Note {
        Note {
            id: new_entity_id(),
            title: self.title,
            content: self.content,
            created_at,
            tag: self.tag,
            color_name: self.color_name,
        }
    }
}

/// Partial update for a note. `created_at` is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag: Option<String>,
    pub color_name: Option<String>,
}

impl NotePatch {
    pub fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(tag) = self.tag {
            note.tag = tag;
        }
        if let Some(color_name) = self.color_name {
            note.color_name = color_name;
        }
    }
}
