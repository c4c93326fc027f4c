//! Entity model for the five productivity collections.
//!
//! # Responsibility
//! - Define the records owned by the entity store and their wire shape.
//! - Provide per-entity patch types for partial updates.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId` assigned at creation.
//! - Persisted field names stay compatible with existing saved collections.

use uuid::Uuid;

pub mod calendar;
pub mod habit;
pub mod mindmap;
pub mod note;
pub mod project;
pub mod task;

/// Stable identifier shared by every entity kind.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntityId = Uuid;

/// Anything addressed by a stable entity id.
pub trait Entity {
    fn id(&self) -> EntityId;
}

/// Generates a fresh, never-reused entity id.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}
