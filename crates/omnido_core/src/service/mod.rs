//! Core use-case services.
//!
//! # Responsibility
//! - Own the collections and their command methods (`store`).
//! - Provide the derived computations over collections: mind-map cascades,
//!   kanban moves, timeline bucketing, agendas and note projections.
//! - Keep callers decoupled from storage details.

pub mod agenda;
pub mod kanban;
pub mod note_projection;
pub mod seed;
pub mod store;
pub mod timeline;
pub mod tree;
