//! Persistence adapter contracts and implementations.
//!
//! # Responsibility
//! - Define the key/value byte storage the entity store writes through.
//! - Encode and decode whole collections to their saved payloads.
//!
//! # Invariants
//! - One key holds one whole collection; there is no cross-key atomicity.
//! - Adapters store bytes verbatim and never interpret payloads.

pub mod codec;
pub mod kv_repo;
