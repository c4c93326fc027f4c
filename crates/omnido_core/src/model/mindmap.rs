//! Mind-map model.
//!
//! # Responsibility
//! - Define mind-maps and their parent-pointer node forest.
//! - Keep the saved node shape (`positionX`/`positionY` as separate numbers).
//!
//! # Invariants
//! - `parent_id = None` marks a root node.
//! - A present `parent_id` should name a node of the same map. This is not
//!   enforced; a dangling parent only makes the node unreachable from roots.
//! - Node coordinates are finite. Patches carrying NaN or infinity leave the
//!   position unchanged, and encoding a non-finite coordinate is an error.

use super::{new_entity_id, Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

/// Position given to the root node of a freshly created map.
pub const DEFAULT_ROOT_POSITION: Position = Position { x: 400.0, y: 300.0 };

/// Workflow status of one mind-map node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeStatus {
    Idea,
    /// Serialized as `progress` to match saved maps.
    #[serde(rename = "progress")]
    InProgress,
    Completed,
    Blocked,
}

impl NodeStatus {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }
}

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `false` when either coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One node of a mind-map forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRecord", into = "NodeRecord")]
pub struct MindMapNode {
    pub id: EntityId,
    pub title: String,
    pub status: NodeStatus,
    pub position: Position,
    pub parent_id: Option<EntityId>,
}

impl MindMapNode {
    /// Creates an `Idea` node with a fresh id.
    pub fn new(title: impl Into<String>, position: Position, parent_id: Option<EntityId>) -> Self {
        Self {
            id: new_entity_id(),
            title: title.into(),
            status: NodeStatus::Idea,
            position,
            parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Entity for MindMapNode {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Wire shape of a node: position flattened into two numeric fields.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    id: EntityId,
    title: String,
    status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<EntityId>,
    #[serde(serialize_with = "finite_coordinate")]
    position_x: f64,
    #[serde(serialize_with = "finite_coordinate")]
    position_y: f64,
}

// JSON cannot carry NaN or infinity.
fn finite_coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "node coordinate must be finite, got {value}"
        )));
    }
    serializer.serialize_f64(*value)
}

impl From<NodeRecord> for MindMapNode {
    fn from(value: NodeRecord) -> Self {
        Self {
            id: value.id,
            title: value.title,
            status: value.status,
            position: Position::new(value.position_x, value.position_y),
            parent_id: value.parent_id,
        }
    }
}

impl From<MindMapNode> for NodeRecord {
    fn from(value: MindMapNode) -> Self {
        Self {
            id: value.id,
            title: value.title,
            status: value.status,
            parent_id: value.parent_id,
            position_x: value.position.x,
            position_y: value.position.y,
        }
    }
}

/// A named mind-map and its nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    pub id: EntityId,
    pub name: String,
    pub nodes: Vec<MindMapNode>,
    pub created_at: DateTime<Utc>,
}

impl MindMap {
    /// Creates a map holding one root node titled after the map.
    pub fn with_root(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let name = name.into();
        let root = MindMapNode::new(name.clone(), DEFAULT_ROOT_POSITION, None);
        Self {
            id: new_entity_id(),
            name,
            nodes: vec![root],
            created_at,
        }
    }

    pub fn node(&self, node_id: EntityId) -> Option<&MindMapNode> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub(crate) fn node_mut(&mut self, node_id: EntityId) -> Option<&mut MindMapNode> {
        self.nodes.iter_mut().find(|node| node.id == node_id)
    }
}

impl Entity for MindMap {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Partial update for a mind-map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MindMapPatch {
    pub name: Option<String>,
}

impl MindMapPatch {
    pub fn apply_to(self, map: &mut MindMap) {
        if let Some(name) = self.name {
            map.name = name;
        }
    }
}

/// Partial update for a mind-map node. Parent links are not editable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub title: Option<String>,
    pub status: Option<NodeStatus>,
    pub position: Option<Position>,
}

impl NodePatch {
    pub fn apply_to(self, node: &mut MindMapNode) {
        if let Some(title) = self.title {
            node.title = title;
        }
        if let Some(status) = self.status {
            node.status = status;
        }
        if let Some(position) = self.position.filter(Position::is_finite) {
            node.position = position;
        }
    }
}
