use omnido_core::service::tree::{children_of, root_nodes};
use omnido_core::{
    decode_collection, CollectionKey, EntityId, EntityStore, MemoryKvRepository, MindMap,
    NodePatch, NodeStatus, Position,
};
use std::collections::HashSet;

struct Chain {
    store: EntityStore<MemoryKvRepository>,
    map: EntityId,
    root: EntityId,
    a: EntityId,
    b: EntityId,
    c: EntityId,
    d: EntityId,
}

/// root -> A -> B -> C, plus D under root.
fn chain() -> Chain {
    let repo = MemoryKvRepository::new().with_entry(CollectionKey::MindMaps.as_str(), b"[]".to_vec());
    let mut store = EntityStore::open(repo);
    let map = store.add_mind_map("Roadmap");
    let root = store.mind_map(map).unwrap().nodes[0].id;
    let a = store
        .add_mind_map_node(map, "A", Position::new(10.0, 0.0), Some(root))
        .unwrap();
    let b = store
        .add_mind_map_node(map, "B", Position::new(20.0, 0.0), Some(a))
        .unwrap();
    let c = store
        .add_mind_map_node(map, "C", Position::new(30.0, 0.0), Some(b))
        .unwrap();
    let d = store
        .add_mind_map_node(map, "D", Position::new(0.0, 10.0), Some(root))
        .unwrap();
    Chain {
        store,
        map,
        root,
        a,
        b,
        c,
        d,
    }
}

fn node_ids(store: &EntityStore<MemoryKvRepository>, map: EntityId) -> HashSet<EntityId> {
    store
        .mind_map(map)
        .unwrap()
        .nodes
        .iter()
        .map(|node| node.id)
        .collect()
}

#[test]
fn deleting_inner_node_removes_its_subtree_only() {
    let mut chain = chain();

    let removed = chain.store.delete_mind_map_node(chain.map, chain.a);

    assert_eq!(removed, 3);
    assert_eq!(
        node_ids(&chain.store, chain.map),
        HashSet::from([chain.root, chain.d])
    );
}

#[test]
fn deleting_root_empties_the_map() {
    let mut chain = chain();

    assert_eq!(chain.store.delete_mind_map_node(chain.map, chain.root), 5);
    assert!(chain.store.mind_map(chain.map).unwrap().nodes.is_empty());
}

#[test]
fn deleting_leaf_removes_exactly_one_node() {
    let mut chain = chain();

    assert_eq!(chain.store.delete_mind_map_node(chain.map, chain.c), 1);
    assert_eq!(
        node_ids(&chain.store, chain.map),
        HashSet::from([chain.root, chain.a, chain.b, chain.d])
    );
}

#[test]
fn descendants_follow_child_links() {
    let chain = chain();

    assert_eq!(
        chain.store.mind_map_descendants(chain.map, chain.a),
        vec![chain.b, chain.c]
    );
    let map = chain.store.mind_map(chain.map).unwrap();
    let roots: Vec<_> = root_nodes(map).iter().map(|node| node.id).collect();
    assert_eq!(roots, vec![chain.root]);
    let children: Vec<_> = children_of(map, chain.root)
        .iter()
        .map(|node| node.id)
        .collect();
    assert_eq!(children, vec![chain.a, chain.d]);
}

#[test]
fn cascade_delete_is_persisted() {
    let mut chain = chain();
    chain.store.delete_mind_map_node(chain.map, chain.a);

    let writes = chain.store.repo().writes_for("mindmaps");
    let saved: Vec<MindMap> = decode_collection(writes.last().unwrap()).unwrap();
    assert_eq!(saved[0].nodes.len(), 2);
}

#[test]
fn node_with_unknown_parent_is_not_added() {
    let mut chain = chain();
    let before = chain.store.mind_map(chain.map).unwrap().nodes.len();

    let added = chain.store.add_mind_map_node(
        chain.map,
        "orphan",
        Position::default(),
        Some(uuid::Uuid::new_v4()),
    );

    assert!(added.is_none());
    assert_eq!(chain.store.mind_map(chain.map).unwrap().nodes.len(), before);
}

#[test]
fn update_node_changes_only_given_fields() {
    let mut chain = chain();

    chain.store.update_mind_map_node(
        chain.map,
        chain.b,
        NodePatch {
            status: Some(NodeStatus::Blocked),
            ..NodePatch::default()
        },
    );

    let map = chain.store.mind_map(chain.map).unwrap();
    let node = map.node(chain.b).unwrap();
    assert_eq!(node.status, NodeStatus::Blocked);
    assert_eq!(node.title, "B");
    assert_eq!(node.position, Position::new(20.0, 0.0));
    assert_eq!(node.parent_id, Some(chain.a));
}

#[test]
fn non_finite_position_never_reaches_saved_maps() {
    let mut chain = chain();

    chain.store.update_mind_map_node(
        chain.map,
        chain.c,
        NodePatch {
            position: Some(Position::new(f64::NAN, 0.0)),
            ..NodePatch::default()
        },
    );
    let added = chain.store.add_mind_map_node(
        chain.map,
        "far away",
        Position::new(f64::INFINITY, 1.0),
        Some(chain.root),
    );

    assert!(added.is_none());
    assert_eq!(chain.store.write_failures(), 0);

    let reopened = EntityStore::open(chain.store.into_repo());
    assert_eq!(reopened.mind_maps().len(), 1);
    let map = reopened.mind_map(chain.map).unwrap();
    assert_eq!(map.nodes.len(), 5);
    assert_eq!(map.node(chain.c).unwrap().position, Position::new(30.0, 0.0));
}
