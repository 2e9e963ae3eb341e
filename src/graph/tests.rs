//! Cross-module tests for graph construction and expansion.
//!
//! These exercise the store, aggregator and expansion controller together:
//! - Worked examples for aggregation and expansion
//! - Laws that must hold after any sequence of operations

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng};

use crate::domain::normalize_transfers;
use crate::test_utils::{TransferMother, addr};

use super::expansion::{ExpansionController, ExpansionMode, ExpansionState, ToggleOutcome};
use super::layout::{LayoutConfig, LayoutHinter};
use super::store::GraphStore;
use super::types::{Edge, NodeKind, Position};

// ============================================================================
// Helpers
// ============================================================================

fn controller() -> ExpansionController<StdRng> {
    ExpansionController::new(
        LayoutHinter::new(LayoutConfig::default(), StdRng::seed_from_u64(11)),
        ExpansionMode::Placeholder,
        2,
    )
}

fn seeded_store(ctl: &mut ExpansionController<StdRng>) -> GraphStore {
    let mut store = GraphStore::new();
    let transfers = vec![
        TransferMother::between("0xa", "0xb", 1.0),
        TransferMother::between("0xa", "0xb", 2.0),
        TransferMother::between("0xb", "0xc", 5.0),
    ];
    ctl.apply_transfers(&mut store, &transfers, &addr("0xa"), Position::ORIGIN, None);
    store
}

fn assert_unique_ids(store: &GraphStore) {
    let node_ids: HashSet<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    let edge_ids: HashSet<&str> = store.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(node_ids.len(), store.node_count(), "duplicate node id");
    assert_eq!(edge_ids.len(), store.edge_count(), "duplicate edge id");
}

// ============================================================================
// Worked Examples
// ============================================================================

#[test]
fn test_initial_load_example() {
    let mut ctl = controller();
    let store = seeded_store(&mut ctl);

    let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["0xa", "0xb", "0xc"]);
    assert_eq!(store.node("0xa").map(|n| n.kind), Some(NodeKind::Focal));

    let ab = store.edge(&Edge::id_for("0xa", "0xb")).expect("a->b");
    assert_eq!(ab.total_amount, 3.0);
    assert_eq!(ab.transactions.len(), 2);
    let bc = store.edge(&Edge::id_for("0xb", "0xc")).expect("b->c");
    assert_eq!(bc.total_amount, 5.0);
    assert_eq!(bc.transactions.len(), 1);
}

#[test]
fn test_expand_then_collapse_example() {
    let mut ctl = controller();
    let mut store = seeded_store(&mut ctl);
    let mut expansion = ExpansionState::new();
    let before_nodes = store.node_count();
    let before_edges = store.edge_count();

    ctl.toggle("0xb", &mut store, &mut expansion);

    assert_eq!(store.node_count(), before_nodes + 2);
    assert_eq!(store.edge_count(), before_edges + 2);
    for id in ["0xb-1", "0xb-2"] {
        assert!(store.contains_node(id), "missing {id}");
    }
    for id in [Edge::id_for("0xb", "0xb-1"), Edge::id_for("0xb", "0xb-2")] {
        assert!(store.contains_edge(&id), "missing {id}");
    }

    let ToggleOutcome::Collapsed(removed) = ctl.toggle("0xb", &mut store, &mut expansion) else {
        panic!("second toggle must collapse");
    };
    assert_eq!(removed.nodes.len() + removed.edges.len(), 4);
    assert_eq!(store.node_count(), before_nodes);
    assert_eq!(store.edge_count(), before_edges);
}

#[test]
fn test_null_endpoint_never_reaches_the_graph() {
    let payload = serde_json::json!([
        {"from": null, "to": "0xabc", "amount": 5},
        {"from": "0xdef", "to": "0xabc", "amount": 1}
    ]);
    let transfers = normalize_transfers(&payload).expect("array payload");
    let mut ctl = controller();
    let mut store = GraphStore::new();

    ctl.apply_transfers(&mut store, &transfers, &addr("0xabc"), Position::ORIGIN, None);

    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edge_count(), 1);
    assert_eq!(store.edges()[0].total_amount, 1.0);
}

// ============================================================================
// Laws
// ============================================================================

#[test]
fn test_toggle_law_holds_for_every_node() {
    let mut ctl = controller();
    let mut store = seeded_store(&mut ctl);
    let mut expansion = ExpansionState::new();
    let ids: Vec<String> = store.nodes().iter().map(|n| n.id.clone()).collect();

    for id in ids {
        let nodes = store.nodes().to_vec();
        let edges = store.edges().to_vec();

        ctl.toggle(&id, &mut store, &mut expansion);
        ctl.toggle(&id, &mut store, &mut expansion);

        assert_eq!(store.nodes(), nodes.as_slice(), "nodes changed after toggling {id}");
        assert_eq!(store.edges(), edges.as_slice(), "edges changed after toggling {id}");
    }
    assert!(expansion.is_empty());
}

#[test]
fn test_no_duplicate_ids_after_mixed_operations() {
    let mut ctl = controller();
    let mut store = seeded_store(&mut ctl);
    let mut expansion = ExpansionState::new();

    let batches = [
        vec![TransferMother::between("0xc", "0xd", 1.0)],
        vec![
            TransferMother::between("0xa", "0xb", 9.0),
            TransferMother::between("0xd", "0xa", 1.0),
        ],
        vec![TransferMother::between("0xb", "0xb", 1.0)],
    ];

    for (i, batch) in batches.iter().enumerate() {
        ctl.apply_transfers(&mut store, batch, &addr("0xc"), Position::new(i as f64, 0.0), None);
        ctl.toggle("0xa", &mut store, &mut expansion);
        ctl.toggle("0xa-1", &mut store, &mut expansion);
        assert_unique_ids(&store);
    }
    ctl.apply_transfers(&mut store, &batches[0], &addr("0xc"), Position::ORIGIN, None);
    assert_unique_ids(&store);
}

#[test]
fn test_subtree_removal_never_touches_preexisting_entities() {
    let mut ctl = controller();
    let mut store = seeded_store(&mut ctl);
    let mut expansion = ExpansionState::new();
    let preexisting_nodes: Vec<String> = store.nodes().iter().map(|n| n.id.clone()).collect();
    let preexisting_edges: Vec<String> = store.edges().iter().map(|e| e.id.clone()).collect();

    // Expansion owning a mix of new nodes and edges onto known nodes.
    let generation = match ctl.toggle("0xb", &mut store, &mut expansion) {
        ToggleOutcome::Expanded(_) => expansion.generation("0xb"),
        other => panic!("unexpected outcome {other:?}"),
    };
    assert!(generation.is_some());
    let fetched = vec![
        TransferMother::between("0xb", "0xa", 4.0),
        TransferMother::between("0xz", "0xb", 1.0),
    ];
    ctl.apply_transfers(&mut store, &fetched, &addr("0xb"), Position::ORIGIN, Some("0xb"));
    assert!(store.contains_node("0xz"));

    let ToggleOutcome::Collapsed(removed) = ctl.toggle("0xb", &mut store, &mut expansion) else {
        panic!("expected collapse");
    };

    for id in &preexisting_nodes {
        assert!(store.contains_node(id), "lost pre-existing node {id}");
        assert!(!removed.nodes.contains(id));
    }
    for id in &preexisting_edges {
        assert!(store.contains_edge(id), "lost pre-existing edge {id}");
    }
    assert!(!store.contains_node("0xz"));
    assert!(!store.contains_edge(&Edge::id_for("0xb", "0xa")));
}
