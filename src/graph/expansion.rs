//! Node expansion: the per-node collapsed/expanded state machine.
//!
//! Expanding a node introduces children owned by it; expanding it again
//! collapses it and removes exactly what the expansion added. The controller
//! also turns fetched transfers into store additions for searches,
//! double-click explorations and fetch-backed expansions.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{Address, Transfer};

use super::aggregate::{Aggregation, aggregate};
use super::layout::{LayoutHinter, Role};
use super::store::{GraphStore, MergeReport, RemovedSubtree};
use super::types::{Edge, Node, NodeKind, Position};

/// Default number of placeholder children per expansion.
pub const DEFAULT_PLACEHOLDER_CHILDREN: usize = 2;

/// How an expansion obtains its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Synthesize placeholder children synchronously.
    #[default]
    Placeholder,
    /// Fetch the node's counterparties; placeholders remain the fallback for
    /// nodes that are not addresses.
    Fetch,
}

// ============================================================================
// ExpansionState
// ============================================================================

/// The set of expanded node ids.
///
/// Each expansion gets a fresh generation number so results of a fetch that
/// belonged to an earlier expansion of the same node can be recognised.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: BTreeMap<String, u64>,
    next_generation: u64,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_expanded(&self, node_id: &str) -> bool {
        self.expanded.contains_key(node_id)
    }

    /// Generation of the current expansion of `node_id`, if expanded.
    #[must_use]
    pub fn generation(&self, node_id: &str) -> Option<u64> {
        self.expanded.get(node_id).copied()
    }

    /// Mark `node_id` expanded and return its generation.
    ///
    /// Marking an already-expanded node keeps its generation.
    pub fn insert(&mut self, node_id: &str) -> u64 {
        if let Some(&generation) = self.expanded.get(node_id) {
            return generation;
        }
        self.next_generation += 1;
        self.expanded.insert(node_id.to_string(), self.next_generation);
        self.next_generation
    }

    /// Mark `node_id` collapsed. Returns whether it was expanded.
    pub fn remove(&mut self, node_id: &str) -> bool {
        self.expanded.remove(node_id).is_some()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

// ============================================================================
// ToggleOutcome
// ============================================================================

/// Result of [`ExpansionController::toggle`].
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The node does not exist in the store.
    Ignored,
    /// Children were derived and merged.
    Expanded(MergeReport),
    /// The node is now expanded; its children arrive with a fetch for
    /// `address` tagged with `generation`.
    Pending {
        node_id: String,
        address: Address,
        generation: u64,
    },
    /// The node's subtree was removed.
    Collapsed(RemovedSubtree),
}

// ============================================================================
// ExpansionController
// ============================================================================

/// Computes graph additions and removals and applies them to the store.
#[derive(Debug, Clone)]
pub struct ExpansionController<R> {
    hinter: LayoutHinter<R>,
    mode: ExpansionMode,
    placeholder_children: usize,
}

impl<R: Rng> ExpansionController<R> {
    #[must_use]
    pub fn new(hinter: LayoutHinter<R>, mode: ExpansionMode, placeholder_children: usize) -> Self {
        Self {
            hinter,
            mode,
            placeholder_children,
        }
    }

    /// Expand a collapsed node or collapse an expanded one.
    pub fn toggle(
        &mut self,
        node_id: &str,
        store: &mut GraphStore,
        expansion: &mut ExpansionState,
    ) -> ToggleOutcome {
        let Some(node) = store.node(node_id).cloned() else {
            tracing::debug!("Ignoring toggle for unknown node {node_id}");
            return ToggleOutcome::Ignored;
        };

        if expansion.is_expanded(node_id) {
            return ToggleOutcome::Collapsed(self.collapse(node_id, store, expansion));
        }

        let generation = expansion.insert(node_id);
        let fetch_address = match (self.mode, node.kind) {
            (ExpansionMode::Fetch, NodeKind::Focal | NodeKind::Counterparty) => {
                Address::parse(&node.id)
            }
            _ => None,
        };

        match fetch_address {
            Some(address) => ToggleOutcome::Pending {
                node_id: node.id,
                address,
                generation,
            },
            None => ToggleOutcome::Expanded(self.expand_placeholders(&node, store)),
        }
    }

    /// Remove `node_id`'s subtree and forget it and its expanded descendants.
    pub fn collapse(
        &mut self,
        node_id: &str,
        store: &mut GraphStore,
        expansion: &mut ExpansionState,
    ) -> RemovedSubtree {
        let removed = store.remove_subtree(node_id);
        for descendant in &removed.nodes {
            expansion.remove(descendant);
        }
        expansion.remove(node_id);
        tracing::debug!(
            "Collapsed {node_id}: removed {} nodes, {} edges",
            removed.nodes.len(),
            removed.edges.len()
        );
        removed
    }

    fn expand_placeholders(&mut self, parent: &Node, store: &mut GraphStore) -> MergeReport {
        let mut nodes = Vec::with_capacity(self.placeholder_children);
        let mut edges = Vec::with_capacity(self.placeholder_children);

        for index in 0..self.placeholder_children {
            let ordinal = index + 1;
            let child_id = format!("{}-{ordinal}", parent.id);
            let position = self.hinter.child(parent.position, index);
            let label = format!("New Node {ordinal}");
            nodes.push(
                Node::new(&child_id, NodeKind::Placeholder, position, label).owned_by(&parent.id),
            );
            edges.push(Edge::link(&parent.id, &child_id).owned_by(&parent.id));
        }

        let report = store.merge(nodes, edges);
        tracing::debug!(
            "Expanded {} with {} placeholder children",
            parent.id,
            report.nodes_added
        );
        report
    }

    /// Aggregate `transfers` around `focal` and merge the result.
    ///
    /// New nodes are placed relative to `reference`; when `owner` is set,
    /// everything added becomes part of that node's subtree.
    pub fn apply_transfers(
        &mut self,
        store: &mut GraphStore,
        transfers: &[Transfer],
        focal: &Address,
        reference: Position,
        owner: Option<&str>,
    ) -> MergeReport {
        let Aggregation { nodes, edges } =
            aggregate(transfers, focal, |id| store.contains_node(id));

        let nodes: Vec<Node> = nodes
            .into_iter()
            .map(|proposed| {
                let kind = match proposed.role {
                    Role::Focal => NodeKind::Focal,
                    Role::Source | Role::Target => NodeKind::Counterparty,
                };
                let position = self.hinter.place(reference, proposed.role);
                let label = proposed.address.short_label();
                Node {
                    id: proposed.address.into_string(),
                    kind,
                    position,
                    label,
                    parent: owner.map(String::from),
                }
            })
            .collect();

        let edges: Vec<Edge> = edges
            .into_iter()
            .map(|mut edge| {
                edge.parent = owner.map(String::from);
                edge
            })
            .collect();

        let report = store.merge(nodes, edges);
        tracing::debug!(
            "Merged transfers around {focal}: +{} nodes, +{} edges",
            report.nodes_added,
            report.edges_added
        );
        report
    }

    /// Focal node for a fresh view centered on `address`.
    #[must_use]
    pub fn focal_node(address: &Address, position: Position) -> Node {
        Node::new(address.as_str(), NodeKind::Focal, position, address.short_label())
    }
}

// ============================================================================
// Tests
// ============================================================================
