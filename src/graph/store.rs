//! The graph state store: sole owner of the nodes and edges on screen.
//!
//! Everything else proposes additions or removals; the store applies them
//! under two rules. A merge never replaces an id that is already present,
//! and a subtree removal only touches entities whose explicit `parent`
//! chain leads back to the expanded node.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::types::{Edge, Node};

/// Counts of what a merge actually added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    pub nodes_added: usize,
    pub edges_added: usize,
}

impl MergeReport {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.nodes_added == 0 && self.edges_added == 0
    }
}

/// Ids removed by [`GraphStore::remove_subtree`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemovedSubtree {
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
}

impl RemovedSubtree {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

// ============================================================================
// GraphStore
// ============================================================================

/// Nodes and edges of the active view, in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    #[serde(skip)]
    edge_index: HashMap<String, usize>,
}

impl GraphStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every node and edge whose id is not already present.
    ///
    /// Existing entries win: a repeated id is silently ignored, so merging
    /// the same data twice leaves the store unchanged.
    pub fn merge<N, E>(&mut self, nodes: N, edges: E) -> MergeReport
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = Edge>,
    {
        let mut report = MergeReport::default();

        for node in nodes {
            if self.node_index.contains_key(&node.id) {
                continue;
            }
            self.node_index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
            report.nodes_added += 1;
        }

        for edge in edges {
            if self.edge_index.contains_key(&edge.id) {
                continue;
            }
            self.edge_index.insert(edge.id.clone(), self.edges.len());
            self.edges.push(edge);
            report.edges_added += 1;
        }

        report
    }

    /// Remove everything introduced by the expansion of `root`.
    ///
    /// That is every node whose `parent` chain reaches `root`, every edge
    /// owned by `root` or by one of those nodes, and every edge touching a
    /// removed node. `root` itself stays. Unknown or childless roots are a
    /// no-op.
    pub fn remove_subtree(&mut self, root: &str) -> RemovedSubtree {
        let doomed = self.descendants_of(root);

        let mut removed = RemovedSubtree::default();
        self.nodes.retain(|node| {
            if doomed.contains(node.id.as_str()) {
                removed.nodes.push(node.id.clone());
                false
            } else {
                true
            }
        });

        self.edges.retain(|edge| {
            let owned = edge
                .parent
                .as_deref()
                .is_some_and(|owner| owner == root || doomed.contains(owner));
            let dangling = doomed.contains(edge.source.as_str()) || doomed.contains(edge.target.as_str());
            if owned || dangling {
                removed.edges.push(edge.id.clone());
                false
            } else {
                true
            }
        });

        if !removed.is_empty() {
            self.rebuild_indexes();
        }
        removed
    }

    /// Ids of all nodes transitively owned by `root` (excluding `root`).
    #[must_use]
    pub fn descendants_of(&self, root: &str) -> HashSet<String> {
        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        for node in &self.nodes {
            if let Some(parent) = node.parent.as_deref() {
                children.entry(parent).or_default().push(node.id.as_str());
            }
        }

        let mut found = HashSet::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            for &child in children.get(current).into_iter().flatten() {
                if child != root && found.insert(child.to_string()) {
                    stack.push(child);
                }
            }
        }
        found
    }

    /// Drop everything, e.g. when a new search replaces the view.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.edge_index.clear();
    }

    fn rebuild_indexes(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect();
        self.edge_index = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (edge.id.clone(), i))
            .collect();
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    #[cfg(test)]
    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge_index.contains_key(id)
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
