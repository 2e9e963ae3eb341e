//! Edge aggregation: collapse transfers into one edge per ordered pair.

use std::collections::{HashMap, HashSet};

use crate::domain::{Address, Transfer};

use super::layout::Role;
use super::types::{Edge, EdgeStyle};

// ============================================================================
// Aggregation
// ============================================================================

/// A node the aggregator saw for the first time, before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    pub address: Address,
    /// `Focal` if this is the focal address, otherwise the side of the
    /// transfer on which it first appeared.
    pub role: Role,
}

/// Proposed additions for the graph store.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub nodes: Vec<NewNode>,
    pub edges: Vec<Edge>,
}

impl Aggregation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Running totals for one ordered pair.
struct Accumulator {
    source: Address,
    target: Address,
    total_amount: f64,
    transfers: Vec<Transfer>,
}

/// Group `transfers` by ordered `(source, target)` pair.
///
/// `is_known` reports whether a node id already exists in the caller's view;
/// such nodes are not proposed again. Edges come out in first-seen order and
/// self-transfers become self-loop edges.
pub fn aggregate<F>(transfers: &[Transfer], focal: &Address, is_known: F) -> Aggregation
where
    F: Fn(&str) -> bool,
{
    let mut order: Vec<(Address, Address)> = Vec::new();
    let mut accumulators: HashMap<(Address, Address), Accumulator> = HashMap::new();
    let mut seen: HashSet<Address> = HashSet::new();
    let mut nodes = Vec::new();

    let mut note_node = |address: &Address, side: Role| {
        if is_known(address.as_str()) || !seen.insert(address.clone()) {
            return;
        }
        let role = if address == focal { Role::Focal } else { side };
        nodes.push(NewNode {
            address: address.clone(),
            role,
        });
    };

    for transfer in transfers {
        note_node(&transfer.source, Role::Source);
        note_node(&transfer.target, Role::Target);

        let key = (transfer.source.clone(), transfer.target.clone());
        let acc = accumulators.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Accumulator {
                source: transfer.source.clone(),
                target: transfer.target.clone(),
                total_amount: 0.0,
                transfers: Vec::new(),
            }
        });
        acc.total_amount += transfer.amount;
        acc.transfers.push(transfer.clone());
    }

    let edges = order
        .into_iter()
        .filter_map(|key| accumulators.remove(&key))
        .map(|acc| Edge {
            id: Edge::id_for(acc.source.as_str(), acc.target.as_str()),
            source: acc.source.into_string(),
            target: acc.target.into_string(),
            total_amount: acc.total_amount,
            transactions: acc.transfers,
            style: EdgeStyle::default(),
            parent: None,
        })
        .collect();

    Aggregation { nodes, edges }
}

// ============================================================================
// Tests
// ============================================================================
