//! Transfer-flow graph construction and incremental expansion.
//!
//! # Module Structure
//!
//! - [`types`]: Core type definitions (`Node`, `Edge`, `Position`, `NodeKind`)
//! - [`aggregate`]: Groups transfers into one edge per ordered address pair
//! - [`store`]: `GraphStore`, the single owner of displayed nodes and edges
//! - [`layout`]: Initial position hints for new nodes
//! - [`expansion`]: Per-node expand/collapse state machine
//! - [`svg`]: SVG export of a store
//!
//! # Example Usage
//!
//! ```ignore
//! use crate::graph::{ExpansionController, ExpansionState, GraphStore};
//!
//! let mut store = GraphStore::new();
//! let mut expansion = ExpansionState::new();
//! controller.apply_transfers(&mut store, &transfers, &focal, Position::ORIGIN, None);
//! controller.toggle(focal.as_str(), &mut store, &mut expansion);
//! let svg = graph::svg::render(&store, "ETH");
//! ```

pub mod aggregate;
pub mod expansion;
pub mod layout;
pub mod store;
pub mod svg;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main types at module level
pub use expansion::{ExpansionController, ExpansionMode, ExpansionState, ToggleOutcome};
pub use layout::{LayoutConfig, LayoutHinter};
pub use store::{GraphStore, MergeReport};
pub use types::{Edge, Node, NodeKind, Position};
