//! Graph type definitions for the transfer-flow view.
//!
//! Nodes are addresses (or synthetic expansion children), edges are the
//! aggregate of every transfer between one ordered pair of nodes.

use serde::Serialize;

use crate::domain::Transfer;

// ============================================================================
// Position
// ============================================================================

/// Layout position hint. The renderer is free to move nodes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

// ============================================================================
// NodeKind
// ============================================================================

/// Role of a node in the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The searched or explored address the graph is centered on.
    Focal,
    /// Any other address seen in a transfer.
    Counterparty,
    /// Synthetic child created by expanding a node.
    Placeholder,
}

impl NodeKind {
    /// Shape hint for renderers: focal nodes are drawn as stars.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Focal => "star",
            Self::Counterparty | Self::Placeholder => "circle",
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Focal => "focal",
            Self::Counterparty => "counterparty",
            Self::Placeholder => "placeholder",
        }
    }
}

// ============================================================================
// Node
// ============================================================================

/// One address (or synthetic child) in the current graph view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Canonical address, or `{parent}-{n}` for placeholder children.
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub label: String,
    /// Node whose expansion introduced this one. `None` for base-layer nodes.
    pub parent: Option<String>,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            label: label.into(),
            parent: None,
        }
    }

    /// Mark this node as owned by the expansion of `parent`.
    #[must_use]
    pub fn owned_by(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

// ============================================================================
// Edge
// ============================================================================

/// Cosmetic edge metadata passed through to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: u32,
    /// Closed arrowhead at the target end.
    pub arrow_marker: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: "#60a5fa".to_string(),
            stroke_width: 3,
            arrow_marker: true,
        }
    }
}

/// Aggregated relationship from one node to another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Derived from the ordered pair, see [`Edge::id_for`].
    pub id: String,
    pub source: String,
    pub target: String,
    /// Sum of constituent amounts at full precision.
    pub total_amount: f64,
    /// Constituent transfers in input order.
    pub transactions: Vec<Transfer>,
    pub style: EdgeStyle,
    /// Node whose expansion introduced this edge. `None` for base-layer edges.
    pub parent: Option<String>,
}

impl Edge {
    /// Stable id for the ordered `(source, target)` pair.
    #[must_use]
    pub fn id_for(source: &str, target: &str) -> String {
        format!("e{source}-{target}")
    }

    /// An edge with no constituent transfers (used for expansion links).
    #[must_use]
    pub fn link(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Self::id_for(&source, &target),
            source,
            target,
            total_amount: 0.0,
            transactions: Vec::new(),
            style: EdgeStyle::default(),
            parent: None,
        }
    }

    /// Mark this edge as owned by the expansion of `parent`.
    #[must_use]
    pub fn owned_by(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Total rounded to 4 decimal places for display.
    #[must_use]
    pub fn display_amount(&self) -> String {
        format!("{:.4}", self.total_amount)
    }

    /// Edge label, e.g. `3.0000 ETH`.
    #[must_use]
    pub fn label(&self, symbol: &str) -> String {
        format!("{} {symbol}", self.display_amount())
    }
}

// ============================================================================
// Tests
// ============================================================================
