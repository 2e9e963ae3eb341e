//! Initial position hints for newly introduced nodes.
//!
//! Positions are advisory. The focal node lands exactly on the reference
//! point; counterparties are pushed left (senders) or right (receivers) and
//! get a random vertical jitter. Jitter is not collision-checked, so two
//! nodes may end up on the same spot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Position;

/// Default horizontal distance between a reference node and its counterparties.
pub const DEFAULT_COUNTERPARTY_OFFSET: f64 = 200.0;

/// Default upper bound of the vertical jitter.
pub const DEFAULT_MAX_JITTER: f64 = 500.0;

/// Default spacing used for expansion children.
pub const DEFAULT_CHILD_OFFSET: f64 = 100.0;

/// Where a node sits relative to the reference it is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Focal,
    /// Sender side, placed to the left.
    Source,
    /// Receiver side, placed to the right.
    Target,
}

/// Tunable layout distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub counterparty_offset: f64,
    pub max_jitter: f64,
    pub child_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            counterparty_offset: DEFAULT_COUNTERPARTY_OFFSET,
            max_jitter: DEFAULT_MAX_JITTER,
            child_offset: DEFAULT_CHILD_OFFSET,
        }
    }
}

// ============================================================================
// LayoutHinter
// ============================================================================

/// Assigns initial positions, drawing jitter from `R`.
#[derive(Debug, Clone)]
pub struct LayoutHinter<R> {
    config: LayoutConfig,
    rng: R,
}

impl<R: Rng> LayoutHinter<R> {
    #[must_use]
    pub fn new(config: LayoutConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Position for a node playing `role` relative to `reference`.
    pub fn place(&mut self, reference: Position, role: Role) -> Position {
        let dx = match role {
            Role::Focal => return reference,
            Role::Source => -self.config.counterparty_offset,
            Role::Target => self.config.counterparty_offset,
        };
        let jitter = if self.config.max_jitter > 0.0 {
            self.rng.gen_range(0.0..=self.config.max_jitter)
        } else {
            0.0
        };
        reference.offset(dx, jitter)
    }

    /// Deterministic position for the `index`-th (0-based) expansion child.
    #[must_use]
    pub fn child(&self, parent: Position, index: usize) -> Position {
        let step = self.config.child_offset;
        parent.offset(step, step * index as f64)
    }
}

// ============================================================================
// Tests
// ============================================================================
