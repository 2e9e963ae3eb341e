//! Session state for the addrscope explorer.
//!
//! This module bundles the explicit state containers of one explorer view:
//!
//! - [`GraphSession`] - Graph store, expansion state, filter, ledger and
//!   fetch bookkeeping for the active view
//! - [`ledger::TransferLedger`] - Latest transfer list per fetched address
//! - [`HistoryPage`] - Paginated slice of filtered history
//! - [`analysis`] - Per-sender breakdown of received transfers
//! - [`AppConfig`] - Persistent configuration with load/save capabilities
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    GraphSession                      │
//! ├─────────────┬────────────────┬───────────┬───────────┤
//! │ GraphStore  │ ExpansionState │ Filter    │ Ledger    │
//! │  - nodes    │  - expanded    │  - form   │  - lists  │
//! │  - edges    │  - generations │           │           │
//! └─────────────┴────────────────┴───────────┴───────────┘
//!           ▲ FetchTicket / FetchEvent (epoch-checked)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use crate::state::{AppConfig, GraphSession};
//!
//! let mut session = GraphSession::new(controller);
//! let ticket = session.begin_search("0xabc")?;
//! session.complete_fetch(ticket, client.fetch_transfers(&address).await)?;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod analysis;
pub mod config;
pub mod history;
pub mod ledger;
pub mod session;

#[cfg(test)]
mod tests;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::AppConfig;
pub use history::HistoryPage;
pub use session::{FetchOutcome, FetchTicket, GraphSession};
