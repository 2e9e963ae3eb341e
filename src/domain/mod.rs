//! Domain types for the addrscope explorer.
//!
//! # Module Organization
//!
//! - [`error`] - Error taxonomy shared by every layer
//! - [`address`] - Canonical, case-insensitive addresses
//! - [`transfer`] - Transfers and the raw-record normalizer
//! - [`method`] - Contract method selector lookup
//! - [`filter`] - History and query filters
//! - [`summary`] - Balance and holdings from the summary service

// ============================================================================
// Module Declarations
// ============================================================================

pub mod address;
pub mod error;
pub mod filter;
pub mod method;
pub mod summary;
pub mod transfer;

// ============================================================================
// Re-exports
// ============================================================================

pub use address::Address;
pub use error::ExplorerError;
pub use filter::{AddressRole, Direction, FilterState};
pub use summary::AddressSummary;
pub use transfer::{Transfer, format_timestamp, normalize_transfers};
