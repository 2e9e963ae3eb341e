//! HTTP clients for the explorer API.
//!
//! # Example
//!
//! ```ignore
//! use crate::client::{ExplorerClient, HttpConfig};
//!
//! let client = ExplorerClient::new("http://localhost:3000", HttpConfig::default())?;
//! let transfers = client.fetch_transfers(&address).await?;
//! ```

pub mod explorer;
pub mod http;

// ============================================================================
// Re-exports
// ============================================================================

pub use explorer::{ExplorerClient, Paging};
pub use http::HttpConfig;
