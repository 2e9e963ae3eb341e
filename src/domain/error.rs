//! Error types for explorer operations.
//!
//! This module defines the error taxonomy shared by the normalizer, the
//! explorer service client and the graph session. Nothing here is fatal:
//! malformed records are skipped, fetch failures leave the graph untouched
//! and "not found" is treated as an empty result by the session.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Custom error type for explorer operations.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Network-related errors from HTTP requests.
    #[error("Network error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The upstream service answered, but reported a failure.
    #[error("Service error ({status}): {message}")]
    Service {
        /// HTTP status code returned by the service.
        status: u16,
        /// Message reported by the service, or a generic description.
        message: String,
    },

    /// The payload shape is unusable (e.g. transfers are not an array).
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Description of what was wrong with the payload.
        message: String,
    },

    /// Entity not found by the upstream service.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// The type of entity that was not found (e.g. "address").
        entity: &'static str,
        /// The identifier that was searched for.
        id: String,
    },

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ExplorerError {
    /// Create a new malformed-input error with the given message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a new service error.
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code returned by the service
    /// * `message` - Message reported by the service
    #[must_use]
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Create a new not found error.
    ///
    /// # Arguments
    ///
    /// * `entity` - The type of entity that was not found
    /// * `id` - The identifier that was searched for
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether this error belongs to the fetch-failure family
    /// (transport errors and failed service responses).
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Service { .. })
    }

    /// Whether the upstream reported that nothing exists for the query.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Convert to a `color_eyre::Report` for the binary's error surface.
    #[must_use = "this converts the error into a Report for display"]
    pub fn into_report(self) -> color_eyre::Report {
        color_eyre::eyre::eyre!("{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================
