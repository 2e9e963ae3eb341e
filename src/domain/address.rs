//! Canonical address identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of leading characters kept by [`Address::short_label`].
const SHORT_PREFIX_LEN: usize = 6;

/// Number of trailing characters kept by [`Address::short_label`].
const SHORT_SUFFIX_LEN: usize = 4;

// ============================================================================
// Address
// ============================================================================

/// A case-insensitive participant identifier, stored lower-cased.
///
/// Two addresses that differ only in casing compare equal once parsed, which
/// is what lets the graph key nodes by address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Canonicalize a raw address string.
    ///
    /// Returns `None` if the input is empty after trimming.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    /// The canonical (lower-case) form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form used for graph labels, e.g. `0x1234...abcd`.
    ///
    /// Short addresses are returned unchanged.
    #[must_use]
    pub fn short_label(&self) -> String {
        let len = self.0.chars().count();
        if len <= SHORT_PREFIX_LEN + SHORT_SUFFIX_LEN + 3 {
            return self.0.clone();
        }
        let prefix: String = self.0.chars().take(SHORT_PREFIX_LEN).collect();
        let suffix: String = self.0.chars().skip(len - SHORT_SUFFIX_LEN).collect();
        format!("{prefix}...{suffix}")
    }

    /// Consume the address and return the canonical string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Address {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// ============================================================================
// Tests
// ============================================================================
