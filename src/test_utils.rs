//! Shared test utilities and Mother pattern factories.
//!
//! Use these helpers to avoid copy-pasting transfer setup across tests.
#![allow(dead_code)]

use crate::domain::{Address, Transfer};

/// Parse an address, panicking on empty input.
#[must_use]
pub fn addr(raw: &str) -> Address {
    Address::parse(raw).expect("test address must not be empty")
}

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct TransferMother;

impl TransferMother {
    #[must_use]
    pub fn between(from: &str, to: &str, amount: f64) -> Transfer {
        Transfer::new(addr(from), addr(to), amount)
    }

    #[must_use]
    pub fn at(from: &str, to: &str, amount: f64, timestamp: u64) -> Transfer {
        Transfer {
            timestamp,
            ..Self::between(from, to, amount)
        }
    }

    #[must_use]
    pub fn with_hash(from: &str, to: &str, amount: f64, hash: &str) -> Transfer {
        Transfer {
            hash: Some(hash.to_string()),
            ..Self::between(from, to, amount)
        }
    }

    /// `count` transfers from `from` to `to`, one second apart.
    #[must_use]
    pub fn series(from: &str, to: &str, count: usize) -> Vec<Transfer> {
        (0..count)
            .map(|i| Self::at(from, to, (i + 1) as f64, 1_700_000_000 + i as u64))
            .collect()
    }
}
