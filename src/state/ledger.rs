//! Transfer lists retained per fetched address.

use std::collections::{BTreeMap, HashSet};

use crate::domain::{Address, Transfer};

/// Latest transfer list for every address fetched in the current view.
///
/// A fresh fetch for an address replaces its previous list.
#[derive(Debug, Clone, Default)]
pub struct TransferLedger {
    by_address: BTreeMap<Address, Vec<Transfer>>,
}

impl TransferLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `transfers` as the current list for `address`.
    pub fn record(&mut self, address: Address, transfers: Vec<Transfer>) {
        let count = transfers.len();
        self.by_address.insert(address.clone(), transfers);
        tracing::debug!(
            "Ledger: {count} transfers for {address} ({} addresses recorded)",
            self.len()
        );
    }

    /// Transfers last fetched for `address`.
    #[must_use]
    pub fn transfers_for(&self, address: &Address) -> &[Transfer] {
        self.by_address.get(address).map_or(&[], Vec::as_slice)
    }

    /// Transfers between `a` and `b` in either direction, across every
    /// fetched list.
    ///
    /// The same transfer shows up in both endpoints' lists when both were
    /// fetched; copies sharing a hash are reported once.
    #[must_use]
    pub fn between(&self, a: &str, b: &str) -> Vec<&Transfer> {
        let mut seen_hashes: HashSet<&str> = HashSet::new();
        let mut related: Vec<&Transfer> = Vec::new();

        for transfer in self.by_address.values().flatten() {
            if !transfer.connects(a, b) {
                continue;
            }
            let duplicate = match transfer.hash.as_deref() {
                Some(hash) => !seen_hashes.insert(hash),
                None => related.iter().any(|known| *known == transfer),
            };
            if !duplicate {
                related.push(transfer);
            }
        }
        related
    }

    /// Number of addresses with a recorded list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn clear(&mut self) {
        self.by_address.clear();
    }
}
