//! Per-sender breakdown of the transfers an address received.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Address, Transfer};

/// Transfers one counterpart sent to the focal address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderActivity {
    pub sender: Address,
    pub transfers: usize,
    pub total_amount: f64,
}

/// Group `transfers` by sender, skipping those `focal` sent itself.
///
/// Senders appear in order of their first transfer.
#[must_use]
pub fn sender_activity(transfers: &[Transfer], focal: &Address) -> Vec<SenderActivity> {
    let mut index: HashMap<&Address, usize> = HashMap::new();
    let mut activity: Vec<SenderActivity> = Vec::new();

    for transfer in transfers.iter().filter(|t| t.source != *focal) {
        match index.get(&transfer.source) {
            Some(&slot) => {
                activity[slot].transfers += 1;
                activity[slot].total_amount += transfer.amount;
            }
            None => {
                index.insert(&transfer.source, activity.len());
                activity.push(SenderActivity {
                    sender: transfer.source.clone(),
                    transfers: 1,
                    total_amount: transfer.amount,
                });
            }
        }
    }
    activity
}
