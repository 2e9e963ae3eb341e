//! Address balance and holdings, as reported by the summary service.
//!
//! The explorer trusts these values; they are displayed, never validated.

use serde::{Deserialize, Serialize};

/// A single token balance held by an address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenHolding {
    pub token_name: Option<String>,
    pub token_symbol: String,
    pub amount: String,
    pub value: Option<String>,
}

/// Current balances and metadata for one address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressSummary {
    pub address: String,
    pub balance: String,
    pub total_sent: String,
    pub total_received: String,
    pub value: String,
    pub token_holdings: Vec<TokenHolding>,
    pub private_name_tag: Option<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub funded_by: Option<String>,
    pub gas: String,
    pub multichain_info: Option<String>,
}
