//! Transfer filters applied to history listings and upstream queries.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::transfer::Transfer;

/// Direction of a transfer relative to the focal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    All,
    /// Transfers received by the focal address.
    In,
    /// Transfers sent by the focal address.
    Out,
}

/// Which side of the transfer the focal address must occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AddressRole {
    #[default]
    All,
    From,
    To,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl AddressRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::From => "from",
            Self::To => "to",
        }
    }
}

// ============================================================================
// FilterState
// ============================================================================

/// Filter form values. Empty fields do not constrain.
///
/// Date bounds are inclusive whole UTC days.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub direction: Direction,
    pub address_role: AddressRole,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Only transfers sent by this counterpart.
    pub sender: Option<Address>,
}

impl FilterState {
    /// Whether no field constrains the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `transfer` passes every active constraint for `focal`.
    #[must_use]
    pub fn matches(&self, transfer: &Transfer, focal: &Address) -> bool {
        let direction_ok = match self.direction {
            Direction::All => true,
            Direction::In => transfer.target == *focal,
            Direction::Out => transfer.source == *focal,
        };
        let role_ok = match self.address_role {
            AddressRole::All => true,
            AddressRole::From => transfer.source == *focal,
            AddressRole::To => transfer.target == *focal,
        };
        let min_ok = self.min_amount.is_none_or(|min| transfer.amount >= min);
        let max_ok = self.max_amount.is_none_or(|max| transfer.amount <= max);
        let sender_ok = self.sender.as_ref().is_none_or(|sender| transfer.source == *sender);

        direction_ok
            && role_ok
            && min_ok
            && max_ok
            && sender_ok
            && self.within_dates(transfer.timestamp)
    }

    fn within_dates(&self, timestamp: u64) -> bool {
        // Out-of-range timestamps count as unavailable.
        let Ok(ts) = i64::try_from(timestamp) else {
            return self.start.is_none() && self.end.is_none();
        };
        let after_start = self.start.is_none_or(|start| {
            ts >= start.and_time(NaiveTime::MIN).and_utc().timestamp()
        });
        let before_end = self.end.is_none_or(|end| {
            end.succ_opt()
                .is_none_or(|next| ts < next.and_time(NaiveTime::MIN).and_utc().timestamp())
        });
        after_start && before_end
    }

    /// Query parameters understood by the transfer service.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("txType", self.direction.as_str().to_string()),
            ("addressType", self.address_role.as_str().to_string()),
        ];
        if let Some(min) = self.min_amount {
            params.push(("minAmount", min.to_string()));
        }
        if let Some(max) = self.max_amount {
            params.push(("maxAmount", max.to_string()));
        }
        if let Some(start) = self.start {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(sender) = &self.sender {
            params.push(("sender", sender.to_string()));
        }
        params
    }
}

// ============================================================================
// Tests
// ============================================================================
