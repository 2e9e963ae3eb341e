//! Contract method recognition from call data.
//!
//! Maps the 4-byte function selector at the start of a transaction's input
//! to a human-readable method name. Selectors outside the table are reported
//! as [`MethodKind::Unknown`] rather than guessed.

use serde::Serialize;

/// Length of `0x` followed by an 8 hex-digit selector.
const SELECTOR_LEN: usize = 10;

/// Recognized contract methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum MethodKind {
    /// Plain value transfer or ERC-20 `transfer`.
    Transfer,
    TransferFrom,
    Approve,
    BalanceOf,
    TotalSupply,
    Decimals,
    Name,
    Symbol,
    Deposit,
    Withdraw,
    Execute,
    SwapExactTokensForTokens,
    SwapExactEthForTokens,
    SwapExactTokensForEth,
    SwapEthForExactTokens,
    SwapTokensForExactTokens,
    Claim,
    Mint,
    /// Selector not present in the lookup table.
    #[default]
    Unknown,
}

/// Static selector table.
const KNOWN_SELECTORS: &[(&str, MethodKind)] = &[
    ("0xa9059cbb", MethodKind::Transfer),
    ("0x23b872dd", MethodKind::TransferFrom),
    ("0x095ea7b3", MethodKind::Approve),
    ("0x70a08231", MethodKind::BalanceOf),
    ("0x18160ddd", MethodKind::TotalSupply),
    ("0x313ce567", MethodKind::Decimals),
    ("0x06fdde03", MethodKind::Name),
    ("0x95d89b41", MethodKind::Symbol),
    ("0xd0e30db0", MethodKind::Deposit),
    ("0x2e1a7d4d", MethodKind::Withdraw),
    ("0x3593564c", MethodKind::Execute),
    ("0x4a25d94a", MethodKind::SwapExactTokensForTokens),
    ("0x7ff36ab5", MethodKind::SwapExactEthForTokens),
    ("0x791ac947", MethodKind::SwapExactTokensForEth),
    ("0xfb3bdb41", MethodKind::SwapEthForExactTokens),
    ("0x5c11d795", MethodKind::SwapTokensForExactTokens),
    ("0xb6f9de95", MethodKind::Claim),
    ("0x6a627842", MethodKind::Mint),
    ("0xa0712d68", MethodKind::Mint),
];

impl MethodKind {
    /// Classify a transaction from its raw input data.
    ///
    /// An empty call (`0x`) is a plain transfer.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case("0x") {
            return Self::Transfer;
        }
        let Some(selector) = input.get(..SELECTOR_LEN) else {
            return Self::Unknown;
        };
        let selector = selector.to_ascii_lowercase();
        KNOWN_SELECTORS
            .iter()
            .find(|(known, _)| *known == selector)
            .map_or(Self::Unknown, |(_, kind)| *kind)
    }

    /// Display name shown in history listings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "Transfer",
            Self::TransferFrom => "TransferFrom",
            Self::Approve => "Approve",
            Self::BalanceOf => "BalanceOf",
            Self::TotalSupply => "TotalSupply",
            Self::Decimals => "Decimals",
            Self::Name => "Name",
            Self::Symbol => "Symbol",
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Execute => "Execute",
            Self::SwapExactTokensForTokens => "SwapExactTokensForTokens",
            Self::SwapExactEthForTokens => "SwapExactETHForTokens",
            Self::SwapExactTokensForEth => "SwapExactTokensForETH",
            Self::SwapEthForExactTokens => "SwapETHForExactTokens",
            Self::SwapTokensForExactTokens => "SwapTokensForExactTokens",
            Self::Claim => "Claim",
            Self::Mint => "Mint",
            Self::Unknown => "Unknown",
        }
    }
}
