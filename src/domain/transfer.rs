//! Canonical transfer records and the normalizer that produces them.
//!
//! Upstream services return loosely-typed JSON. [`normalize_transfers`] is the
//! single place where that payload becomes [`Transfer`] values: addresses are
//! lower-cased, amounts become numbers, and records that cannot be used are
//! dropped instead of failing the whole batch.

use serde::Serialize;
use serde_json::Value;

use super::address::Address;
use super::error::ExplorerError;
use super::method::MethodKind;

// ============================================================================
// Helper Functions
// ============================================================================

/// Format a Unix timestamp into a human-readable string.
///
/// # Returns
///
/// A formatted date string, or "Timestamp not available" if the timestamp is 0.
#[must_use]
pub fn format_timestamp(timestamp_secs: u64) -> String {
    if timestamp_secs == 0 {
        return "Timestamp not available".to_string();
    }

    i64::try_from(timestamp_secs)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map_or_else(
            || "Timestamp not available".to_string(),
            |datetime| datetime.format("%a, %d %b %Y %H:%M:%S").to_string(),
        )
}

// ============================================================================
// Transfer
// ============================================================================

/// One directed value movement between two addresses.
///
/// Immutable once normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub source: Address,
    pub target: Address,
    /// Non-negative amount in the chain's display unit.
    pub amount: f64,
    /// Seconds since the Unix epoch; 0 when the upstream omitted it.
    pub timestamp: u64,
    pub hash: Option<String>,
    pub block: Option<String>,
    pub fee: Option<String>,
    /// Recognized contract method, when the upstream sent call data.
    pub method: Option<MethodKind>,
}

impl Transfer {
    /// Build a transfer with only the mandatory fields set.
    #[must_use]
    pub fn new(source: Address, target: Address, amount: f64) -> Self {
        Self {
            source,
            target,
            amount,
            timestamp: 0,
            hash: None,
            block: None,
            fee: None,
            method: None,
        }
    }

    /// Whether this transfer connects `a` and `b` in either direction.
    #[must_use]
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
    }

    /// Parse a single raw record.
    ///
    /// Returns `None` for records missing an endpoint or carrying a
    /// negative, non-finite or non-numeric amount. History rows name the
    /// amount `value`.
    #[must_use]
    pub fn from_json(record: &Value) -> Option<Self> {
        let source = record.get("from").and_then(Value::as_str).and_then(Address::parse)?;
        let target = record.get("to").and_then(Value::as_str).and_then(Address::parse)?;
        let amount = record
            .get("amount")
            .or_else(|| record.get("value"))
            .and_then(parse_amount)?;

        Some(Self {
            source,
            target,
            amount,
            timestamp: record.get("timestamp").and_then(parse_timestamp).unwrap_or(0),
            hash: record.get("hash").and_then(value_as_text),
            block: record.get("block").and_then(value_as_text),
            fee: record.get("fee").and_then(value_as_text),
            method: record
                .get("input")
                .and_then(Value::as_str)
                .map(MethodKind::from_input),
        })
    }
}

// ============================================================================
// Normalizer
// ============================================================================

/// Convert a raw upstream payload into canonical transfers.
///
/// Records that cannot be used are skipped and logged; input order is kept.
///
/// # Errors
///
/// Returns `ExplorerError::MalformedInput` if the payload is not an array.
pub fn normalize_transfers(payload: &Value) -> Result<Vec<Transfer>, ExplorerError> {
    let records = payload
        .as_array()
        .ok_or_else(|| ExplorerError::malformed("transfer payload is not an array"))?;

    let mut transfers = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match Transfer::from_json(record) {
            Some(transfer) => transfers.push(transfer),
            None => tracing::debug!("Dropping malformed transfer record at index {index}"),
        }
    }

    Ok(transfers)
}

// ============================================================================
// Extraction Functions
// ============================================================================

/// Accepts JSON numbers and numeric strings; rejects negatives and NaN/inf.
fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

/// Whole seconds; fractional values are truncated.
fn parse_timestamp(value: &Value) -> Option<u64> {
    let whole_seconds = |secs: f64| (secs.is_finite() && secs >= 0.0).then(|| secs.trunc() as u64);
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_seconds)),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| s.parse::<f64>().ok().and_then(whole_seconds))
        }
        _ => None,
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_normalize_lowercases_and_keeps_order() {
        let payload = json!([
            {"from": "0xAAA", "to": "0xBBB", "amount": 1.5, "timestamp": 1_700_000_000, "hash": "0x01"},
            {"from": "0xbbb", "to": "0xCcC", "amount": "2", "block": 19_000_000, "fee": "0.0001"},
        ]);

        let transfers = normalize_transfers(&payload).expect("array payload");

        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].source.as_str(), "0xaaa");
        assert_eq!(transfers[0].target.as_str(), "0xbbb");
        assert_eq!(transfers[0].amount, 1.5);
        assert_eq!(transfers[0].timestamp, 1_700_000_000);
        assert_eq!(transfers[0].hash.as_deref(), Some("0x01"));
        assert_eq!(transfers[1].target.as_str(), "0xccc");
        assert_eq!(transfers[1].amount, 2.0);
        assert_eq!(transfers[1].block.as_deref(), Some("19000000"));
        assert_eq!(transfers[1].fee.as_deref(), Some("0.0001"));
    }

    #[rstest]
    #[case::null_source(json!({"from": null, "to": "0xabc", "amount": 5}))]
    #[case::missing_target(json!({"from": "0xabc", "amount": 5}))]
    #[case::empty_source(json!({"from": "", "to": "0xabc", "amount": 5}))]
    #[case::negative_amount(json!({"from": "0xa", "to": "0xb", "amount": -1}))]
    #[case::text_amount(json!({"from": "0xa", "to": "0xb", "amount": "lots"}))]
    #[case::missing_amount(json!({"from": "0xa", "to": "0xb"}))]
    #[case::not_an_object(json!("0xa->0xb"))]
    fn test_malformed_records_are_dropped(#[case] record: Value) {
        let payload = Value::Array(vec![
            record,
            json!({"from": "0x1", "to": "0x2", "amount": 1}),
        ]);

        let transfers = normalize_transfers(&payload).expect("array payload");

        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].source.as_str(), "0x1");
    }

    #[rstest]
    #[case::object(json!({"transactions": []}))]
    #[case::string(json!("nope"))]
    #[case::null(Value::Null)]
    fn test_non_array_payload_is_malformed(#[case] payload: Value) {
        let err = normalize_transfers(&payload).expect_err("not an array");
        assert!(matches!(err, ExplorerError::MalformedInput { .. }));
    }

    #[test]
    fn test_input_maps_to_method() {
        let record = json!({"from": "0xa", "to": "0xb", "amount": 0, "input": "0x095ea7b3ff"});
        let transfer = Transfer::from_json(&record).expect("valid record");
        assert_eq!(transfer.method, Some(MethodKind::Approve));
    }

    #[test]
    fn test_connects_either_direction() {
        let transfer = Transfer::new(
            Address::parse("0xa").expect("valid"),
            Address::parse("0xb").expect("valid"),
            1.0,
        );
        assert!(transfer.connects("0xa", "0xb"));
        assert!(transfer.connects("0xb", "0xa"));
        assert!(!transfer.connects("0xa", "0xc"));
    }

    #[rstest]
    #[case::integer(json!(1_700_000_000), 1_700_000_000)]
    #[case::float(json!(1_700_000_000.0), 1_700_000_000)]
    #[case::fractional(json!(1_700_000_000.75), 1_700_000_000)]
    #[case::numeric_string(json!("1700000000"), 1_700_000_000)]
    #[case::float_string(json!("1700000000.5"), 1_700_000_000)]
    #[case::negative(json!(-5), 0)]
    #[case::text(json!("yesterday"), 0)]
    fn test_timestamp_forms(#[case] timestamp: Value, #[case] expected: u64) {
        let record = json!({"from": "0xa", "to": "0xb", "amount": 1, "timestamp": timestamp});
        let transfer = Transfer::from_json(&record).expect("valid record");
        assert_eq!(transfer.timestamp, expected);
    }

    #[test]
    fn test_value_is_read_when_amount_is_missing() {
        let record = json!({"from": "0xa", "to": "0xb", "value": "0.25"});
        let transfer = Transfer::from_json(&record).expect("valid record");
        assert_eq!(transfer.amount, 0.25);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "Timestamp not available");
        assert_eq!(format_timestamp(1_700_000_000), "Tue, 14 Nov 2023 22:13:20");
        assert_eq!(format_timestamp(u64::MAX), "Timestamp not available");
    }
}
