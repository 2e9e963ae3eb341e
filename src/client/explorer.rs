//! Explorer API client: graph transfers, paged history and address summaries.
//!
//! Every endpoint answers with an envelope carrying a `success` flag. The
//! envelope handling lives in plain functions so it can be tested without a
//! server.

use reqwest::{StatusCode, Url};
use serde_json::Value;

use super::http::{HttpClient, HttpConfig};
use crate::domain::{Address, AddressSummary, ExplorerError, FilterState, Transfer, normalize_transfers};

// ============================================================================
// Request and Response Types
// ============================================================================

/// Page window sent to the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// 1-based page number.
    pub page: usize,
    pub limit: usize,
}

/// One answer of the history endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryBatch {
    pub transfers: Vec<Transfer>,
    /// Rows matching the filter across all pages.
    pub total: usize,
}

// ============================================================================
// Explorer Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: HttpClient,
    base_url: Url,
}

impl ExplorerClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `base_url` is not an absolute http(s) URL,
    /// or an error if the HTTP client fails to initialize.
    pub fn new(base_url: &str, config: HttpConfig) -> Result<Self, ExplorerError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| ExplorerError::invalid_input(format!("invalid API URL '{trimmed}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ExplorerError::invalid_input(format!(
                "API URL '{trimmed}' cannot carry a path"
            )));
        }
        Ok(Self {
            http: HttpClient::with_config(config)?,
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetch the transfers the graph is built from, normalized.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` on HTTP 404, `Fetch`/`Service` for transport or
    /// service failures and `MalformedInput` for an unusable payload.
    pub async fn fetch_transfers(&self, address: &Address) -> Result<Vec<Transfer>, ExplorerError> {
        let url = self.endpoint(&["api", "transactions"])?;

        tracing::debug!("Fetching transfers for {address}");
        let response = self
            .http
            .get(url)
            .query(&[("address", address.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        parse_transfers_response(status, &body, address)
    }

    /// Fetch filtered transfer history for `address`.
    ///
    /// Without `paging` the service returns every matching row.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_transfers`].
    pub async fn fetch_history(
        &self,
        address: &Address,
        filter: &FilterState,
        paging: Option<Paging>,
    ) -> Result<HistoryBatch, ExplorerError> {
        let url = self.endpoint(&["api", "address", address.as_str(), "transactions"])?;
        let mut query = filter.query_params();
        if let Some(Paging { page, limit }) = paging {
            query.push(("page", page.to_string()));
            query.push(("limit", limit.to_string()));
        }

        tracing::debug!("Fetching history for {address} ({} params)", query.len());
        let response = self.http.get(url).query(&query).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        parse_history_response(status, &body, address)
    }

    /// Fetch the balance and holdings summary for `address`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_transfers`].
    pub async fn fetch_address_summary(
        &self,
        address: &Address,
    ) -> Result<AddressSummary, ExplorerError> {
        let url = self.endpoint(&["api", "address", address.as_str()])?;

        tracing::debug!("Fetching summary for {address}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        parse_summary_response(status, &body, address)
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ExplorerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ExplorerError::invalid_input("API URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Map the HTTP status and the envelope's `success`/`error` fields to errors.
fn check_envelope(
    status: StatusCode,
    body: &Value,
    address: &Address,
    fallback: &str,
) -> Result<(), ExplorerError> {
    let service_message = body.get("error").and_then(Value::as_str);

    if status == StatusCode::NOT_FOUND {
        return Err(ExplorerError::not_found("address", address.as_str()));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ExplorerError::service(
            status.as_u16(),
            "Rate limit exceeded. Please try again later.",
        ));
    }
    if !status.is_success() {
        return Err(ExplorerError::service(
            status.as_u16(),
            service_message.unwrap_or(fallback),
        ));
    }
    if body.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(ExplorerError::service(
            status.as_u16(),
            service_message.unwrap_or(fallback),
        ));
    }
    Ok(())
}

pub(crate) fn parse_transfers_response(
    status: StatusCode,
    body: &Value,
    address: &Address,
) -> Result<Vec<Transfer>, ExplorerError> {
    check_envelope(status, body, address, "Failed to fetch transaction data")?;
    let records = body.get("transactions").unwrap_or(&Value::Null);
    normalize_transfers(records)
}

/// `{ success, data: [...], total }`. A missing `total` counts the rows.
pub(crate) fn parse_history_response(
    status: StatusCode,
    body: &Value,
    address: &Address,
) -> Result<HistoryBatch, ExplorerError> {
    check_envelope(status, body, address, "Failed to fetch transactions")?;
    let transfers = normalize_transfers(body.get("data").unwrap_or(&Value::Null))?;
    let total = body
        .get("total")
        .and_then(Value::as_u64)
        .and_then(|total| usize::try_from(total).ok())
        .unwrap_or(transfers.len());
    Ok(HistoryBatch { transfers, total })
}

pub(crate) fn parse_summary_response(
    status: StatusCode,
    body: &Value,
    address: &Address,
) -> Result<AddressSummary, ExplorerError> {
    check_envelope(status, body, address, "Failed to fetch address data")?;
    let data = body
        .get("data")
        .filter(|data| data.is_object())
        .ok_or_else(|| ExplorerError::malformed("summary response has no data object"))?;
    serde_json::from_value(data.clone())
        .map_err(|e| ExplorerError::malformed(format!("summary data: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
