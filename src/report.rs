//! Plain-text rendering for command output.

use crate::constants::{ADDRESS_WIDTH, AMOUNT_WIDTH};
use crate::domain::{Address, AddressSummary, Transfer, format_timestamp};
use crate::graph::{ExpansionState, GraphStore};
use crate::state::HistoryPage;
use crate::state::analysis::SenderActivity;

const FIELD_WIDTH: usize = 16;

/// Node and edge listing of the current view.
#[must_use]
pub fn graph_text(store: &GraphStore, expansion: &ExpansionState, symbol: &str) -> String {
    let mut out = format!("Nodes ({})\n", store.node_count());
    for node in store.nodes() {
        let marker = if expansion.is_expanded(&node.id) { " [expanded]" } else { "" };
        out.push_str(&format!("  {} ({}){marker}\n", node.id, node.kind.as_str()));
    }

    out.push_str(&format!("Edges ({})\n", store.edge_count()));
    for edge in store.edges() {
        out.push_str(&format!(
            "  {} -> {}: {} ({} transfers)\n",
            edge.source,
            edge.target,
            edge.label(symbol),
            edge.transactions.len()
        ));
    }
    out
}

/// One table row per transfer.
#[must_use]
pub fn transfers_text<'a>(transfers: impl IntoIterator<Item = &'a Transfer>, symbol: &str) -> String {
    transfers
        .into_iter()
        .map(|transfer| transfer_row(transfer, symbol) + "\n")
        .collect()
}

fn transfer_row(transfer: &Transfer, symbol: &str) -> String {
    let amount = format!("{:.4} {symbol}", transfer.amount);
    let method = transfer.method.map_or("-", |method| method.as_str());
    format!(
        "{}  {:<width$} -> {:<width$}  {:>amount_width$}  {:<12} {}",
        format_timestamp(transfer.timestamp),
        transfer.source.short_label(),
        transfer.target.short_label(),
        amount,
        method,
        transfer.hash.as_deref().unwrap_or("-"),
        width = ADDRESS_WIDTH,
        amount_width = AMOUNT_WIDTH,
    )
}

/// A history page with its position header.
#[must_use]
pub fn history_text(focal: &Address, page: &HistoryPage<'_>, symbol: &str) -> String {
    if page.rows.is_empty() {
        return format!("No transfers for {focal} match the current filter.\n");
    }
    let mut out = format!(
        "{focal}: page {}/{} ({} transfers)\n",
        page.page, page.total_pages, page.total_rows
    );
    out.push_str(&transfers_text(page.rows, symbol));

    let mut hints = Vec::new();
    if page.has_previous() {
        hints.push(format!("previous: --page {}", page.page - 1));
    }
    if page.has_next() {
        hints.push(format!("next: --page {}", page.page + 1));
    }
    if !hints.is_empty() {
        out.push_str(&hints.join(", "));
        out.push('\n');
    }
    out
}

/// Received transfers per sender, amounts to 4 decimals.
#[must_use]
pub fn senders_text(focal: &Address, activity: &[SenderActivity], symbol: &str) -> String {
    if activity.is_empty() {
        return format!("No transfers received by {focal} match the current filter.\n");
    }
    let mut out = format!("Senders to {focal} ({})\n", activity.len());
    for row in activity {
        out.push_str(&format!(
            "  {:<width$}  {:>5} txn  {:>amount_width$}\n",
            row.sender.short_label(),
            row.transfers,
            format!("{:.4} {symbol}", row.total_amount),
            width = ADDRESS_WIDTH,
            amount_width = AMOUNT_WIDTH,
        ));
    }
    out
}

/// Balance and holdings block.
#[must_use]
pub fn summary_text(summary: &AddressSummary, symbol: &str) -> String {
    let with_symbol = |value: &str| {
        if value.is_empty() {
            String::new()
        } else {
            format!("{value} {symbol}")
        }
    };

    let mut out = String::new();
    out.push_str(&field("Address:", &summary.address));
    out.push_str(&field("Balance:", &with_symbol(&summary.balance)));
    out.push_str(&field("Value:", &summary.value));
    out.push_str(&field("Total sent:", &with_symbol(&summary.total_sent)));
    out.push_str(&field("Total received:", &with_symbol(&summary.total_received)));
    out.push_str(&field("Gas:", &summary.gas));

    let optional = [
        ("Name tag:", &summary.private_name_tag),
        ("First seen:", &summary.first_seen),
        ("Last seen:", &summary.last_seen),
        ("Funded by:", &summary.funded_by),
        ("Multichain:", &summary.multichain_info),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            out.push_str(&field(label, value));
        }
    }

    out.push_str(&format!("Tokens ({})\n", summary.token_holdings.len()));
    for holding in &summary.token_holdings {
        let mut line = format!("  {} {}", holding.amount, holding.token_symbol);
        if let Some(name) = &holding.token_name {
            line.push_str(&format!(" ({name})"));
        }
        if let Some(value) = &holding.value {
            line.push_str(&format!(" = {value}"));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn field(label: &str, value: &str) -> String {
    let value = if value.is_empty() { "-" } else { value };
    format!("{label:<width$}{value}\n", width = FIELD_WIDTH)
}
