//! Tests for the state module.

use rand::{SeedableRng, rngs::StdRng};

use super::HistoryPage;
use super::session::{FetchOutcome, FetchPurpose, GraphSession, StaleReason};
use crate::domain::{Address, Direction, ExplorerError, FilterState, Transfer};
use crate::graph::{
    Edge, ExpansionController, ExpansionMode, LayoutConfig, LayoutHinter, NodeKind, Position,
    ToggleOutcome,
};
use crate::test_utils::{TransferMother, addr};

// ========================================================================
// Test Helper Functions
// ========================================================================

fn session(mode: ExpansionMode) -> GraphSession<StdRng> {
    GraphSession::new(ExpansionController::new(
        LayoutHinter::new(LayoutConfig::default(), StdRng::seed_from_u64(42)),
        mode,
        2,
    ))
}

fn focal_transfers() -> Vec<Transfer> {
    vec![
        TransferMother::between("0xa", "0xb", 1.0),
        TransferMother::between("0xa", "0xb", 2.0),
        TransferMother::between("0xb", "0xc", 5.0),
    ]
}

/// Session after a completed search for `0xa`.
fn searched(mode: ExpansionMode) -> GraphSession<StdRng> {
    let mut session = session(mode);
    let ticket = session.begin_search("0xA").expect("valid address");
    session
        .complete_fetch(ticket, Ok(focal_transfers()))
        .expect("search applies");
    session
}

fn snapshot(session: &GraphSession<StdRng>) -> (Vec<crate::graph::Node>, Vec<Edge>) {
    (session.store().nodes().to_vec(), session.store().edges().to_vec())
}

// ========================================================================
// Search
// ========================================================================

#[test]
fn test_search_seeds_focal_at_origin() {
    let session = searched(ExpansionMode::Placeholder);

    let focal = session.store().node("0xa").expect("focal node");
    assert_eq!(focal.kind, NodeKind::Focal);
    assert_eq!(focal.position, Position::ORIGIN);
    assert_eq!(session.focal(), Some(&addr("0xa")));
    assert_eq!(session.store().node_count(), 3);
    assert_eq!(session.store().edge_count(), 2);
    assert_eq!(session.ledger().transfers_for(&addr("0xa")).len(), 3);
}

#[test]
fn test_search_for_unknown_address_shows_only_focal() {
    let mut session = session(ExpansionMode::Placeholder);
    let ticket = session.begin_search("0xdead").expect("valid address");

    let outcome = session
        .complete_fetch(ticket, Err(ExplorerError::not_found("address", "0xdead")))
        .expect("not found is empty");

    assert!(matches!(outcome, FetchOutcome::Applied(_)));
    assert_eq!(session.store().node_count(), 1);
    assert!(session.store().edges().is_empty());
}

#[test]
fn test_empty_search_is_invalid_input() {
    let mut session = session(ExpansionMode::Placeholder);
    let err = session.begin_search("   ").expect_err("empty address");
    assert!(matches!(err, ExplorerError::InvalidInput(_)));
    assert_eq!(session.epoch(), 0);
}

#[test]
fn test_new_search_replaces_the_view() {
    let mut session = searched(ExpansionMode::Placeholder);
    session.toggle_node("0xb");
    let ticket = session.begin_search("0xq").expect("valid address");

    session
        .complete_fetch(ticket, Ok(vec![TransferMother::between("0xq", "0xr", 1.0)]))
        .expect("search applies");

    let ids: Vec<&str> = session.store().nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["0xq", "0xr"]);
    assert!(session.expansion().is_empty());
    assert!(session.ledger().transfers_for(&addr("0xa")).is_empty());
}

#[test]
fn test_failed_fetch_leaves_view_untouched() {
    let mut session = searched(ExpansionMode::Placeholder);
    let before = snapshot(&session);
    let ticket = session.explore("0xb").expect("address node");

    let err = session
        .complete_fetch(ticket, Err(ExplorerError::service(500, "boom")))
        .expect_err("fetch failure surfaces");

    assert!(err.is_fetch_failure());
    assert_eq!(snapshot(&session), before);
    assert!(session.ledger().transfers_for(&addr("0xb")).is_empty());
}

// ========================================================================
// Stale Results
// ========================================================================

#[test]
fn test_result_from_superseded_search_is_discarded() {
    let mut session = session(ExpansionMode::Placeholder);
    let first = session.begin_search("0xa").expect("valid address");
    let second = session.begin_search("0xq").expect("valid address");

    let outcome = session.complete_fetch(first, Ok(focal_transfers())).expect("no error");

    assert_eq!(outcome, FetchOutcome::Discarded(StaleReason::EpochChanged));
    assert!(session.store().is_empty());

    session.complete_fetch(second, Ok(Vec::new())).expect("no error");
    assert_eq!(session.focal(), Some(&addr("0xq")));
}

#[test]
fn test_stale_failure_is_not_an_error() {
    let mut session = searched(ExpansionMode::Placeholder);
    let ticket = session.explore("0xb").expect("address node");
    session.begin_search("0xq").expect("valid address");

    let outcome = session
        .complete_fetch(ticket, Err(ExplorerError::service(500, "boom")))
        .expect("stale results are dropped before inspection");

    assert_eq!(outcome, FetchOutcome::Discarded(StaleReason::EpochChanged));
}

#[test]
fn test_expansion_result_after_collapse_is_discarded() {
    let mut session = searched(ExpansionMode::Fetch);
    let ticket = session.toggle_node("0xb").fetch.expect("fetch-backed expansion");
    session.toggle_node("0xb");
    let before = snapshot(&session);

    let outcome = session
        .complete_fetch(ticket, Ok(vec![TransferMother::between("0xz", "0xb", 1.0)]))
        .expect("no error");

    assert_eq!(outcome, FetchOutcome::Discarded(StaleReason::NotExpanded));
    assert_eq!(snapshot(&session), before);
}

#[test]
fn test_expansion_result_from_earlier_generation_is_discarded() {
    let mut session = searched(ExpansionMode::Fetch);
    let old = session.toggle_node("0xb").fetch.expect("first expansion");
    session.toggle_node("0xb");
    let current = session.toggle_node("0xb").fetch.expect("second expansion");

    let stale = session
        .complete_fetch(old, Ok(vec![TransferMother::between("0xold", "0xb", 1.0)]))
        .expect("no error");
    let applied = session
        .complete_fetch(current, Ok(vec![TransferMother::between("0xnew", "0xb", 1.0)]))
        .expect("no error");

    assert_eq!(stale, FetchOutcome::Discarded(StaleReason::GenerationChanged));
    assert!(matches!(applied, FetchOutcome::Applied(_)));
    assert!(!session.store().contains_node("0xold"));
    assert!(session.store().contains_node("0xnew"));
}

#[test]
fn test_explore_result_for_removed_node_is_discarded() {
    let mut session = searched(ExpansionMode::Fetch);
    let expand = session.toggle_node("0xb").fetch.expect("fetch-backed expansion");
    session
        .complete_fetch(expand, Ok(vec![TransferMother::between("0xz", "0xb", 1.0)]))
        .expect("expansion applies");
    let explore = session.explore("0xz").expect("fetched node is an address");
    session.toggle_node("0xb");

    let outcome = session.complete_fetch(explore, Ok(Vec::new())).expect("no error");

    assert_eq!(outcome, FetchOutcome::Discarded(StaleReason::NodeGone));
}

// ========================================================================
// Explore and Expand
// ========================================================================

#[test]
fn test_explore_adds_permanent_counterparties() {
    let mut session = searched(ExpansionMode::Placeholder);
    let ticket = session.explore("0xc").expect("address node");
    assert_eq!(
        ticket.purpose,
        FetchPurpose::Explore {
            node_id: "0xc".to_string()
        }
    );

    session
        .complete_fetch(ticket, Ok(vec![TransferMother::between("0xc", "0xd", 7.0)]))
        .expect("explore applies");
    session.toggle_node("0xc");
    session.toggle_node("0xc");

    assert!(session.store().contains_node("0xd"));
    assert!(session.store().contains_edge(&Edge::id_for("0xc", "0xd")));
    assert!(session.store().node("0xd").is_some_and(|n| n.parent.is_none()));
}

#[test]
fn test_explore_ignores_placeholders_and_unknown_nodes() {
    let mut session = searched(ExpansionMode::Placeholder);
    session.toggle_node("0xb");

    assert!(session.explore("0xb-1").is_none());
    assert!(session.explore("0xnothere").is_none());
}

#[test]
fn test_fetch_expansion_obeys_toggle_law() {
    let mut session = searched(ExpansionMode::Fetch);
    let before = snapshot(&session);

    let toggled = session.toggle_node("0xb");
    assert!(matches!(toggled.outcome, ToggleOutcome::Pending { .. }));
    let ticket = toggled.fetch.expect("ticket for pending expansion");
    session
        .complete_fetch(
            ticket,
            Ok(vec![
                TransferMother::between("0xb", "0xa", 4.0),
                TransferMother::between("0xz", "0xb", 1.0),
            ]),
        )
        .expect("expansion applies");
    assert!(session.store().contains_node("0xz"));

    let collapsed = session.toggle_node("0xb");

    assert!(matches!(collapsed.outcome, ToggleOutcome::Collapsed(_)));
    assert!(collapsed.fetch.is_none());
    assert_eq!(snapshot(&session), before);
}

// ========================================================================
// Edge Selection and History
// ========================================================================

#[test]
fn test_select_edge_collects_both_directions() {
    let mut session = searched(ExpansionMode::Placeholder);
    let ticket = session.explore("0xb").expect("address node");
    session
        .complete_fetch(ticket, Ok(vec![TransferMother::between("0xb", "0xa", 4.0)]))
        .expect("explore applies");

    let amounts: Vec<f64> = session
        .select_edge(&Edge::id_for("0xa", "0xb"))
        .expect("edge exists")
        .iter()
        .map(|t| t.amount)
        .collect();

    assert_eq!(amounts, vec![1.0, 2.0, 4.0]);
    assert!(session.select_edge("e0xnope-0xa").is_none());
}

#[test]
fn test_ids_from_user_input_are_case_insensitive() {
    let mut session = searched(ExpansionMode::Placeholder);

    let related = session.select_edge(" E0XA-0XB ").expect("edge exists");
    assert_eq!(related.len(), 2);

    assert!(session.explore("0XC").is_some());

    let toggled = session.toggle_node("0XB");
    assert!(matches!(toggled.outcome, ToggleOutcome::Expanded(_)));
    assert!(session.store().contains_node("0xb-1"));
}

#[test]
fn test_placeholder_edge_has_no_transfers() {
    let mut session = searched(ExpansionMode::Placeholder);
    session.toggle_node("0xa");

    let related = session.select_edge(&Edge::id_for("0xa", "0xa-1")).expect("edge exists");

    assert!(related.is_empty());
}

#[test]
fn test_history_applies_filter_and_pages() {
    let mut session = searched(ExpansionMode::Placeholder);
    session.set_filter(FilterState {
        direction: Direction::Out,
        ..FilterState::default()
    });

    let history = session.history();
    let page = HistoryPage::paginate(&history, 2, 1);

    assert_eq!(history.len(), 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.rows[0].amount, 2.0);
}

#[test]
fn test_history_honours_sender_filter() {
    let mut session = session(ExpansionMode::Placeholder);
    let ticket = session.begin_search("0xa").expect("valid address");
    session
        .complete_fetch(ticket, Ok(received_transfers()))
        .expect("search applies");
    session.set_filter(FilterState {
        sender: Address::parse("0xC"),
        ..FilterState::default()
    });

    let amounts: Vec<f64> = session.history().iter().map(|t| t.amount).collect();

    assert_eq!(amounts, vec![2.0]);
}

// ========================================================================
// Sender Activity
// ========================================================================

fn received_transfers() -> Vec<Transfer> {
    vec![
        TransferMother::between("0xb", "0xa", 1.25),
        TransferMother::between("0xc", "0xa", 2.0),
        TransferMother::between("0xa", "0xb", 9.0),
        TransferMother::between("0xb", "0xa", 0.5),
    ]
}

#[test]
fn test_sender_activity_sums_received_transfers() {
    let mut session = session(ExpansionMode::Placeholder);
    let ticket = session.begin_search("0xa").expect("valid address");
    session
        .complete_fetch(ticket, Ok(received_transfers()))
        .expect("search applies");

    let activity = session.sender_activity();

    let rows: Vec<(&str, usize, f64)> = activity
        .iter()
        .map(|row| (row.sender.as_str(), row.transfers, row.total_amount))
        .collect();
    assert_eq!(rows, vec![("0xb", 2, 1.75), ("0xc", 1, 2.0)]);
}

#[test]
fn test_sender_activity_respects_filter() {
    let mut session = session(ExpansionMode::Placeholder);
    let ticket = session.begin_search("0xa").expect("valid address");
    session
        .complete_fetch(ticket, Ok(received_transfers()))
        .expect("search applies");
    session.set_filter(FilterState {
        min_amount: Some(1.0),
        ..FilterState::default()
    });

    let activity = session.sender_activity();

    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0].transfers, 1);
    assert_eq!(activity[0].total_amount, 1.25);
}

#[test]
fn test_sender_activity_without_search_is_empty() {
    let session = session(ExpansionMode::Placeholder);
    assert!(session.sender_activity().is_empty());
}
