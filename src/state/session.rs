//! The graph session: one explorer view and its in-flight fetches.
//!
//! User operations (search, explore, toggle) mutate the session directly or
//! hand out a [`FetchTicket`]. Fetch results come back through
//! [`GraphSession::complete_fetch`] together with their ticket, which is
//! checked against the current view before anything is merged.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::{Address, ExplorerError, FilterState, Transfer};
use crate::graph::{
    Edge, ExpansionController, ExpansionState, GraphStore, LayoutHinter, MergeReport, NodeKind,
    Position, ToggleOutcome,
};

use super::analysis::{SenderActivity, sender_activity};
use super::config::AppConfig;
use super::ledger::TransferLedger;

// ============================================================================
// Fetch Tickets
// ============================================================================

/// What a fetch result will be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPurpose {
    /// Replace the view with one centered on the ticket's address.
    Search,
    /// Add the counterparties of an existing node permanently.
    Explore { node_id: String },
    /// Fill a fetch-backed expansion of `node_id`.
    Expand { node_id: String, generation: u64 },
}

/// Identity of one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub address: Address,
    pub purpose: FetchPurpose,
    /// View epoch at the time the fetch was started.
    pub epoch: u64,
}

/// Why a completed fetch was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// A newer search replaced the view.
    EpochChanged,
    /// The node the result belongs to is no longer displayed.
    NodeGone,
    /// The node was collapsed before the result arrived.
    NotExpanded,
    /// The node was collapsed and expanded again.
    GenerationChanged,
}

/// Result of [`GraphSession::complete_fetch`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied(MergeReport),
    Discarded(StaleReason),
}

/// Result of [`GraphSession::toggle_node`].
#[derive(Debug, Clone, PartialEq)]
pub struct Toggled {
    pub outcome: ToggleOutcome,
    /// Set when the expansion waits for a fetch.
    pub fetch: Option<FetchTicket>,
}

// ============================================================================
// GraphSession
// ============================================================================

/// State of one explorer view.
#[derive(Debug)]
pub struct GraphSession<R> {
    store: GraphStore,
    expansion: ExpansionState,
    filter: FilterState,
    ledger: TransferLedger,
    controller: ExpansionController<R>,
    focal: Option<Address>,
    epoch: u64,
    next_ticket: u64,
}

impl GraphSession<StdRng> {
    /// Session with layout and expansion settings from `config` and an
    /// entropy-seeded jitter source.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let hinter = LayoutHinter::new(config.layout, StdRng::from_entropy());
        Self::new(ExpansionController::new(
            hinter,
            config.expansion,
            config.placeholder_children,
        ))
    }
}

impl<R: Rng> GraphSession<R> {
    #[must_use]
    pub fn new(controller: ExpansionController<R>) -> Self {
        Self {
            store: GraphStore::new(),
            expansion: ExpansionState::new(),
            filter: FilterState::default(),
            ledger: TransferLedger::new(),
            controller,
            focal: None,
            epoch: 0,
            next_ticket: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &TransferLedger {
        &self.ledger
    }

    /// Address the current view is centered on.
    #[must_use]
    pub fn focal(&self) -> Option<&Address> {
        self.focal.as_ref()
    }

    #[cfg(test)]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Start a search for `raw`. The current view stays until the result
    /// arrives, but results of fetches started before this call go stale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty address.
    pub fn begin_search(&mut self, raw: &str) -> Result<FetchTicket, ExplorerError> {
        let address = Address::parse(raw)
            .ok_or_else(|| ExplorerError::invalid_input("address must not be empty"))?;
        self.epoch += 1;
        tracing::info!("Searching {address} (epoch {})", self.epoch);
        Ok(self.issue(address, FetchPurpose::Search))
    }

    /// Fetch the counterparties of an existing address node and add them
    /// permanently. Returns `None` for unknown nodes and placeholders.
    pub fn explore(&mut self, node_id: &str) -> Option<FetchTicket> {
        let node_id = canonical_id(node_id);
        let node = self.store.node(&node_id)?;
        if node.kind == NodeKind::Placeholder {
            tracing::debug!("Not exploring placeholder {node_id}");
            return None;
        }
        let address = Address::parse(&node.id)?;
        let purpose = FetchPurpose::Explore {
            node_id: node.id.clone(),
        };
        Some(self.issue(address, purpose))
    }

    /// Expand or collapse `node_id`.
    pub fn toggle_node(&mut self, node_id: &str) -> Toggled {
        let node_id = canonical_id(node_id);
        let outcome = self
            .controller
            .toggle(&node_id, &mut self.store, &mut self.expansion);

        let fetch = match &outcome {
            ToggleOutcome::Pending {
                node_id,
                address,
                generation,
            } => {
                let purpose = FetchPurpose::Expand {
                    node_id: node_id.clone(),
                    generation: *generation,
                };
                Some(self.issue(address.clone(), purpose))
            }
            _ => None,
        };

        Toggled { outcome, fetch }
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Stale results are discarded without touching anything. `NotFound`
    /// counts as an empty transfer list.
    ///
    /// # Errors
    ///
    /// Returns the fetch error for failed fetches; the view is unchanged.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Transfer>, ExplorerError>,
    ) -> Result<FetchOutcome, ExplorerError> {
        if let Some(reason) = self.staleness(&ticket) {
            tracing::debug!("Discarding fetch #{} for {}: {reason:?}", ticket.id, ticket.address);
            return Ok(FetchOutcome::Discarded(reason));
        }

        let transfers = match result {
            Ok(transfers) => transfers,
            Err(err) if err.is_not_found() => {
                tracing::debug!("No transfers for {}", ticket.address);
                Vec::new()
            }
            Err(err) if err.is_fetch_failure() => {
                tracing::warn!("Fetch #{} for {} failed: {err}", ticket.id, ticket.address);
                return Err(err);
            }
            Err(err) => {
                tracing::warn!("Unusable result for {}: {err}", ticket.address);
                return Err(err);
            }
        };

        let report = match &ticket.purpose {
            FetchPurpose::Search => self.seed_view(&ticket.address, &transfers),
            FetchPurpose::Explore { node_id } => {
                let reference = self.position_of(node_id);
                self.controller.apply_transfers(
                    &mut self.store,
                    &transfers,
                    &ticket.address,
                    reference,
                    None,
                )
            }
            FetchPurpose::Expand { node_id, .. } => {
                let reference = self.position_of(node_id);
                self.controller.apply_transfers(
                    &mut self.store,
                    &transfers,
                    &ticket.address,
                    reference,
                    Some(node_id),
                )
            }
        };

        self.ledger.record(ticket.address, transfers);
        Ok(FetchOutcome::Applied(report))
    }

    /// Transfers behind the edge `edge_id`, in either direction.
    ///
    /// Returns `None` when the edge is not displayed.
    #[must_use]
    pub fn select_edge(&self, edge_id: &str) -> Option<Vec<&Transfer>> {
        let edge = self.store.edge(&canonical_id(edge_id))?;
        Some(self.ledger.between(&edge.source, &edge.target))
    }

    /// Focal transfers passing the active filter, in fetch order.
    #[must_use]
    pub fn history(&self) -> Vec<Transfer> {
        let Some(focal) = &self.focal else {
            return Vec::new();
        };
        self.ledger
            .transfers_for(focal)
            .iter()
            .filter(|transfer| self.filter.matches(transfer, focal))
            .cloned()
            .collect()
    }

    /// Who sent the filtered focal transfers, and how much.
    #[must_use]
    pub fn sender_activity(&self) -> Vec<SenderActivity> {
        match &self.focal {
            Some(focal) => sender_activity(&self.history(), focal),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn issue(&mut self, address: Address, purpose: FetchPurpose) -> FetchTicket {
        self.next_ticket += 1;
        FetchTicket {
            id: self.next_ticket,
            address,
            purpose,
            epoch: self.epoch,
        }
    }

    fn staleness(&self, ticket: &FetchTicket) -> Option<StaleReason> {
        if ticket.epoch != self.epoch {
            return Some(StaleReason::EpochChanged);
        }
        match &ticket.purpose {
            FetchPurpose::Search => None,
            FetchPurpose::Explore { node_id } => {
                (!self.store.contains_node(node_id)).then_some(StaleReason::NodeGone)
            }
            FetchPurpose::Expand {
                node_id,
                generation,
            } => {
                if !self.store.contains_node(node_id) {
                    Some(StaleReason::NodeGone)
                } else {
                    match self.expansion.generation(node_id) {
                        None => Some(StaleReason::NotExpanded),
                        Some(current) if current != *generation => {
                            Some(StaleReason::GenerationChanged)
                        }
                        Some(_) => None,
                    }
                }
            }
        }
    }

    fn seed_view(&mut self, address: &Address, transfers: &[Transfer]) -> MergeReport {
        self.clear_view();
        self.focal = Some(address.clone());

        let focal = ExpansionController::<R>::focal_node(address, Position::ORIGIN);
        let seeded = self.store.merge([focal], Vec::<Edge>::new());
        let added = self.controller.apply_transfers(
            &mut self.store,
            transfers,
            address,
            Position::ORIGIN,
            None,
        );

        MergeReport {
            nodes_added: seeded.nodes_added + added.nodes_added,
            edges_added: seeded.edges_added + added.edges_added,
        }
    }

    fn clear_view(&mut self) {
        self.store.clear();
        self.expansion.clear();
        self.ledger.clear();
    }

    fn position_of(&self, node_id: &str) -> Position {
        self.store
            .node(node_id)
            .map_or(Position::ORIGIN, |node| node.position)
    }
}

/// Node and edge ids derive from lower-cased addresses.
fn canonical_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}
