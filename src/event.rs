//! Fetch dispatch and completion events.
//!
//! Fetches run as tokio tasks; each reports back over an unbounded channel
//! and the owner of the [`GraphSession`] applies completions one at a time.

use rand::Rng;
use tokio::sync::mpsc;

use crate::client::ExplorerClient;
use crate::domain::{ExplorerError, Transfer};
use crate::state::{FetchOutcome, FetchTicket, GraphSession};

/// A finished fetch, still tagged with the ticket it was started under.
#[derive(Debug)]
pub struct FetchEvent {
    pub ticket: FetchTicket,
    pub result: Result<Vec<Transfer>, ExplorerError>,
}

/// Spawns fetch tasks and collects their completions.
#[derive(Debug)]
pub struct FetchLoop {
    client: ExplorerClient,
    event_tx: mpsc::UnboundedSender<FetchEvent>,
    event_rx: mpsc::UnboundedReceiver<FetchEvent>,
    in_flight: usize,
}

impl FetchLoop {
    #[must_use]
    pub fn new(client: ExplorerClient) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            client,
            event_tx,
            event_rx,
            in_flight: 0,
        }
    }

    /// Number of fetches started but not yet received.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start fetching the transfers `ticket` asks for.
    pub fn dispatch(&mut self, ticket: FetchTicket) {
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        self.in_flight += 1;
        tracing::debug!("Dispatching fetch #{} for {}", ticket.id, ticket.address);

        tokio::spawn(async move {
            let result = client.fetch_transfers(&ticket.address).await;
            // Receiver may be dropped during shutdown - safe to ignore
            let _ = event_tx.send(FetchEvent { ticket, result });
        });
    }

    /// Wait for the next completion. Returns `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<FetchEvent> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.event_rx.recv().await?;
        self.in_flight -= 1;
        Some(event)
    }

    /// Apply completions to `session` until nothing is in flight.
    ///
    /// Failed fetches leave the session untouched and are returned together
    /// with their tickets.
    pub async fn settle<R: Rng>(
        &mut self,
        session: &mut GraphSession<R>,
    ) -> Vec<(FetchTicket, ExplorerError)> {
        let mut failures = Vec::new();
        while let Some(FetchEvent { ticket, result }) = self.next().await {
            match session.complete_fetch(ticket.clone(), result) {
                Ok(FetchOutcome::Applied(report)) if report.is_noop() => {
                    tracing::debug!("Fetch #{} added nothing new", ticket.id);
                }
                Ok(FetchOutcome::Applied(report)) => tracing::debug!(
                    "Applied fetch #{}: +{} nodes, +{} edges",
                    ticket.id,
                    report.nodes_added,
                    report.edges_added
                ),
                Ok(FetchOutcome::Discarded(reason)) => {
                    tracing::info!("Fetch #{} went stale: {reason:?}", ticket.id);
                }
                Err(err) => failures.push((ticket, err)),
            }
        }
        failures
    }
}
