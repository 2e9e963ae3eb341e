use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

mod cli;
mod client;
mod constants;
mod domain;
mod event;
mod graph;
mod report;
mod state;

#[cfg(test)]
mod test_utils;

use crate::{
    cli::{Cli, Commands, GraphArgs, HistoryArgs},
    client::{ExplorerClient, Paging},
    constants::{DEFAULT_LOG_FILTER, LOGO, TAGLINE, VERBOSE_LOG_FILTER, VERSION},
    domain::{Address, ExplorerError},
    event::FetchLoop,
    state::{AppConfig, FetchTicket, GraphSession, HistoryPage},
};

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load().with_overrides(cli.api_url, cli.expansion);

    match cli.command {
        Commands::Graph(args) => run_graph(&config, args).await,
        Commands::Summary { address, json } => run_summary(&config, &address, json).await,
        Commands::History(args) => run_history(&config, args).await,
        Commands::Config { save } => run_config(&config, save),
        Commands::Version => {
            println!("{LOGO}");
            println!("addrscope v{VERSION}");
            println!("{TAGLINE}");
            Ok(())
        }
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` wins over `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn connect(config: &AppConfig) -> Result<ExplorerClient> {
    let client = ExplorerClient::new(&config.api_url, config.http_config())
        .map_err(ExplorerError::into_report)?;
    tracing::debug!("Using API at {}", client.base_url());
    Ok(client)
}

/// Print non-fatal fetch failures.
fn warn_failures(failures: &[(FetchTicket, ExplorerError)]) {
    for (ticket, err) in failures {
        eprintln!("warning: fetch for {} failed: {err}", ticket.address);
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn run_graph(config: &AppConfig, args: GraphArgs) -> Result<()> {
    let mut fetches = FetchLoop::new(connect(config)?);
    let mut session = GraphSession::from_config(config);

    let search = session
        .begin_search(&args.address)
        .map_err(ExplorerError::into_report)?;
    fetches.dispatch(search);
    if let Some((_, err)) = fetches.settle(&mut session).await.into_iter().next() {
        return Err(err.into_report());
    }

    for node_id in &args.explore {
        match session.explore(node_id) {
            Some(ticket) => fetches.dispatch(ticket),
            None => eprintln!("warning: {node_id} is not an address node in the graph"),
        }
    }
    tracing::debug!("{} explore fetches in flight", fetches.in_flight());
    warn_failures(&fetches.settle(&mut session).await);

    // Sequential so later toggles can target children of earlier ones.
    for node_id in &args.expand {
        let toggled = session.toggle_node(node_id);
        if matches!(toggled.outcome, graph::ToggleOutcome::Ignored) {
            eprintln!("warning: no node {node_id} to expand");
        }
        if let Some(ticket) = toggled.fetch {
            fetches.dispatch(ticket);
            warn_failures(&fetches.settle(&mut session).await);
        }
    }

    if let Some(path) = &args.svg {
        std::fs::write(path, graph::svg::render(session.store(), &config.currency_symbol))?;
        tracing::info!("Wrote SVG to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.store())?);
    } else {
        print!(
            "{}",
            report::graph_text(session.store(), session.expansion(), &config.currency_symbol)
        );
    }

    for edge_id in &args.edges {
        match session.select_edge(edge_id) {
            Some(transfers) => {
                println!("\n{edge_id} ({} transfers)", transfers.len());
                print!("{}", report::transfers_text(transfers, &config.currency_symbol));
            }
            None => eprintln!("warning: no edge {edge_id} in the graph"),
        }
    }
    Ok(())
}

async fn run_summary(config: &AppConfig, raw: &str, json: bool) -> Result<()> {
    let address = Address::parse(raw)
        .ok_or_else(|| ExplorerError::invalid_input("address must not be empty").into_report())?;
    let client = connect(config)?;

    let summary = client
        .fetch_address_summary(&address)
        .await
        .map_err(ExplorerError::into_report)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::summary_text(&summary, &config.currency_symbol));
    }
    Ok(())
}

/// Listing pages are cut by the service. The per-sender view needs every
/// matching row, so it fetches unpaged.
async fn run_history(config: &AppConfig, args: HistoryArgs) -> Result<()> {
    let filter = args.filter().map_err(ExplorerError::into_report)?;
    let client = connect(config)?;
    let mut session = GraphSession::from_config(config);
    session.set_filter(filter);
    if !session.filter().is_empty() {
        tracing::debug!("History filter: {:?}", session.filter());
    }

    let ticket = session
        .begin_search(&args.address)
        .map_err(ExplorerError::into_report)?;
    let paging = (!args.by_sender).then_some(Paging {
        page: args.page.max(1),
        limit: config.page_size.max(1),
    });
    let fetched = client
        .fetch_history(&ticket.address, session.filter(), paging)
        .await;
    let total = fetched.as_ref().map_or(0, |batch| batch.total);
    session
        .complete_fetch(ticket, fetched.map(|batch| batch.transfers))
        .map_err(ExplorerError::into_report)?;

    let Some(focal) = session.focal().cloned() else {
        return Ok(());
    };

    if args.by_sender {
        let activity = session.sender_activity();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&activity)?);
        } else {
            print!("{}", report::senders_text(&focal, &activity, &config.currency_symbol));
        }
        return Ok(());
    }

    let history = session.history();
    let page = HistoryPage::served(&history, args.page, config.page_size, total);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", report::history_text(&focal, &page, &config.currency_symbol));
    }
    Ok(())
}

fn run_config(config: &AppConfig, save: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if save {
        let path = config.save()?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
