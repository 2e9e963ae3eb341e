//! Command-line interface definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::constants::VERSION;
use crate::domain::{Address, AddressRole, Direction, ExplorerError, FilterState};
use crate::graph::ExpansionMode;

/// addrscope - explore the transfer graph around an address
#[derive(Debug, Parser)]
#[command(version = VERSION, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Explorer API root (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// How node expansion obtains children
    #[arg(long, global = true, value_enum)]
    pub expansion: Option<ExpansionMode>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the transfer graph around an address
    Graph(GraphArgs),
    /// Show balance and holdings of an address
    Summary {
        address: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List filtered, paginated transfer history
    History(HistoryArgs),
    /// Print the effective configuration
    Config {
        /// Persist the effective configuration
        #[arg(long)]
        save: bool,
    },
    /// Display version with ASCII art
    Version,
}

#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Address to center the graph on
    pub address: String,

    /// Also add the counterparties of these nodes
    #[arg(long = "explore", value_name = "NODE")]
    pub explore: Vec<String>,

    /// Toggle expansion of these nodes, in order
    #[arg(long = "expand", value_name = "NODE")]
    pub expand: Vec<String>,

    /// Print the transfers behind these edges
    #[arg(long = "edge", value_name = "EDGE_ID")]
    pub edges: Vec<String>,

    /// Write the graph as SVG
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub address: String,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, value_enum, default_value_t = Direction::All)]
    pub direction: Direction,

    #[arg(long, value_enum, default_value_t = AddressRole::All)]
    pub role: AddressRole,

    /// Minimum amount
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Maximum amount
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub since: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub until: Option<NaiveDate>,

    /// Only transfers sent by this counterpart
    #[arg(long, value_name = "ADDRESS")]
    pub sender: Option<String>,

    /// Summarize received transfers per sender instead of listing them
    #[arg(long)]
    pub by_sender: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl HistoryArgs {
    /// Filter described by the flags.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for negative amounts, inverted ranges or an
    /// empty `--sender`.
    pub fn filter(&self) -> Result<FilterState, ExplorerError> {
        if self.min.is_some_and(|min| min < 0.0) || self.max.is_some_and(|max| max < 0.0) {
            return Err(ExplorerError::invalid_input("amounts must not be negative"));
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(ExplorerError::invalid_input(format!(
                "--min {min} is greater than --max {max}"
            )));
        }
        if let (Some(since), Some(until)) = (self.since, self.until)
            && since > until
        {
            return Err(ExplorerError::invalid_input(format!(
                "--since {since} is after --until {until}"
            )));
        }

        let sender = match &self.sender {
            Some(raw) => Some(
                Address::parse(raw)
                    .ok_or_else(|| ExplorerError::invalid_input("--sender must not be empty"))?,
            ),
            None => None,
        };

        Ok(FilterState {
            direction: self.direction,
            address_role: self.role,
            min_amount: self.min,
            max_amount: self.max,
            start: self.since,
            end: self.until,
            sender,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `InvalidInput` when the value is not a calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ExplorerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| ExplorerError::invalid_input(format!("invalid date '{raw}': {e}")))
}
