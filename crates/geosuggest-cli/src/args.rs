use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geosuggest-cli
#[derive(Debug, Parser)]
#[command(
    name = "geosuggest",
    version,
    about = "CLI for driving the geosuggest-core place autocomplete coordinator"
)]
pub struct CliArgs {
    /// Optional TOML config file (merged over defaults, under GEOSUGGEST_* env vars)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Override the maximum number of suggestions (default: 8)
    #[arg(short = 'l', long = "limit", global = true)]
    pub limit: Option<usize>,

    /// Print suggestions as JSON instead of a numbered list
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG wins if set.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one debounced search and print the ranked suggestions
    Search {
        /// Place name or prefix (e.g. "Koch")
        text: String,
    },

    /// Replay TEXT as keystrokes through the coordinator, then print the result
    Type {
        /// Text to type one character at a time
        text: String,

        /// Delay between keystrokes in milliseconds
        #[arg(short = 'i', long = "interval-ms", default_value_t = 80)]
        interval_ms: u64,
    },

    /// Print the upstream queries a search would issue, without sending them
    Queries {
        /// Place name or prefix
        text: String,
    },

    /// Print the effective configuration as JSON
    Config,
}
