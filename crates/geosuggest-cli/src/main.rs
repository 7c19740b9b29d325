//! geosuggest: command-line interface for geosuggest-core
//!
//! This binary drives the suggestion coordinator from a terminal: one-shot
//! searches, simulated typing (to watch debounce and supersession at work),
//! and dry-run inspection of the upstream queries.
//!
//! Usage examples
//! --------------
//!
//! - Search once
//!   $ geosuggest search Koch
//!
//! - Type a word one key at a time, 50ms apart
//!   $ geosuggest type Kottayam --interval-ms 50
//!
//! - Show the fan-out queries for a text
//!   $ geosuggest queries Koch
//!
//! - Show the effective configuration
//!   $ geosuggest --config geosuggest.toml config
//!
//! Configuration
//! -------------
//!
//! Defaults target Kerala on the public Nominatim endpoint. Override them
//! with `--config <file.toml>` or `GEOSUGGEST_*` environment variables
//! (e.g. `GEOSUGGEST_DEBOUNCE_MS=300`, `GEOSUGGEST_REGION__NAME=Goa`).
mod args;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use geosuggest_core::dispatch::build_queries;
use geosuggest_core::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_state(state: &SuggestState, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    if state.suggestions.is_empty() {
        if state.upstream_unavailable {
            println!("Search unavailable for '{}' (every upstream query failed)", state.query);
        } else {
            println!("No results for '{}'", state.query);
        }
        return Ok(());
    }

    for (i, s) in state.suggestions.iter().enumerate() {
        // '*' marks names that start with what was typed
        let marker = if s.name_starts_with(&state.query) { '*' } else { ' ' };
        println!(
            "{:>2}.{marker} {} [{}] (source {}, importance {:.3})",
            i + 1,
            s.display_name,
            s.category,
            s.source_priority,
            s.importance
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let mut config = SuggestConfig::load_from(args.config.as_deref())?;
    if let Some(limit) = args.limit {
        config.max_results = limit;
        config.validate()?;
    }
    tracing::debug!(?config, "effective configuration");

    match args.command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Queries { text } => {
            for q in build_queries(&text, &config)? {
                println!("[{}] {:?}", q.source_priority, q.bias);
                println!("    {}", q.url);
            }
        }

        Commands::Search { text } => {
            let source = Arc::new(HttpSource::new(&config)?);
            let coordinator = SuggestCoordinator::new(config, source)?;
            coordinator.search(&text);
            let state = coordinator.settle().await;
            if !state.has_searched && !args.json {
                println!(
                    "Query too short; type at least {} characters",
                    coordinator.config().min_query_chars
                );
            } else {
                print_state(&state, args.json)?;
            }
        }

        Commands::Type { text, interval_ms } => {
            let source = Arc::new(HttpSource::new(&config)?);
            let coordinator = SuggestCoordinator::new(config, source)?;
            let interval = Duration::from_millis(interval_ms);

            let ends = text
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .collect::<Vec<_>>();
            for end in ends {
                let typed = &text[..end];
                coordinator.search(typed);
                eprintln!("typed {typed:?} → {:?}", coordinator.phase());
                tokio::time::sleep(interval).await;
            }

            let state = coordinator.settle().await;
            eprintln!(
                "settled after {} session(s); showing session {}",
                coordinator.latest_sequence_id(),
                state.sequence_id
            );
            print_state(&state, args.json)?;
        }
    }

    Ok(())
}
