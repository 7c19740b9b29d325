//! Basic usage example for geosuggest-rs
//!
//! This example demonstrates how to:
//! - Build a coordinator over the real HTTP upstream
//! - Feed it keystrokes the way a text field would
//! - Observe the loading flag and the final ranked list
//!
//! Needs network access to the public geocoder.

use geosuggest_core::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== geosuggest-rs Basic Usage Example ===\n");

    let config = SuggestConfig::load()?;
    let source = Arc::new(HttpSource::new(&config)?);
    let coordinator = SuggestCoordinator::new(config, source)?
        .with_on_select(|s| println!("→ selected {} ({})", s.display_name, s.id));

    // Example 1: typing, one character every 60ms
    println!("--- Example 1: Typing \"Kottay\" ---");
    let mut states = coordinator.subscribe();
    let text = "Kottay";
    for end in 1..=text.len() {
        coordinator.search(&text[..end]);
        tokio::time::sleep(Duration::from_millis(60)).await;
    }

    while states.changed().await.is_ok() {
        let state = states.borrow_and_update().clone();
        if state.loading {
            println!("loading results for '{}'...", state.query);
        } else if state.has_searched {
            break;
        }
    }

    let state = coordinator.settle().await;
    if state.suggestions.is_empty() {
        println!("No results for '{}'", state.query);
    }
    for (i, s) in state.suggestions.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, s.display_name, s.category);
    }
    println!();

    // Example 2: selecting a suggestion
    println!("--- Example 2: Selecting the top suggestion ---");
    if let Some(top) = state.suggestions.first() {
        coordinator.select(top);
    }

    coordinator.dispose();
    Ok(())
}
