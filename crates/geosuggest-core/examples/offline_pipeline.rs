//! Offline pipeline example for geosuggest-rs
//!
//! Runs the filter → normalize → dedupe → rank stages on canned upstream
//! records, without a coordinator or network.

use geosuggest_core::model::RawPlace;
use geosuggest_core::prelude::*;
use geosuggest_core::session::aggregate;

const BOUNDED: &str = r#"[
  {"place_id": 1, "lat": "9.9312", "lon": "76.2673", "name": "Kochi", "class": "place", "type": "city",
   "display_name": "Kochi, Ernakulam, Kerala, India", "importance": 0.62,
   "address": {"city": "Kochi", "county": "Ernakulam", "state": "Kerala"}},
  {"place_id": 2, "lat": "9.93", "lon": "76.26", "name": "Kochi Metro", "class": "railway", "type": "station",
   "display_name": "Kochi Metro, Kerala, India"}
]"#;

const REGIONAL: &str = r#"[
  {"place_id": 3, "lat": "10.0", "lon": "76.3", "name": "Ernakulam", "class": "boundary", "type": "administrative",
   "display_name": "Ernakulam, Kerala, India", "importance": 0.45,
   "address": {"state_district": "Ernakulam", "state": "Kerala"}},
  {"place_id": 4, "lat": "9.9312", "lon": "76.2673", "name": "Kochi", "class": "place", "type": "city",
   "display_name": "Kochi, Ernakulam, Kerala, India", "importance": 0.62,
   "address": {"city": "Kochi", "county": "Ernakulam", "state": "Kerala"}}
]"#;

fn main() -> Result<()> {
    println!("=== geosuggest-rs Offline Pipeline Example ===\n");

    let config = SuggestConfig::default();
    let bounded: Vec<RawPlace> = serde_json::from_str(BOUNDED)?;
    let regional: Vec<RawPlace> = serde_json::from_str(REGIONAL)?;
    println!("Raw records: {} + {}", bounded.len(), regional.len());

    let tagged = bounded
        .into_iter()
        .map(|r| (1, r))
        .chain(regional.into_iter().map(|r| (2, r)));
    let ranked = aggregate(tagged, &config);

    println!("Ranked suggestions:");
    for (i, s) in ranked.iter().enumerate() {
        println!(
            "{}. {} [{}] (source {}, importance {:.2}, id {})",
            i + 1,
            s.display_name,
            s.category,
            s.source_priority,
            s.importance,
            s.id
        );
    }
    Ok(())
}
