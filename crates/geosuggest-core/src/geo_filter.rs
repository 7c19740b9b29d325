// crates/geosuggest-core/src/geo_filter.rs

//! # Geo Filter
//!
//! A record is kept when it is an accepted administrative/settlement kind
//! **and** it is either inside the region's bounding box or textually names
//! the region. The textual fallback recovers records the upstream places
//! just outside the box at region borders.

use crate::config::RegionConfig;
use crate::model::RawPlace;
use crate::text::contains_folded;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static ACCEPTED_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "administrative",
        "city",
        "town",
        "village",
        "municipality",
        "county",
        "state_district",
        "district",
    ]
    .into_iter()
    .collect()
});

/// POIs, roads, buildings etc. are rejected regardless of location. The
/// `boundary` class alone is not enough: parks, protected areas and postal
/// codes share it, so only the `type` decides.
pub fn is_accepted_kind(raw: &RawPlace) -> bool {
    ACCEPTED_TYPES.contains(raw.kind())
}

pub fn is_inside_bbox(raw: &RawPlace, region: &RegionConfig) -> bool {
    raw.coordinates()
        .is_some_and(|(lat, lon)| region.bbox.contains(lat, lon))
}

pub fn names_region(raw: &RawPlace, region: &RegionConfig) -> bool {
    raw.address()
        .state
        .as_deref()
        .is_some_and(|s| contains_folded(s, &region.name))
        || contains_folded(raw.display_name(), &region.name)
}

pub fn is_in_region(raw: &RawPlace, region: &RegionConfig) -> bool {
    is_accepted_kind(raw) && (is_inside_bbox(raw, region) || names_region(raw, region))
}
