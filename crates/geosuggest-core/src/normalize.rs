// crates/geosuggest-core/src/normalize.rs

//! # Suggestion Normalizer
//!
//! Maps one [`RawPlace`] into a [`Suggestion`]. Each output field has its own
//! ordered fallback chain, implemented as a separate function so the chains
//! can be tested in isolation:
//!
//! | field          | first present of                                                   |
//! |----------------|--------------------------------------------------------------------|
//! | `district`     | `address.county`, `address.state_district`, `address.district`     |
//! | `name`         | `address.city`, `.town`, `.municipality`, record `name`, first segment of `display_name` |
//! | `display_name` | `name`, `district` (if distinct), region name                      |
//! | `category`     | see [`category_of`]                                                |
//! | `importance`   | upstream `importance`, else `0`                                    |

use crate::config::RegionConfig;
use crate::geo_filter::is_accepted_kind;
use crate::model::{Category, RawAddress, RawPlace, Suggestion};
use crate::text::{equals_folded, first_segment, fold_key};

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn district_of(address: &RawAddress) -> Option<&str> {
    present(&address.county)
        .or_else(|| present(&address.state_district))
        .or_else(|| present(&address.district))
}

/// Falls back to `"Unknown"` only when every source is empty.
pub fn name_of(raw: &RawPlace) -> String {
    let a = raw.address();
    present(&a.city)
        .or_else(|| present(&a.town))
        .or_else(|| present(&a.municipality))
        .or_else(|| present(&raw.name))
        .or_else(|| first_segment(raw.display_name()))
        .unwrap_or("Unknown")
        .to_string()
}

fn is_boundary(raw: &RawPlace) -> bool {
    raw.kind() == "administrative" || (raw.class() == "boundary" && is_accepted_kind(raw))
}

/// First match wins:
/// 1. boundary/administrative with a county or state district → `District`
/// 2. boundary/administrative otherwise → `Administrative`
/// 3. type `city` or `address.city` → `City`
/// 4. type `town` or `address.town` → `Town`
/// 5. type `municipality` or `address.municipality` → `Municipality`
/// 6. → `Location`
pub fn category_of(raw: &RawPlace) -> Category {
    let a = raw.address();
    let kind = raw.kind();

    if is_boundary(raw) {
        if present(&a.county).is_some() || present(&a.state_district).is_some() {
            return Category::District;
        }
        return Category::Administrative;
    }
    if kind == "city" || present(&a.city).is_some() {
        return Category::City;
    }
    if kind == "town" || present(&a.town).is_some() {
        return Category::Town;
    }
    if kind == "municipality" || present(&a.municipality).is_some() {
        return Category::Municipality;
    }
    Category::Location
}

pub fn display_name_of(name: &str, district: Option<&str>, region: &str) -> String {
    let mut parts: Vec<&str> = vec![name];
    if let Some(d) = district {
        if !equals_folded(d, name) {
            parts.push(d);
        }
    }
    if !region.is_empty() {
        parts.push(region);
    }
    parts.join(", ")
}

fn id_of(raw: &RawPlace, name: &str) -> String {
    if let Some(id) = raw.place_id.as_ref().or(raw.osm_id.as_ref()) {
        return id.clone();
    }
    match raw.coordinates() {
        Some((lat, lon)) => format!("local:{}:{lat},{lon}", fold_key(name)),
        None => format!("local:{}", fold_key(name)),
    }
}

pub fn normalize(raw: &RawPlace, source_priority: u8, region: &RegionConfig) -> Suggestion {
    let district = district_of(raw.address()).map(str::to_string);
    let name = name_of(raw);
    let display_name = display_name_of(&name, district.as_deref(), &region.name);

    Suggestion {
        id: id_of(raw, &name),
        display_name,
        kind: raw.kind().to_string(),
        category: category_of(raw),
        district,
        source_priority,
        importance: raw.importance.unwrap_or(0.0),
        latitude: raw.lat,
        longitude: raw.lon,
        name,
    }
}
