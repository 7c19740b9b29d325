mod common;

use common::{city, district, raw, test_config};
use geosuggest_core::geo_filter::{is_accepted_kind, is_in_region};
use geosuggest_core::normalize::{category_of, district_of, name_of, normalize};
use geosuggest_core::rank::{dedupe, rank};
use geosuggest_core::session::aggregate;
use geosuggest_core::traits::NameMatch;
use geosuggest_core::{Category, RegionConfig, Suggestion};
use serde_json::json;

fn suggestion(name: &str, district: Option<&str>, category: Category, priority: u8, importance: f64) -> Suggestion {
    Suggestion {
        id: format!("{name}-{priority}"),
        name: name.to_string(),
        display_name: name.to_string(),
        kind: category.as_str().to_string(),
        category,
        district: district.map(str::to_string),
        source_priority: priority,
        importance,
        latitude: None,
        longitude: None,
    }
}

// -----------------------------------------------------------------------------
// Normalizer
// -----------------------------------------------------------------------------

#[test]
fn normalizes_city_record() {
    let region = RegionConfig::default();
    let s = normalize(&raw(city(42, "Kochi", "Ernakulam", 0.61)), 1, &region);

    assert_eq!(s.id, "42");
    assert_eq!(s.name, "Kochi");
    assert_eq!(s.district.as_deref(), Some("Ernakulam"));
    assert_eq!(s.display_name, "Kochi, Ernakulam, Kerala");
    assert_eq!(s.kind, "city");
    assert_eq!(s.category, Category::City);
    assert_eq!(s.source_priority, 1);
    assert_eq!(s.importance, 0.61);
    assert_eq!(s.latitude, Some(9.9312));
}

#[test]
fn district_equal_to_name_is_not_repeated() {
    let region = RegionConfig::default();
    let s = normalize(&raw(district(7, "Ernakulam", 0.5)), 2, &region);
    assert_eq!(s.display_name, "Ernakulam, Kerala");
    assert_eq!(s.category, Category::District);
}

#[test]
fn district_prefers_county_then_state_district_then_district() {
    let r = raw(json!({
        "address": { "state_district": "B", "district": "C" }
    }));
    assert_eq!(district_of(r.address()), Some("B"));

    let r = raw(json!({
        "address": { "county": "A", "state_district": "B", "district": "C" }
    }));
    assert_eq!(district_of(r.address()), Some("A"));

    let r = raw(json!({ "address": { "district": "C" } }));
    assert_eq!(district_of(r.address()), Some("C"));

    let r = raw(json!({}));
    assert_eq!(district_of(r.address()), None);
}

#[test]
fn name_falls_back_through_address_name_and_display() {
    let r = raw(json!({ "name": "N", "address": { "town": "T", "municipality": "M" } }));
    assert_eq!(name_of(&r), "T");

    let r = raw(json!({ "name": "N", "address": { "municipality": "M" } }));
    assert_eq!(name_of(&r), "M");

    let r = raw(json!({ "name": "N", "display_name": "D, Kerala" }));
    assert_eq!(name_of(&r), "N");

    let r = raw(json!({ "display_name": "Munnar, Idukki, Kerala, India" }));
    assert_eq!(name_of(&r), "Munnar");
}

#[test]
fn category_derivation_order() {
    let admin_without_district = raw(json!({ "type": "administrative", "class": "boundary" }));
    assert_eq!(category_of(&admin_without_district), Category::Administrative);

    let boundary_with_county = raw(json!({
        "type": "county", "class": "boundary", "address": { "county": "Idukki" }
    }));
    assert_eq!(category_of(&boundary_with_county), Category::District);

    let town_with_city_field = raw(json!({ "type": "town", "address": { "city": "X" } }));
    assert_eq!(category_of(&town_with_city_field), Category::City);

    let village_in_town = raw(json!({ "type": "village", "address": { "town": "Aluva" } }));
    assert_eq!(category_of(&village_in_town), Category::Town);

    let municipality = raw(json!({ "type": "municipality" }));
    assert_eq!(category_of(&municipality), Category::Municipality);

    let village = raw(json!({ "type": "village", "address": { "village": "Kumily" } }));
    assert_eq!(category_of(&village), Category::Location);
}

#[test]
fn missing_ids_are_synthesized_and_importance_defaults_to_zero() {
    let region = RegionConfig::default();
    let r = raw(json!({ "lat": 9.5, "lon": "76.5", "name": "Kōttayam", "type": "city" }));
    let s = normalize(&r, 1, &region);
    assert_eq!(s.id, "local:kottayam:9.5,76.5");
    assert_eq!(s.importance, 0.0);
}

#[test]
fn numeric_fields_accept_strings_and_numbers() {
    let r = raw(json!({ "place_id": "abc", "lat": 10, "lon": " 76.25 ", "importance": "0.3" }));
    assert_eq!(r.place_id.as_deref(), Some("abc"));
    assert_eq!(r.coordinates(), Some((10.0, 76.25)));
    assert_eq!(r.importance, Some(0.3));

    let r = raw(json!({ "lat": "not a number" }));
    assert_eq!(r.lat, None);
}

// -----------------------------------------------------------------------------
// Geo filter
// -----------------------------------------------------------------------------

#[test]
fn accepts_settlements_inside_bbox() {
    let region = RegionConfig::default();
    assert!(is_in_region(&raw(city(1, "Kochi", "Ernakulam", 0.5)), &region));
}

#[test]
fn rejects_points_of_interest_even_inside_region() {
    let region = RegionConfig::default();
    let poi = raw(json!({
        "lat": "9.93", "lon": "76.26", "class": "amenity", "type": "restaurant",
        "display_name": "Kochi Cafe, Kerala, India",
        "address": { "state": "Kerala" }
    }));
    assert!(!is_accepted_kind(&poi));
    assert!(!is_in_region(&poi, &region));
}

#[test]
fn non_administrative_boundaries_are_rejected() {
    let region = RegionConfig::default();
    let park = raw(json!({
        "place_id": 77, "lat": "9.95", "lon": "77.1",
        "class": "boundary", "type": "national_park",
        "name": "Eravikulam National Park",
        "display_name": "Eravikulam National Park, Idukki, Kerala, India",
        "importance": 0.9,
        "address": { "county": "Idukki", "state": "Kerala" }
    }));
    assert!(!is_accepted_kind(&park));
    assert!(!is_in_region(&park, &region));
    assert_ne!(category_of(&park), Category::District);

    let ranked = aggregate(
        vec![(1, park), (1, raw(city(1, "Munnar", "Idukki", 0.4)))],
        &test_config(),
    );
    let names: Vec<_> = ranked.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Munnar"]);
}

#[test]
fn textual_fallback_recovers_border_records() {
    let region = RegionConfig::default();
    // Just north of the box, but the upstream says it is in Kerala.
    let border = raw(json!({
        "lat": "12.80", "lon": "75.0", "class": "place", "type": "town",
        "display_name": "Manjeshwar, Kasaragod, Kerala, India",
        "address": { "town": "Manjeshwar" }
    }));
    assert!(is_in_region(&border, &region));

    let via_state = raw(json!({
        "lat": "13.5", "lon": "75.0", "class": "place", "type": "village",
        "display_name": "Somewhere",
        "address": { "state": "KERALA" }
    }));
    assert!(is_in_region(&via_state, &region));
}

#[test]
fn rejects_out_of_region_settlements() {
    let region = RegionConfig::default();
    let chennai = raw(json!({
        "lat": "13.08", "lon": "80.27", "class": "place", "type": "city",
        "display_name": "Chennai, Tamil Nadu, India",
        "address": { "city": "Chennai", "state": "Tamil Nadu" }
    }));
    assert!(!is_in_region(&chennai, &region));
}

// -----------------------------------------------------------------------------
// Dedup + rank
// -----------------------------------------------------------------------------

#[test]
fn dedupe_keeps_first_occurrence() {
    let input = vec![
        suggestion("Kottayam", Some("Kottayam"), Category::City, 1, 0.4),
        suggestion("KOTTAYAM", Some("Kottayam"), Category::City, 2, 0.9),
        suggestion("Kottayam", Some("Other"), Category::City, 2, 0.1),
    ];
    let out = dedupe(input);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].source_priority, 1);
    assert_eq!(out[1].district.as_deref(), Some("Other"));
}

#[test]
fn dedupe_is_idempotent() {
    let input = vec![
        suggestion("Aluva", None, Category::Town, 1, 0.2),
        suggestion("aluva", None, Category::Town, 2, 0.2),
        suggestion("Kochi", Some("Ernakulam"), Category::City, 1, 0.6),
        suggestion("Kochi", Some("Ernakulam"), Category::City, 2, 0.6),
        suggestion("Kochi", None, Category::City, 2, 0.6),
    ];
    let once = dedupe(input);
    let twice = dedupe(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[test]
fn ranking_keys_apply_in_order() {
    let input = vec![
        suggestion("Longer Name", None, Category::City, 1, 0.5),
        suggestion("Short", None, Category::City, 1, 0.5),
        suggestion("Important", None, Category::City, 1, 0.9),
        suggestion("Second Source", None, Category::City, 2, 1.0),
        suggestion("Idukki", Some("Idukki"), Category::District, 2, 0.1),
    ];
    let names: Vec<String> = rank(input, 8).into_iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec!["Idukki", "Important", "Short", "Longer Name", "Second Source"]
    );
}

#[test]
fn ranking_is_deterministic_and_bounded() {
    let input: Vec<Suggestion> = (0..20)
        .map(|i| {
            let category = if i % 5 == 0 { Category::District } else { Category::Town };
            suggestion(&format!("Place{i}"), None, category, (i % 3) as u8, (i % 4) as f64 / 10.0)
        })
        .collect();

    let a = rank(input.clone(), 8);
    let b = rank(input, 8);
    assert_eq!(a, b);
    assert_eq!(a.len(), 8);
    // All four districts lead.
    assert!(a[..4].iter().all(Suggestion::is_district));
    assert!(a[4..].iter().all(|s| !s.is_district()));
}

#[test]
fn ranking_ties_keep_input_order() {
    let input = vec![
        suggestion("Abcd", None, Category::Town, 1, 0.2),
        suggestion("Wxyz", None, Category::Town, 1, 0.2),
    ];
    let out = rank(input, 8);
    assert_eq!(out[0].name, "Abcd");
    assert_eq!(out[1].name, "Wxyz");
}

#[test]
fn aggregate_filters_dedupes_and_ranks() {
    let config = test_config();
    let poi = json!({
        "lat": "9.9", "lon": "76.2", "class": "highway", "type": "primary",
        "display_name": "Kochi Road, Kerala"
    });
    let records = vec![
        (1, raw(city(1, "Kochi", "Ernakulam", 0.6))),
        (1, raw(poi)),
        (2, raw(district(2, "Ernakulam", 0.4))),
        (2, raw(city(3, "Kochi", "Ernakulam", 0.7))),
    ];
    let out = aggregate(records, &config);
    let names: Vec<&str> = out.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ernakulam", "Kochi"]);
    assert_eq!(out[1].id, "1");
}

#[test]
fn name_matching_is_accent_and_case_insensitive() {
    let s = suggestion("Kōzhikode", None, Category::City, 1, 0.0);
    assert!(s.is_named("KOZHIKODE"));
    assert!(s.name_starts_with("kozhi"));
    assert!(!s.name_starts_with("kochi"));
}
