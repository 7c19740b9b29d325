mod common;

use common::{city, test_config, FakeSource, Reply};
use geosuggest_core::dispatch::{build_queries, dispatch, FAN_OUT};
use geosuggest_core::model::QueryBias;
use geosuggest_core::{SuggestConfig, SuggestError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[test]
fn fan_out_is_bounded_then_regional() {
    let queries = build_queries("  Koch ", &test_config()).unwrap();
    assert_eq!(queries.len(), FAN_OUT);

    let bounded = &queries[0];
    assert_eq!(bounded.source_priority, 1);
    assert_eq!(bounded.bias, QueryBias::Bounded);
    assert_eq!(bounded.query, "Koch");
    assert!(bounded.url.starts_with("https://geocoder.test/search?q=Koch&"));
    assert!(bounded.url.contains("viewbox=74.85%2C12.79%2C77.42%2C8.17"));
    assert!(bounded.url.contains("bounded=1"));
    assert!(bounded.url.contains("featureType=settlement"));

    let regional = &queries[1];
    assert_eq!(regional.source_priority, 2);
    assert_eq!(regional.bias, QueryBias::Regional);
    assert!(regional.url.contains("q=Koch%2C%20Kerala"));
    assert!(!regional.url.contains("viewbox="));

    for q in &queries {
        assert!(q.url.contains("format=json"));
        assert!(q.url.contains("addressdetails=1"));
        assert!(q.url.contains("countrycodes=in"));
        assert!(q.url.contains("limit=10"));
    }
}

#[test]
fn endpoint_with_existing_query_string_is_extended() {
    let config = SuggestConfig {
        endpoint: "https://geocoder.test/search?key=abc".into(),
        ..test_config()
    };
    let queries = build_queries("Koch", &config).unwrap();
    assert!(queries[0].url.starts_with("https://geocoder.test/search?key=abc&q=Koch"));
}

#[test]
fn non_http_endpoint_is_rejected() {
    let config = SuggestConfig {
        endpoint: "ftp://geocoder.test/search".into(),
        ..test_config()
    };
    match build_queries("Koch", &config) {
        Err(SuggestError::InvalidUrl { url, .. }) => assert_eq!(url, "ftp://geocoder.test/search"),
        other => panic!("expected InvalidUrl, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn one_failed_query_leaves_an_empty_batch() {
    let source = FakeSource::new()
        .reply("Koch", 1, Reply::fail())
        .reply("Koch", 2, Reply::ok(vec![city(1, "Kochi", "Ernakulam", 0.6)]));
    let queries = build_queries("Koch", &test_config()).unwrap();

    let report = dispatch(&source, &queries, &CancellationToken::new(), None).await;

    assert_eq!(report.attempted(), 2);
    assert_eq!(report.failed, 1);
    assert!(!report.all_failed());
    assert!(!report.cancelled);
    assert!(report.batches[0].records.is_empty());
    assert_eq!(report.batches[1].records.len(), 1);

    let tagged: Vec<_> = report.into_tagged().collect();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].0, 2);
}

#[tokio::test(start_paused = true)]
async fn slow_queries_time_out_as_failures() {
    let source = FakeSource::new()
        .reply("Koch", 1, Reply::delayed(vec![city(1, "Kochi", "Ernakulam", 0.6)], 5_000))
        .reply("Koch", 2, Reply::delayed(vec![], 5_000));
    let queries = build_queries("Koch", &test_config()).unwrap();

    let report = dispatch(
        &source,
        &queries,
        &CancellationToken::new(),
        Some(Duration::from_millis(100)),
    )
    .await;

    assert_eq!(report.failed, 2);
    assert!(report.all_failed());
    assert!(report.into_tagged().next().is_none());
}

#[tokio::test(start_paused = true)]
async fn cancellation_is_not_a_failure() {
    let source = FakeSource::new()
        .reply("Koch", 1, Reply::delayed(vec![city(1, "Kochi", "Ernakulam", 0.6)], 1_000))
        .reply("Koch", 2, Reply::delayed(vec![city(2, "Kochi", "Ernakulam", 0.6)], 1_000));
    let queries = build_queries("Koch", &test_config()).unwrap();
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        })
    };
    let report = dispatch(&source, &queries, &token, None).await;
    canceller.await.unwrap();

    assert!(report.cancelled);
    assert_eq!(report.failed, 0);
    assert!(!report.all_failed());
    assert!(report.batches.iter().all(|b| b.records.is_empty()));
}
