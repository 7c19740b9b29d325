// crates/geosuggest-core/src/dispatch.rs

//! # Query Fan-Out Dispatcher
//!
//! Builds the fixed set of differently-biased upstream queries for one text
//! and runs them concurrently on the calling task. A failing query degrades
//! to an empty batch; it never fails its siblings or the session.

use crate::config::SuggestConfig;
use crate::error::{Result, SuggestError};
use crate::model::{QueryBias, QueryDescriptor, RawPlace};
use crate::traits::PlaceSource;
use futures::future::join_all;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Number of upstream requests per session. Never exceeded.
pub const FAN_OUT: usize = 2;

fn build_url(endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
    let endpoint = endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(SuggestError::InvalidUrl {
            url: endpoint.to_string(),
            reason: "expected an http(s) endpoint".into(),
        });
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{endpoint}{sep}{query}"))
}

/// The fan-out for `text`, in ascending `source_priority`:
/// 1. [`QueryBias::Bounded`]: settlements inside the region's bounding box.
/// 2. [`QueryBias::Regional`]: `"<text>, <region>"` with no bounding box.
pub fn build_queries(text: &str, config: &SuggestConfig) -> Result<Vec<QueryDescriptor>> {
    let text = text.trim();
    let limit = config.per_query_limit.to_string();
    let region = &config.region;
    let viewbox = region.bbox.viewbox();
    let regional_text = format!("{text}, {}", region.name);

    let common = [
        ("format", "json"),
        ("addressdetails", "1"),
        ("limit", limit.as_str()),
        ("countrycodes", region.country_codes.as_str()),
        ("accept-language", config.accept_language.as_str()),
    ];

    let mut bounded: Vec<(&str, &str)> = vec![("q", text)];
    bounded.extend_from_slice(&common);
    bounded.extend_from_slice(&[
        ("viewbox", viewbox.as_str()),
        ("bounded", "1"),
        ("featureType", "settlement"),
    ]);

    let mut regional: Vec<(&str, &str)> = vec![("q", regional_text.as_str())];
    regional.extend_from_slice(&common);

    let descriptors = vec![
        QueryDescriptor {
            url: build_url(&config.endpoint, &bounded)?,
            source_priority: 1,
            bias: QueryBias::Bounded,
            query: text.to_string(),
        },
        QueryDescriptor {
            url: build_url(&config.endpoint, &regional)?,
            source_priority: 2,
            bias: QueryBias::Regional,
            query: text.to_string(),
        },
    ];
    debug_assert_eq!(descriptors.len(), FAN_OUT);
    Ok(descriptors)
}

/// Records returned by one descriptor.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub source_priority: u8,
    pub records: Vec<RawPlace>,
}

#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// One batch per descriptor, in ascending `source_priority`. Failed and
    /// cancelled queries contribute an empty batch.
    pub batches: Vec<SourceBatch>,
    /// Queries that failed for a reason other than cancellation.
    pub failed: usize,
    pub cancelled: bool,
}

impl DispatchReport {
    pub fn attempted(&self) -> usize {
        self.batches.len()
    }

    /// Every attempted query failed (cancellation excluded).
    pub fn all_failed(&self) -> bool {
        self.attempted() > 0 && self.failed == self.attempted()
    }

    /// Flatten into `(source_priority, record)` pairs, batch order preserved.
    pub fn into_tagged(self) -> impl Iterator<Item = (u8, RawPlace)> {
        self.batches
            .into_iter()
            .flat_map(|b| b.records.into_iter().map(move |r| (b.source_priority, r)))
    }
}

async fn fetch_one(
    source: &dyn PlaceSource,
    descriptor: &QueryDescriptor,
    token: &CancellationToken,
    timeout: Option<Duration>,
) -> Result<Vec<RawPlace>> {
    let fetch = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, source.fetch(descriptor))
                .await
                .map_err(|_| SuggestError::Timeout(limit))?,
            None => source.fetch(descriptor).await,
        }
    };

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SuggestError::Cancelled),
        result = fetch => result,
    }
}

/// Issue every descriptor concurrently, each raced against `token`.
pub async fn dispatch(
    source: &dyn PlaceSource,
    descriptors: &[QueryDescriptor],
    token: &CancellationToken,
    timeout: Option<Duration>,
) -> DispatchReport {
    let calls = descriptors
        .iter()
        .map(|d| fetch_one(source, d, token, timeout));
    let results = join_all(calls).await;

    let mut report = DispatchReport::default();
    for (descriptor, result) in descriptors.iter().zip(results) {
        let records = match result {
            Ok(records) => {
                debug!(
                    priority = descriptor.source_priority,
                    count = records.len(),
                    "upstream query answered"
                );
                records
            }
            Err(SuggestError::Cancelled) => Vec::new(),
            Err(e) => {
                warn!(
                    priority = descriptor.source_priority,
                    bias = ?descriptor.bias,
                    error = %e,
                    "upstream query failed; continuing without it"
                );
                report.failed += 1;
                Vec::new()
            }
        };
        report.batches.push(SourceBatch {
            source_priority: descriptor.source_priority,
            records,
        });
    }
    report.batches.sort_by_key(|b| b.source_priority);
    report.cancelled = token.is_cancelled();
    report
}
