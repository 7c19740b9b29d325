// crates/geosuggest-core/src/session.rs

//! # Search Session
//!
//! One end-to-end search attempt for one debounced text: its sequence id,
//! its cancellation scope and the dispatch → filter → normalize → dedupe →
//! rank pipeline.
//!
//! ```text
//! Dispatching ──▶ Aggregating ──▶ Completed(Pending) ──▶ Completed(Applied)
//!      │               │                 │           └─▶ Completed(Superseded)
//!      └───────────────┴─────────────────┴──▶ Aborted
//! ```
//!
//! `Aborted` is reported the instant the token fires, whatever sub-state the
//! session was in. Terminal states never transition again.

use crate::config::SuggestConfig;
use crate::dispatch::{build_queries, dispatch};
use crate::error::{Result, SuggestError};
use crate::geo_filter::is_in_region;
use crate::model::{RawPlace, Suggestion};
use crate::normalize::normalize;
use crate::rank::{dedupe, rank};
use crate::traits::PlaceSource;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How the sequencer resolved a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Pipeline finished, commit not yet decided.
    Pending,
    Applied,
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Dispatching,
    Aggregating,
    Completed(Resolution),
    Aborted,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Dispatching => "dispatching",
            SessionState::Aggregating => "aggregating",
            SessionState::Completed(Resolution::Pending) => "completed",
            SessionState::Completed(Resolution::Applied) => "completed-applied",
            SessionState::Completed(Resolution::Superseded) => "completed-superseded",
            SessionState::Aborted => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Aborted
                | SessionState::Completed(Resolution::Applied)
                | SessionState::Completed(Resolution::Superseded)
        )
    }

    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use Resolution::*;
        use SessionState::*;
        match (*self, next) {
            (from, Aborted) => !from.is_terminal(),
            (Dispatching, Aggregating) => true,
            (Aggregating, Completed(Pending)) => true,
            (Completed(Pending), Completed(Applied | Superseded)) => true,
            _ => false,
        }
    }
}

/// Result of running the pipeline, before the sequencer's commit check.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed {
        suggestions: Vec<Suggestion>,
        /// Every upstream query failed; `suggestions` is empty.
        upstream_unavailable: bool,
    },
    Aborted,
}

#[derive(Debug)]
pub struct SearchSession {
    sequence_id: u64,
    token: CancellationToken,
    state: SessionState,
}

impl SearchSession {
    pub fn new(sequence_id: u64, token: CancellationToken) -> Self {
        Self {
            sequence_id,
            token,
            state: SessionState::Dispatching,
        }
    }

    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Current state; `Aborted` as soon as the token has fired.
    pub fn state(&self) -> SessionState {
        if !self.state.is_terminal() && self.token.is_cancelled() {
            SessionState::Aborted
        } else {
            self.state
        }
    }

    pub fn transition(&mut self, next: SessionState) -> Result<()> {
        let from = self.state();
        if !from.can_transition_to(next) {
            return Err(SuggestError::InvalidTransition {
                from: from.name(),
                to: next.name(),
            });
        }
        self.state = next;
        Ok(())
    }

    fn abort(&mut self) -> SessionOutcome {
        if !self.state.is_terminal() {
            self.state = SessionState::Aborted;
        }
        debug!(sequence_id = self.sequence_id, "session aborted");
        SessionOutcome::Aborted
    }

    /// Run the whole pipeline for `text`.
    ///
    /// Never fails: cancellation yields [`SessionOutcome::Aborted`] and
    /// upstream failures yield an empty completed outcome.
    pub async fn run(
        &mut self,
        text: &str,
        source: &dyn PlaceSource,
        config: &SuggestConfig,
    ) -> SessionOutcome {
        let descriptors = match build_queries(text, config) {
            Ok(d) => d,
            Err(e) => {
                warn!(sequence_id = self.sequence_id, error = %e, "could not build upstream queries");
                return self.finish(Vec::new(), true);
            }
        };
        for d in &descriptors {
            debug!(sequence_id = self.sequence_id, priority = d.source_priority, url = %d.url, "dispatching");
        }

        let report = dispatch(source, &descriptors, &self.token, config.request_timeout()).await;
        if report.cancelled || self.transition(SessionState::Aggregating).is_err() {
            return self.abort();
        }

        let all_failed = report.all_failed();
        if all_failed {
            warn!(
                sequence_id = self.sequence_id,
                queries = report.attempted(),
                "every upstream query failed"
            );
        }
        let suggestions = aggregate(report.into_tagged(), config);
        self.finish(suggestions, all_failed)
    }

    fn finish(&mut self, suggestions: Vec<Suggestion>, upstream_unavailable: bool) -> SessionOutcome {
        if self.state == SessionState::Dispatching {
            // Query building failed before anything was dispatched.
            self.state = SessionState::Aggregating;
        }
        if self.transition(SessionState::Completed(Resolution::Pending)).is_err() {
            return self.abort();
        }
        SessionOutcome::Completed {
            suggestions,
            upstream_unavailable,
        }
    }
}

/// Filter, normalize, merge, dedupe and rank tagged upstream records.
///
/// `records` must arrive in ascending `source_priority` so that dedup keeps
/// the more authoritative duplicate.
pub fn aggregate(
    records: impl IntoIterator<Item = (u8, RawPlace)>,
    config: &SuggestConfig,
) -> Vec<Suggestion> {
    let merged: Vec<Suggestion> = records
        .into_iter()
        .filter(|(_, raw)| is_in_region(raw, &config.region))
        .map(|(priority, raw)| normalize(&raw, priority, &config.region))
        .collect();
    rank(dedupe(merged), config.max_results)
}
