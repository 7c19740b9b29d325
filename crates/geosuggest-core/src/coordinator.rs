// crates/geosuggest-core/src/coordinator.rs

//! # Input Debouncer / Session Sequencer
//!
//! [`SuggestCoordinator`] is the public entry point. It debounces
//! keystrokes, starts one [`SearchSession`] per settled text, cancels the
//! previous one, and is the only writer of the observable [`SuggestState`].
//!
//! Results are committed only if the finishing session is still the latest
//! one issued and its token has not fired. Responses may arrive in any
//! order; a superseded session's results are dropped at commit time, whether
//! or not its network calls honoured the cancellation.

use crate::config::SuggestConfig;
use crate::error::{Result, SuggestError};
use crate::model::Suggestion;
use crate::session::{Resolution, SearchSession, SessionOutcome, SessionState};
use crate::traits::PlaceSource;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

pub type SelectCallback = Box<dyn Fn(&Suggestion) + Send + Sync>;

/// Everything the UI observes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestState {
    pub suggestions: Vec<Suggestion>,
    pub loading: bool,
    /// A query of at least `min_query_chars` has been attempted since the
    /// input was last short. Drives the "no results" affordance.
    pub has_searched: bool,
    /// Text of the latest started search (or the short input that cleared it).
    pub query: String,
    /// Session that produced `suggestions`; `0` before the first commit.
    pub sequence_id: u64,
    /// The committed session got no answer from any upstream query.
    pub upstream_unavailable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    Idle,
    Debouncing,
    Searching,
    Disposed,
}

#[derive(Debug)]
struct ActiveSession {
    sequence_id: u64,
    token: CancellationToken,
}

/// Which session is current. All access happens under the coordinator lock.
#[derive(Debug, Default)]
struct Sequencer {
    counter: u64,
    current: Option<ActiveSession>,
}

impl Sequencer {
    /// Cancel the current session (if any) and issue the next one.
    fn begin(&mut self, parent: &CancellationToken) -> (u64, CancellationToken) {
        if let Some(prev) = self.cancel_current() {
            debug!(superseded = prev, "cancelled previous session");
        }
        self.counter += 1;
        let token = parent.child_token();
        self.current = Some(ActiveSession {
            sequence_id: self.counter,
            token: token.clone(),
        });
        (self.counter, token)
    }

    fn cancel_current(&mut self) -> Option<u64> {
        self.current.take().map(|prev| {
            prev.token.cancel();
            prev.sequence_id
        })
    }

    /// Drop `sequence_id` if it is still current. Returns whether it was.
    fn release(&mut self, sequence_id: u64) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|c| c.sequence_id == sequence_id)
        {
            self.cancel_current();
            true
        } else {
            false
        }
    }

    /// The identity check: only the latest, uncancelled session may commit.
    fn try_commit(&mut self, sequence_id: u64, token: &CancellationToken) -> bool {
        let is_current = self.counter == sequence_id
            && self
                .current
                .as_ref()
                .is_some_and(|c| c.sequence_id == sequence_id)
            && !token.is_cancelled();
        if is_current {
            self.current = None;
        }
        is_current
    }
}

#[derive(Debug, Default)]
struct Shared {
    sequencer: Sequencer,
    debounce: Option<JoinHandle<()>>,
    /// Bumped by every keystroke; a timer only fires if it still matches.
    debounce_gen: u64,
    disposed: bool,
}

/// Releases a session that ends without committing, including when a
/// source panics and the task unwinds.
struct SessionGuard<'a> {
    inner: &'a Inner,
    sequence_id: u64,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        let mut shared = self.inner.lock();
        if shared.sequencer.release(self.sequence_id) {
            warn!(sequence_id = self.sequence_id, "session ended without a result");
            self.inner.state.send_modify(|s| s.loading = false);
        }
    }
}

struct Inner {
    config: SuggestConfig,
    source: Arc<dyn PlaceSource>,
    runtime: Handle,
    root: CancellationToken,
    shared: Mutex<Shared>,
    state: watch::Sender<SuggestState>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Debounce timer fired: become the current session, then run it.
    async fn start_search(self: Arc<Self>, text: String, debounce_gen: u64) {
        let (sequence_id, token) = {
            let mut shared = self.lock();
            if shared.disposed || shared.debounce_gen != debounce_gen {
                return;
            }
            shared.debounce = None;
            let (sequence_id, token) = shared.sequencer.begin(&self.root);
            self.state.send_modify(|s| {
                s.suggestions.clear();
                s.loading = true;
                s.has_searched = true;
                s.query.clone_from(&text);
                s.upstream_unavailable = false;
            });
            (sequence_id, token)
        };

        let span = info_span!("session", sequence_id, query = %text);
        self.run_session(sequence_id, token, text)
            .instrument(span)
            .await;
    }

    async fn run_session(&self, sequence_id: u64, token: CancellationToken, text: String) {
        debug!("session started");
        let _guard = SessionGuard {
            inner: self,
            sequence_id,
        };
        let mut session = SearchSession::new(sequence_id, token);
        let outcome = session
            .run(&text, self.source.as_ref(), &self.config)
            .await;

        let (suggestions, upstream_unavailable) = match outcome {
            SessionOutcome::Completed {
                suggestions,
                upstream_unavailable,
            } => (suggestions, upstream_unavailable),
            SessionOutcome::Aborted => {
                debug!("session aborted; nothing to commit");
                return;
            }
        };

        let mut shared = self.lock();
        if !shared.sequencer.try_commit(sequence_id, session.token()) {
            if session
                .transition(SessionState::Completed(Resolution::Superseded))
                .is_err()
            {
                debug!(state = session.state().name(), "session cancelled before commit");
            } else {
                debug!("session superseded; discarding results");
            }
            return;
        }

        // try_commit just checked the token, and the lock is held.
        if let Err(e) = session.transition(SessionState::Completed(Resolution::Applied)) {
            debug!(error = %e, "session could not be marked applied");
            return;
        }
        info!(count = suggestions.len(), upstream_unavailable, "suggestions committed");
        self.state.send_modify(|s| {
            s.suggestions = suggestions;
            s.loading = false;
            s.sequence_id = sequence_id;
            s.upstream_unavailable = upstream_unavailable;
        });
    }
}

/// Debounced, cancellable place-suggestion coordinator.
///
/// Must be created inside a Tokio runtime; its timers and sessions run on
/// that runtime. Dropping the coordinator disposes it.
///
/// # Example
///
/// ```no_run
/// use geosuggest_core::prelude::*;
/// use std::sync::Arc;
///
/// # async fn demo() -> geosuggest_core::Result<()> {
/// let config = SuggestConfig::default();
/// let source = Arc::new(HttpSource::new(&config)?);
/// let coordinator = SuggestCoordinator::new(config, source)?;
///
/// for prefix in ["K", "Ko", "Koc", "Koch"] {
///     coordinator.search(prefix);
/// }
/// let state = coordinator.settle().await;
/// for s in &state.suggestions {
///     println!("{}", s.display_name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SuggestCoordinator {
    inner: Arc<Inner>,
    on_select: Option<SelectCallback>,
}

impl SuggestCoordinator {
    pub fn new(config: SuggestConfig, source: Arc<dyn PlaceSource>) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| SuggestError::NoRuntime)?;
        let (state, _) = watch::channel(SuggestState::default());
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                source,
                runtime,
                root: CancellationToken::new(),
                shared: Mutex::new(Shared::default()),
                state,
            }),
            on_select: None,
        })
    }

    /// Callback invoked by [`SuggestCoordinator::select`]. The coordinator
    /// itself does not persist the choice.
    pub fn with_on_select<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Suggestion) + Send + Sync + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.inner.config
    }

    /// Call on every keystroke.
    ///
    /// Leading and trailing whitespace is trimmed before the length check, so
    /// `"a "` counts as one char.
    ///
    /// Text shorter than `min_query_chars` clears the state
    /// synchronously, drops any pending timer and aborts any running session.
    /// Anything else (re)starts the debounce timer; when it fires, a new
    /// session replaces the current one.
    pub fn search(&self, text: &str) {
        let text = text.trim();
        let mut shared = self.inner.lock();
        if shared.disposed {
            return;
        }

        shared.debounce_gen += 1;
        if let Some(timer) = shared.debounce.take() {
            timer.abort();
        }

        if text.chars().count() < self.inner.config.min_query_chars {
            if let Some(id) = shared.sequencer.cancel_current() {
                debug!(sequence_id = id, "input too short; aborted running session");
            }
            self.inner.state.send_modify(|s| {
                s.suggestions.clear();
                s.loading = false;
                s.has_searched = false;
                s.query = text.to_string();
                s.upstream_unavailable = false;
            });
            return;
        }

        let delay = self.inner.config.debounce();
        let debounce_gen = shared.debounce_gen;
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        debug!(query = %text, ?delay, "debounce scheduled");
        shared.debounce = Some(self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            inner.start_search(text, debounce_gen).await;
        }));
    }

    /// Hand a chosen suggestion to the caller's callback.
    pub fn select(&self, suggestion: &Suggestion) {
        debug!(id = %suggestion.id, name = %suggestion.name, "suggestion selected");
        if let Some(callback) = &self.on_select {
            callback(suggestion);
        }
    }

    /// Cancel the pending timer and any running session; further `search`
    /// calls are ignored. Idempotent.
    pub fn dispose(&self) {
        let mut shared = self.inner.lock();
        if shared.disposed {
            return;
        }
        shared.disposed = true;
        shared.debounce_gen += 1;
        if let Some(timer) = shared.debounce.take() {
            timer.abort();
        }
        shared.sequencer.cancel_current();
        self.inner.root.cancel();
        self.inner.state.send_modify(|s| s.loading = false);
        debug!("coordinator disposed");
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> SuggestState {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> CoordinatorPhase {
        let shared = self.inner.lock();
        if shared.disposed {
            CoordinatorPhase::Disposed
        } else if shared.debounce.is_some() {
            CoordinatorPhase::Debouncing
        } else if shared.sequencer.current.is_some() {
            CoordinatorPhase::Searching
        } else {
            CoordinatorPhase::Idle
        }
    }

    /// Highest sequence id issued so far.
    pub fn latest_sequence_id(&self) -> u64 {
        self.inner.lock().sequencer.counter
    }

    /// Wait until no timer is pending and no session is in flight.
    ///
    /// Every way out of those phases publishes a state change, so this
    /// sleeps on the watch channel instead of polling.
    pub async fn settle(&self) -> SuggestState {
        let mut changes = self.subscribe();
        loop {
            changes.borrow_and_update();
            if !matches!(
                self.phase(),
                CoordinatorPhase::Debouncing | CoordinatorPhase::Searching
            ) {
                break;
            }
            if changes.changed().await.is_err() {
                break;
            }
        }
        self.snapshot()
    }
}

impl Drop for SuggestCoordinator {
    fn drop(&mut self) {
        self.dispose();
    }
}
