//! Debounced type-ahead lookups published as a watched suggestion state.

use std::sync::Arc;

use tokio::{sync::watch, time::Duration};

use crate::catalog::{CatalogError, CatalogProvider};

use super::{
    SearchConfig,
    debounce::{Debouncer, TaskHandle, schedule},
};

/// Lifecycle of the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No lookup has run for the current input.
    #[default]
    Idle,
    /// A lookup is in flight.
    Pending,
    /// Suggestions are current.
    Ready,
    /// The last lookup failed; suggestions were cleared.
    Error,
}

/// Snapshot published by [`PredictiveSearchController`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestions {
    /// Current phase.
    pub phase: SearchPhase,
    /// Input the phase and items belong to.
    pub input: String,
    /// Suggested card names.
    pub items: Vec<String>,
    /// Failure message when `phase` is [`SearchPhase::Error`].
    pub error: Option<String>,
    generation: u64,
}

impl Suggestions {
    /// True while a lookup is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Pending
    }
}

/// Turns keystrokes into debounced autocomplete lookups.
///
/// Each input change bumps a generation counter stored with the published
/// state; a lookup only writes its result if its generation is still the
/// latest, so a slow response for old input never overwrites newer state.
/// Dropping the controller cancels any pending lookup.
#[derive(Debug)]
pub struct PredictiveSearchController<P> {
    provider: Arc<P>,
    debouncer: Debouncer,
    state_tx: Arc<watch::Sender<Suggestions>>,
    generation: u64,
    input: String,
}

impl<P: CatalogProvider> PredictiveSearchController<P> {
    /// Creates an idle controller.
    pub fn new(provider: Arc<P>, config: &SearchConfig) -> Self {
        let (state_tx, _) = watch::channel(Suggestions::default());
        Self {
            provider,
            debouncer: Debouncer::new(config.debounce()),
            state_tx: Arc::new(state_tx),
            generation: 0,
            input: String::new(),
        }
    }

    /// Receiver for state changes.
    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.state_tx.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> Suggestions {
        self.state_tx.borrow().clone()
    }

    /// Latest input seen.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// True while a lookup is scheduled but has not finished.
    pub fn is_scheduled(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Handles one input change.
    ///
    /// Empty input cancels the pending lookup and resets to idle without a
    /// request. Anything else restarts the quiet period.
    pub fn on_input(&mut self, input: &str) {
        self.input = input.to_string();
        let generation = self.bump_generation();

        if input.trim().is_empty() {
            self.debouncer.cancel();
            self.state_tx.send_replace(Suggestions {
                generation,
                ..Suggestions::default()
            });
            return;
        }

        // Scheduling aborts any in-flight lookup, so it no longer counts as loading.
        self.settle_aborted_lookup();
        let provider = Arc::clone(&self.provider);
        let state_tx = Arc::clone(&self.state_tx);
        let input = input.to_string();
        self.debouncer
            .schedule(run_lookup(provider, state_tx, generation, input));
    }

    /// Cancels the pending lookup and discards any in-flight result.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.bump_generation();
        self.settle_aborted_lookup();
    }

    fn settle_aborted_lookup(&self) {
        self.state_tx.send_if_modified(|s| {
            if !s.is_loading() {
                return false;
            }
            s.phase = SearchPhase::Idle;
            s.input.clear();
            true
        });
    }

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        // Recorded silently so in-flight lookups see they are stale.
        self.state_tx.send_if_modified(|s| {
            s.generation = generation;
            false
        });
        generation
    }
}

async fn run_lookup<P: CatalogProvider>(
    provider: Arc<P>,
    state_tx: Arc<watch::Sender<Suggestions>>,
    generation: u64,
    input: String,
) {
    let started = state_tx.send_if_modified(|s| {
        if s.generation != generation {
            return false;
        }
        s.phase = SearchPhase::Pending;
        s.input = input.clone();
        s.error = None;
        true
    });
    if !started {
        return;
    }

    log::debug!("autocomplete lookup for {input:?}");
    let result = provider.autocomplete(&input).await;

    let applied = state_tx.send_if_modified(|s| {
        if s.generation != generation {
            return false;
        }
        match &result {
            Ok(items) => {
                s.phase = SearchPhase::Ready;
                s.items = items.clone();
                s.error = None;
            }
            Err(err) => {
                s.phase = SearchPhase::Error;
                s.items.clear();
                s.error = Some(err.to_string());
            }
        }
        true
    });

    if !applied {
        log::debug!("discarding stale suggestions for {input:?}");
    } else if let Err(err) = &result {
        log::debug!("autocomplete for {input:?} failed: {err}");
    }
}

/// Schedules one autocomplete lookup for `input` after `delay`.
///
/// Empty input calls `on_ready` with no suggestions immediately and issues
/// no request. Dropping or cancelling the returned handle cancels the lookup.
pub fn schedule_autocomplete<P, R, E>(
    provider: Arc<P>,
    input: impl Into<String>,
    delay: Duration,
    on_ready: R,
    on_error: E,
) -> TaskHandle
where
    P: CatalogProvider,
    R: FnOnce(Vec<String>) + Send + 'static,
    E: FnOnce(CatalogError) + Send + 'static,
{
    let input = input.into();
    if input.trim().is_empty() {
        on_ready(Vec::new());
        return TaskHandle::finished();
    }

    schedule(delay, async move {
        match provider.autocomplete(&input).await {
            Ok(items) => on_ready(items),
            Err(err) => on_error(err),
        }
    })
}
