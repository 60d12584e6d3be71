//! Catalog search: query building, debounced autocomplete, and per-screen
//! search sessions.

/// Predictive (type-ahead) search controller.
pub mod controller;
/// Cancellable delayed tasks.
pub mod debounce;
/// Query builder and filter state.
pub mod query;
/// Scoped search state for one screen.
pub mod session;

use tokio::time::Duration;

use crate::{catalog::CatalogError, types::ValidationError};

/// Tunables for interactive search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before autocomplete fires.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

impl SearchConfig {
    /// Quiet period as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Failure running a full search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Filters were rejected before any request.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The catalog request failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
