//! Per-screen search state: text, filters, results, and a transient notice.

use std::sync::Arc;

use crate::{
    card::{Card, Deck, DeckCardLink},
    catalog::{CatalogCard, CatalogProvider},
    persist::StoreError,
    runtime::handle::{DeckLedgerHandle, RuntimeError},
    types::ValidationError,
};

use super::{
    SearchConfig, SearchError,
    controller::{PredictiveSearchController, Suggestions},
    query::{FilterState, build_query},
};

/// Search state owned by one screen: text, filters, results, a transient
/// notice, and its own predictive controller.
pub struct SearchSession<P> {
    provider: Arc<P>,
    text: String,
    filters: FilterState,
    results: Vec<CatalogCard>,
    notice: Option<String>,
    predictive: PredictiveSearchController<P>,
}

impl<P: CatalogProvider> SearchSession<P> {
    /// Creates an empty session with its own predictive controller.
    pub fn new(provider: Arc<P>, config: &SearchConfig) -> Self {
        let predictive = PredictiveSearchController::new(Arc::clone(&provider), config);
        Self {
            provider,
            text: String::new(),
            filters: FilterState::default(),
            results: Vec::new(),
            notice: None,
            predictive,
        }
    }

    /// Current search text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Updates the search text and restarts the autocomplete quiet period.
    pub fn set_text(&mut self, input: &str) {
        self.text = input.to_string();
        self.predictive.on_input(input);
    }

    /// Current filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Mutable filters; changes apply on the next submit.
    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Results of the last successful search.
    pub fn results(&self) -> &[CatalogCard] {
        &self.results
    }

    /// Transient notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Returns and clears the transient notice.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Latest autocomplete snapshot.
    pub fn suggestions(&self) -> Suggestions {
        self.predictive.state()
    }

    /// The session's predictive controller.
    pub fn predictive(&self) -> &PredictiveSearchController<P> {
        &self.predictive
    }

    /// The query [`SearchSession::submit`] would send.
    pub fn query(&self) -> String {
        build_query(&self.text, &self.filters)
    }

    /// Runs a full search with the current text and filters.
    ///
    /// An empty query clears results without a request. Rejected filters
    /// and failed requests both clear results and leave a notice.
    pub async fn submit(&mut self) -> Result<&[CatalogCard], SearchError> {
        if let Err(err) = self.filters.validate() {
            log::debug!("search rejected: {err}");
            self.results.clear();
            self.notice = Some(format!("Search failed: {err}"));
            return Err(err.into());
        }

        let query = self.query();
        if query.is_empty() {
            self.results.clear();
            return Ok(&self.results);
        }

        match self.provider.search(&query).await {
            Ok(cards) => {
                log::debug!("search {query:?} returned {} cards", cards.len());
                self.results = cards;
                Ok(&self.results)
            }
            Err(err) => {
                log::warn!("search {query:?} failed: {err}");
                self.results.clear();
                self.notice = Some(format!("Search failed: {err}"));
                Err(err.into())
            }
        }
    }

    /// Accepts a suggestion as the new text and searches with it.
    pub async fn select_suggestion(&mut self, suggestion: &str) -> Result<&[CatalogCard], SearchError> {
        self.text = suggestion.to_string();
        self.predictive.cancel();
        self.submit().await
    }

    /// Adds a search result to `deck`.
    ///
    /// Without a deck the add is refused. Success and failure both leave a
    /// notice; a failed add is never reported as added.
    pub async fn add_to_deck(
        &mut self,
        ledger: &DeckLedgerHandle,
        deck: Option<&Deck>,
        card: &CatalogCard,
    ) -> Result<DeckCardLink, RuntimeError> {
        let Some(deck) = deck else {
            self.notice = Some(ValidationError::NoDeckSelected.to_string());
            return Err(StoreError::from(ValidationError::NoDeckSelected).into());
        };

        match ledger.add_card(deck.id, Card::from(card)).await {
            Ok(link) => {
                self.notice = Some(format!("{} added to {}", card.name, deck.name));
                Ok(link)
            }
            Err(err) => {
                self.notice = Some(format!("Could not add {} to {}: {err}", card.name, deck.name));
                Err(err)
            }
        }
    }
}
