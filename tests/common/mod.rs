#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use mtgstack::catalog::{CatalogCard, CatalogError, CatalogProvider, ImageUris};

/// Scripted catalog that records every request it receives.
#[derive(Default)]
pub struct MockCatalog {
    pub delay: Duration,
    pub cards: Vec<CatalogCard>,
    failing: AtomicBool,
    autocomplete_calls: Mutex<Vec<String>>,
    search_calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn with_cards(cards: Vec<CatalogCard>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn autocomplete_calls(&self) -> Vec<String> {
        self.autocomplete_calls.lock().expect("calls lock").clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().expect("calls lock").clone()
    }

    fn outage(&self) -> Option<CatalogError> {
        self.failing.load(Ordering::SeqCst).then(|| CatalogError::Status {
            status: 503,
            details: "catalog unavailable".to_string(),
        })
    }
}

impl CatalogProvider for MockCatalog {
    async fn search(&self, query: &str) -> Result<Vec<CatalogCard>, CatalogError> {
        self.search_calls
            .lock()
            .expect("calls lock")
            .push(query.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.outage() {
            Some(err) => Err(err),
            None => Ok(self.cards.clone()),
        }
    }

    async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>, CatalogError> {
        self.autocomplete_calls
            .lock()
            .expect("calls lock")
            .push(prefix.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.outage() {
            Some(err) => Err(err),
            None => Ok(vec![format!("{prefix} result")]),
        }
    }
}

pub fn catalog_bolt() -> CatalogCard {
    CatalogCard {
        id: "e3285e6b-3e79-4d7c-bf96-d920f973b80f".to_string(),
        name: "Lightning Bolt".to_string(),
        type_line: Some("Instant".to_string()),
        mana_cost: Some("{R}".to_string()),
        oracle_text: Some("Lightning Bolt deals 3 damage to any target.".to_string()),
        image_uris: Some(ImageUris {
            normal: Some("https://cards.scryfall.io/normal/front/bolt.jpg".to_string()),
            ..ImageUris::default()
        }),
        card_faces: Vec::new(),
        cmc: Some(1.0),
        set: Some("2xm".to_string()),
        color_identity: vec!["R".to_string()],
    }
}
