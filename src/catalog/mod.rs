//! External card catalog: provider trait, wire records, and errors.

pub mod scryfall;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Failure talking to the catalog provider.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider answered with a non-success status.
    #[error("catalog returned HTTP {status}: {details}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Provider-supplied explanation, or a body excerpt.
        details: String,
    },
    /// Body did not match the expected shape.
    #[error("failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Searchable card catalog with name autocomplete.
///
/// Futures must be `Send` so lookups can run on spawned tasks.
pub trait CatalogProvider: Send + Sync + 'static {
    /// Full-text search using the catalog's query syntax.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<CatalogCard>, CatalogError>> + Send;

    /// Card names starting with (or fuzzily matching) `prefix`.
    fn autocomplete(&self, prefix: &str) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;
}

/// Image URLs in several renditions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageUris {
    /// Small thumbnail.
    #[serde(default)]
    pub small: Option<String>,
    /// Normal-size image; what decks display.
    #[serde(default)]
    pub normal: Option<String>,
    /// Large image.
    #[serde(default)]
    pub large: Option<String>,
    /// Transparent PNG.
    #[serde(default)]
    pub png: Option<String>,
}

/// One face of a multi-faced card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardFace {
    /// Face name.
    #[serde(default)]
    pub name: String,
    /// Face images.
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

/// Card as returned by the catalog search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCard {
    /// Catalog identifier.
    pub id: String,
    /// Card name.
    pub name: String,
    /// Type line.
    #[serde(default)]
    pub type_line: Option<String>,
    /// Mana cost.
    #[serde(default)]
    pub mana_cost: Option<String>,
    /// Rules text.
    #[serde(default)]
    pub oracle_text: Option<String>,
    /// Images for single-faced cards.
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    /// Faces for double-faced and split cards.
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
    /// Converted mana cost.
    #[serde(default)]
    pub cmc: Option<f64>,
    /// Set code.
    #[serde(default)]
    pub set: Option<String>,
    /// Color identity codes.
    #[serde(default)]
    pub color_identity: Vec<String>,
}

impl CatalogCard {
    /// Normal-size image, falling back to the first face that has one.
    pub fn normal_image(&self) -> Option<&str> {
        self.image_uris
            .as_ref()
            .and_then(|u| u.normal.as_deref())
            .or_else(|| {
                self.card_faces
                    .iter()
                    .find_map(|f| f.image_uris.as_ref().and_then(|u| u.normal.as_deref()))
            })
    }
}

impl From<&CatalogCard> for Card {
    fn from(c: &CatalogCard) -> Self {
        Card {
            id: c.id.clone(),
            name: c.name.clone(),
            type_line: c.type_line.clone(),
            mana_cost: c.mana_cost.clone(),
            oracle_text: c.oracle_text.clone(),
            image_uri: c.normal_image().map(str::to_string),
        }
    }
}

impl From<CatalogCard> for Card {
    fn from(c: CatalogCard) -> Self {
        Card::from(&c)
    }
}
