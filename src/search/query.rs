//! Combines free text and structured filters into one catalog query.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{CMC_MAX, CardType, Color, ValidationError};

/// Closed mana value range, both bounds within `0..=CMC_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmcRange {
    /// Lower bound; 0 means unconstrained.
    pub min: u8,
    /// Upper bound; [`CMC_MAX`] means unconstrained.
    pub max: u8,
}

impl Default for CmcRange {
    fn default() -> Self {
        Self { min: 0, max: CMC_MAX }
    }
}

/// Client-side search filters. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Card type, or [`CardType::Any`].
    pub card_type: CardType,
    /// Allowed color identity. Empty means no constraint.
    pub colors: BTreeSet<Color>,
    /// Mana value range.
    pub cmc: CmcRange,
    /// Set code; `None`, empty, or `"any"` means no constraint.
    pub set_code: Option<String>,
}

impl FilterState {
    /// True when every filter is at its unconstrained default.
    pub fn is_default(&self) -> bool {
        self.card_type == CardType::Any
            && self.colors.is_empty()
            && self.cmc == CmcRange::default()
            && self.active_set_code().is_none()
    }

    /// Rejects inverted or out-of-bounds mana value ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for bound in [self.cmc.min, self.cmc.max] {
            if bound > CMC_MAX {
                return Err(ValidationError::RangeOutOfBounds(bound));
            }
        }
        if self.cmc.min > self.cmc.max {
            return Err(ValidationError::InvertedRange {
                min: self.cmc.min,
                max: self.cmc.max,
            });
        }
        Ok(())
    }

    fn active_set_code(&self) -> Option<&str> {
        self.set_code
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("any"))
    }
}

/// Builds the catalog query for `base_text` under `filters`.
///
/// Clauses follow a fixed order: type, color identity, mana value bounds,
/// set. An empty result means "no search".
pub fn build_query(base_text: &str, filters: &FilterState) -> String {
    let mut clauses: Vec<String> = Vec::with_capacity(6);

    let base = base_text.trim();
    if !base.is_empty() {
        clauses.push(base.to_string());
    }

    if filters.card_type != CardType::Any {
        clauses.push(format!("t:{}", filters.card_type));
    }

    if !filters.colors.is_empty() {
        let joined: String = filters.colors.iter().map(|c| c.code()).collect();
        clauses.push(format!("id<={joined}"));
    }

    if filters.cmc.min > 0 {
        clauses.push(format!("cmc>={}", filters.cmc.min));
    }
    if filters.cmc.max < CMC_MAX {
        clauses.push(format!("cmc<={}", filters.cmc.max));
    }

    if let Some(set) = filters.active_set_code() {
        clauses.push(format!("s:{set}"));
    }

    clauses.join(" ")
}
