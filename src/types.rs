//! Shared primitive IDs, card-game enums, and validation errors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Store-assigned deck identifier.
pub type DeckId = i64;
/// Catalog-assigned, globally unique card identifier.
pub type CardId = String;

/// Highest mana value the filter range can express.
pub const CMC_MAX: u8 = 20;

/// Single-letter color code.
///
/// Variants are declared in canonical WUBRG order so sets of colors sort
/// the way the catalog spells identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    /// White (`W`).
    White,
    /// Blue (`U`).
    Blue,
    /// Black (`B`).
    Black,
    /// Red (`R`).
    Red,
    /// Green (`G`).
    Green,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Returns the one-letter catalog code.
    pub fn code(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Parses a one-letter catalog code, case-insensitively.
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Color::from_code(c).ok_or_else(|| ValidationError::UnknownColor(s.to_string())),
            _ => Err(ValidationError::UnknownColor(s.to_string())),
        }
    }
}

/// Card type filter bucket. `Any` disables the type clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardType {
    /// No type constraint.
    #[default]
    Any,
    /// Creature cards.
    Creature,
    /// Instants.
    Instant,
    /// Sorceries.
    Sorcery,
    /// Artifacts.
    Artifact,
    /// Enchantments.
    Enchantment,
    /// Planeswalkers.
    Planeswalker,
    /// Lands.
    Land,
}

impl CardType {
    /// Lowercase keyword used in catalog queries.
    pub fn keyword(self) -> &'static str {
        match self {
            CardType::Any => "any",
            CardType::Creature => "creature",
            CardType::Instant => "instant",
            CardType::Sorcery => "sorcery",
            CardType::Artifact => "artifact",
            CardType::Enchantment => "enchantment",
            CardType::Planeswalker => "planeswalker",
            CardType::Land => "land",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for CardType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" => CardType::Any,
            "creature" => CardType::Creature,
            "instant" => CardType::Instant,
            "sorcery" => CardType::Sorcery,
            "artifact" => CardType::Artifact,
            "enchantment" => CardType::Enchantment,
            "planeswalker" => CardType::Planeswalker,
            "land" => CardType::Land,
            _ => return Err(ValidationError::UnknownCardType(s.to_string())),
        };
        Ok(ty)
    }
}

/// Input rejected before it reaches the store or the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty or missing.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// Mana value range has `min > max`.
    #[error("mana value range is inverted: {min} > {max}")]
    InvertedRange {
        /// Lower bound.
        min: u8,
        /// Upper bound.
        max: u8,
    },
    /// Mana value bound exceeds [`CMC_MAX`].
    #[error("mana value bound {0} exceeds {CMC_MAX}")]
    RangeOutOfBounds(u8),
    /// Color code outside W, U, B, R, G.
    #[error("unknown color code: {0:?}")]
    UnknownColor(String),
    /// Card type keyword not recognized.
    #[error("unknown card type: {0:?}")]
    UnknownCardType(String),
    /// An add was requested without choosing a deck.
    #[error("Select a deck first.")]
    NoDeckSelected,
}
