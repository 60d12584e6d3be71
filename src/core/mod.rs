//! Deck-card ledger operations and the in-memory store.

/// Ledger and aggregate-loader operations over any store.
pub mod ledger;
/// In-memory deck store.
pub mod store;
