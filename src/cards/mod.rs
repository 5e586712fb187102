//! Card system: cards, decks, and combo evaluation.
//!
//! ## Key Types
//!
//! - `Card`: Immutable suit/rank value with a unique `CardId`
//! - `DeckPile`: Draw pile plus discard pile with never-failing draws
//! - `HandCombo`: Poker-style classification of a card selection

pub mod card;
pub mod combo;
pub mod deck;

pub use card::{Card, CardId, Rank, Suit, SuitColor};
pub use combo::{apply_combo, evaluate, HandCombo};
pub use deck::{create_deck, shuffle, DeckPile, DECK_SIZE};
