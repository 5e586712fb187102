//! Deck construction, shuffling, and draw-with-reshuffle.
//!
//! A game owns two `DeckPile`s (player and dungeon). Each pile is a draw pile
//! plus its paired discard pile. Drawing never fails:
//!
//! 1. Take from the front of the draw pile.
//! 2. If it runs dry, shuffle the discard pile into a new draw pile.
//! 3. If the discard pile is empty too, mint a brand-new shuffled 52-card
//!    deck. This emergency refill covers the case where every card is held
//!    or in play and none has been discarded yet. It is deliberate and the
//!    only point where the 52-card conservation invariant is relaxed.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::card::{Card, CardId, Rank, Suit};
use crate::core::GameRng;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Build the 52-card multiset (4 suits x 13 ranks) with ids starting at `first_id`.
///
/// Cards come out in suit-major order; shuffle before use.
#[must_use]
pub fn create_deck(first_id: u32) -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| (suit, rank)))
        .enumerate()
        .map(|(i, (suit, rank))| Card::new(CardId::new(first_id + i as u32), suit, rank))
        .collect()
}

/// Return a uniformly random permutation of `cards`. The input is untouched.
#[must_use]
pub fn shuffle(cards: &[Card], rng: &mut GameRng) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled
}

/// A draw pile with its paired discard pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPile {
    draw_pile: Vec<Card>,
    discard: Vec<Card>,
    /// Next id to hand out when an emergency deck is minted.
    next_id: u32,
    emergency_refills: u32,
}

impl DeckPile {
    /// Create a pile holding a freshly shuffled deck with ids from `first_id`.
    #[must_use]
    pub fn new(first_id: u32, rng: &mut GameRng) -> Self {
        let deck = create_deck(first_id);
        Self {
            draw_pile: shuffle(&deck, rng),
            discard: Vec::new(),
            next_id: first_id + DECK_SIZE as u32,
            emergency_refills: 0,
        }
    }

    /// Create a pile from explicit contents. The draw pile is used as given.
    #[must_use]
    pub fn from_parts(draw_pile: Vec<Card>, discard: Vec<Card>, next_id: u32) -> Self {
        Self {
            draw_pile,
            discard,
            next_id,
            emergency_refills: 0,
        }
    }

    /// Draw exactly `n` cards.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(n);

        while drawn.len() < n {
            if self.draw_pile.is_empty() {
                self.refill(rng);
            }
            let take = (n - drawn.len()).min(self.draw_pile.len());
            drawn.extend(self.draw_pile.drain(..take));
        }

        drawn
    }

    /// Draw a single card.
    pub fn draw_one(&mut self, rng: &mut GameRng) -> Card {
        // draw(1) always yields one card
        self.draw(1, rng)[0]
    }

    /// Put cards on the discard pile.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    fn refill(&mut self, rng: &mut GameRng) {
        if self.discard.is_empty() {
            let fresh = create_deck(self.next_id);
            self.next_id += DECK_SIZE as u32;
            self.emergency_refills += 1;
            warn!(
                refills = self.emergency_refills,
                "deck and discard exhausted, minting a fresh deck"
            );
            self.draw_pile = shuffle(&fresh, rng);
        } else {
            debug!(cards = self.discard.len(), "reshuffling discard into deck");
            let discard = std::mem::take(&mut self.discard);
            self.draw_pile = shuffle(&discard, rng);
        }
    }

    /// Cards remaining in the draw pile, front first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty()
    }

    /// Cards in the draw pile and discard pile combined.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.discard.len()
    }

    /// How many emergency decks have been minted.
    #[must_use]
    pub fn emergency_refills(&self) -> u32 {
        self.emergency_refills
    }
}
