//! Hand combo evaluation.
//!
//! Classifies a selection of cards into at most one poker-style combo. The
//! first match in priority order wins:
//!
//! | combo | rule | effect |
//! |---|---|---|
//! | Four of a Kind | 4 of one rank | x2.5 |
//! | Three of a Kind | 3 of one rank | x2.0 |
//! | Two Pair | two ranks with 2+ | x1.75 |
//! | Pair | 2 of one rank | x1.5 |
//! | Suited Straight | 3+ consecutive, one suit | +10 |
//! | Straight | 3+ consecutive | +5 |
//! | Flush | 3+ of one suit | x1.25 |
//!
//! Multipliers are held in quarters so `floor(raw * multiplier)` stays exact
//! integer arithmetic.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Rank};

/// Minimum cards for straights and flushes.
pub const MIN_RUN_CARDS: usize = 3;

/// A classified combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandCombo {
    FourOfAKind,
    ThreeOfAKind,
    TwoPair,
    Pair,
    SuitedStraight,
    Straight,
    Flush,
}

impl HandCombo {
    /// Every combo, highest priority first.
    pub const PRIORITY: [HandCombo; 7] = [
        HandCombo::FourOfAKind,
        HandCombo::ThreeOfAKind,
        HandCombo::TwoPair,
        HandCombo::Pair,
        HandCombo::SuitedStraight,
        HandCombo::Straight,
        HandCombo::Flush,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HandCombo::FourOfAKind => "Four of a Kind",
            HandCombo::ThreeOfAKind => "Three of a Kind",
            HandCombo::TwoPair => "Two Pair",
            HandCombo::Pair => "Pair",
            HandCombo::SuitedStraight => "Suited Straight",
            HandCombo::Straight => "Straight",
            HandCombo::Flush => "Flush",
        }
    }

    /// Multiplier in quarters. Zero means flat bonus only.
    #[must_use]
    pub const fn multiplier_quarters(self) -> i64 {
        match self {
            HandCombo::FourOfAKind => 10,
            HandCombo::ThreeOfAKind => 8,
            HandCombo::TwoPair => 7,
            HandCombo::Pair => 6,
            HandCombo::Flush => 5,
            HandCombo::SuitedStraight | HandCombo::Straight => 0,
        }
    }

    /// Multiplier as a float, for display. Zero means flat bonus only.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        self.multiplier_quarters() as f64 / 4.0
    }

    #[must_use]
    pub const fn bonus_power(self) -> i64 {
        match self {
            HandCombo::SuitedStraight => 10,
            HandCombo::Straight => 5,
            _ => 0,
        }
    }

    /// Fold this combo into a raw card total.
    ///
    /// The multiplier is applied (floored) before the flat bonus is added.
    #[must_use]
    pub fn apply(self, raw: i64) -> i64 {
        let scaled = match self.multiplier_quarters() {
            0 => raw,
            quarters => (raw * quarters).div_euclid(4),
        };
        scaled + self.bonus_power()
    }
}

impl std::fmt::Display for HandCombo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a card selection. Returns `None` when no combo applies.
#[must_use]
pub fn evaluate(cards: &[Card]) -> Option<HandCombo> {
    if cards.len() < 2 {
        return None;
    }

    let mut rank_counts: FxHashMap<Rank, usize> = FxHashMap::default();
    for card in cards {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
    }
    let highest = rank_counts.values().copied().max().unwrap_or(0);
    let pairs = rank_counts.values().filter(|&&n| n >= 2).count();

    if highest >= 4 {
        return Some(HandCombo::FourOfAKind);
    }
    if highest == 3 {
        return Some(HandCombo::ThreeOfAKind);
    }
    if pairs >= 2 {
        return Some(HandCombo::TwoPair);
    }
    if pairs == 1 {
        return Some(HandCombo::Pair);
    }

    if cards.len() < MIN_RUN_CARDS {
        return None;
    }

    let suited = cards.iter().all(|c| c.suit == cards[0].suit);
    match (is_consecutive(cards), suited) {
        (true, true) => Some(HandCombo::SuitedStraight),
        (true, false) => Some(HandCombo::Straight),
        (false, true) => Some(HandCombo::Flush),
        (false, false) => None,
    }
}

/// Apply the combo for `cards` (if any) to `raw`.
#[must_use]
pub fn apply_combo(cards: &[Card], raw: i64) -> (Option<HandCombo>, i64) {
    let combo = evaluate(cards);
    let adjusted = combo.map_or(raw, |c| c.apply(raw));
    (combo, adjusted)
}

/// All ranks distinct and forming one unbroken run (Ace low).
fn is_consecutive(cards: &[Card]) -> bool {
    let mut ordinals: SmallVec<[u8; 8]> = cards.iter().map(|c| c.rank.ordinal()).collect();
    ordinals.sort_unstable();
    ordinals.windows(2).all(|w| w[1] == w[0] + 1)
}
