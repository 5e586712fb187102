//! Playing cards.
//!
//! A `Card` is an immutable value: suit, rank and a game-unique `CardId`.
//! Its numeric value is derived from the rank (Ace = 1, numerals at face
//! value, court cards = 10).

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one game.
///
/// Two cards with the same suit and rank (possible only after an emergency
/// deck refill) still have distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

/// Suit colour, used to pick a branch path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitColor {
    Red,
    Black,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    #[must_use]
    pub const fn color(self) -> SuitColor {
        match self {
            Suit::Hearts | Suit::Diamonds => SuitColor::Red,
            Suit::Clubs | Suit::Spades => SuitColor::Black,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        };
        f.write_str(name)
    }
}

/// Card rank. Ace is low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position in the run Ace..King (1..=13). Used for straights.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Numeric value contributed by a card of this rank.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Rank::Jack | Rank::Queen | Rank::King => 10,
            other => other.ordinal() as i64,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self { id, suit, rank }
    }

    /// Rank-derived numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.rank.value()
    }

    #[must_use]
    pub const fn color(&self) -> SuitColor {
        self.suit.color()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
