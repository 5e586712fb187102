//! Rejected transitions.
//!
//! Illegal actions are not errors in the I/O sense. Every engine and ledger
//! operation either produces a fully valid next state or returns a
//! `Rejection` and leaves the previous state untouched.

use crate::cards::CardId;
use crate::locations::LocationId;
use crate::player::ItemKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// An action needs at least one card.
    NoCardsSelected,
    /// More cards than the active modifier allows.
    TooManyCards { limit: usize },
    /// A selected card is not in the hand (or was selected twice).
    CardNotInHand(CardId),
    InsufficientMana { needed: i64, available: i64 },
    InsufficientGold { needed: i64, available: i64 },
    InsufficientXp { needed: i64, available: i64 },
    AbilityOnCooldown { turns: u32 },
    UnknownItem(usize),
    ItemNotUsable(ItemKind),
    /// A resolution is waiting for "end turn".
    ResolutionPending,
    /// No resolution is waiting.
    NothingPending,
    /// Fate rewind already used, or the pending result did not fail.
    RewindUnavailable,
    UnknownLocation(LocationId),
    LocationCleared(LocationId),
    /// Time warp on the first turn of a round.
    NoTurnToRefund,
    /// Health is at zero; only fate rewind or ending the turn remain.
    Downed,
    GameOver,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NoCardsSelected => write!(f, "no cards selected"),
            Rejection::TooManyCards { limit } => write!(f, "at most {} cards may be played here", limit),
            Rejection::CardNotInHand(id) => write!(f, "{} is not in hand", id),
            Rejection::InsufficientMana { needed, available } => {
                write!(f, "needs {} mana, have {}", needed, available)
            }
            Rejection::InsufficientGold { needed, available } => {
                write!(f, "needs {} gold, have {}", needed, available)
            }
            Rejection::InsufficientXp { needed, available } => {
                write!(f, "needs {} xp, have {}", needed, available)
            }
            Rejection::AbilityOnCooldown { turns } => write!(f, "ability ready in {} turns", turns),
            Rejection::UnknownItem(index) => write!(f, "no item at slot {}", index),
            Rejection::ItemNotUsable(item) => write!(f, "{} cannot be used", item.name()),
            Rejection::ResolutionPending => write!(f, "end the turn first"),
            Rejection::NothingPending => write!(f, "nothing to confirm"),
            Rejection::RewindUnavailable => write!(f, "fate rewind unavailable"),
            Rejection::UnknownLocation(id) => write!(f, "unknown location {}", id),
            Rejection::LocationCleared(id) => write!(f, "location {} already cleared", id),
            Rejection::NoTurnToRefund => write!(f, "no turn to refund"),
            Rejection::Downed => write!(f, "health is 0: rewind fate or end the turn"),
            Rejection::GameOver => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for Rejection {}
