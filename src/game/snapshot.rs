//! Game snapshots.
//!
//! A `GameSnapshot` is the complete read-only view of a game: everything UI
//! and side collaborators consume, plus the deck and RNG state needed to
//! resume play with `Game::restore`. Binary encoding uses bincode.

use anyhow::Context;
use im::Vector;
use serde::{Deserialize, Serialize};

use super::engine::{GameOutcome, TurnResult};
use crate::cards::{Card, DeckPile};
use crate::core::{Difficulty, GameRngState, Settings};
use crate::locations::AdventureLocation;
use crate::player::PlayerState;
use crate::resolve::TurnRecord;
use crate::schedule::RoundClock;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub settings: Settings,
    pub difficulty: Difficulty,
    pub player: PlayerState,
    pub hand: Vec<Card>,
    pub player_deck: DeckPile,
    pub dungeon_deck: DeckPile,
    pub player_rng: GameRngState,
    pub dungeon_rng: GameRngState,
    pub locations: Vec<AdventureLocation>,
    pub clock: RoundClock,
    pub history: Vector<TurnRecord>,
    pub pending: Option<TurnResult>,
    pub outcome: Option<GameOutcome>,
    /// Score at the time of the snapshot.
    pub score: i64,
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        bincode::serialize(self).context("failed to encode game snapshot")
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        bincode::deserialize(bytes).context("failed to decode game snapshot")
    }
}
