//! # deckbound
//!
//! Turn resolution and progression engine for a single-player card-driven
//! adventure game.
//!
//! The player spends cards from a hand on self-improvement actions or on
//! location encounters, and each action is resolved against a card drawn
//! from the dungeon deck.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: All randomness comes from seeded `GameRng` streams.
//!    The resolver itself is a pure function, so the same seed and inputs
//!    replay the same game.
//!
//! 2. **Reducer-Style State**: `PlayerState` is never patched in place by
//!    callers. Ledger events map `(PlayerState, event)` to a new state and
//!    illegal events are rejected without touching anything.
//!
//! 3. **Closed Vocabularies**: Actions, effects, modifiers and rewards are
//!    enums matched exhaustively, never string keys.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state clones via `im-rs`, which is
//!   what makes returning fresh states from every transition cheap.
//!
//! - **Append-Only Locations**: Branches append encounters to an arena and
//!   splice indices into the route; visited encounters are never rewritten.
//!
//! ## Modules
//!
//! - `core`: RNG, settings, difficulty
//! - `cards`: Cards, decks, combo evaluation
//! - `locations`: Encounters, modifiers, location progression
//! - `player`: Player state, ledger reducer, quests
//! - `resolve`: Turn resolution and fate rewind
//! - `schedule`: Round/turn clock
//! - `game`: The engine, scoring, snapshots
//! - `persistence`: Leaderboard stores

pub mod cards;
pub mod core;
pub mod game;
pub mod locations;
pub mod persistence;
pub mod player;
pub mod rejection;
pub mod resolve;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{Difficulty, GameRng, GameRngState, Settings};

pub use crate::cards::{
    apply_combo, create_deck, evaluate, shuffle, Card, CardId, DeckPile, HandCombo, Rank, Suit,
    SuitColor, DECK_SIZE,
};

pub use crate::locations::{
    default_locations, AdventureLocation, Branch, CompletionReward, EliteMechanic, EliteSpecial,
    Encounter, LocationId, NodeModifier, Progress,
};

pub use crate::player::{
    ActiveEffects, ItemKind, LedgerEvent, PlayerClass, PlayerState, Quest, QuestCriterion, StatKind,
};

pub use crate::resolve::{resolve, reresolve, ActionKind, Resolution, ResolveInput, Rewards, TurnRecord};

pub use crate::schedule::{ClockTick, RoundClock};

pub use crate::game::{
    AssetGenerator, Game, GameOutcome, GameSnapshot, NarrationRequest, PortraitRequest,
    ScoreBreakdown, TurnResult,
};

pub use crate::persistence::{JsonFileStore, LeaderboardEntry, MemoryStore, ScoreStore};

pub use crate::rejection::Rejection;
