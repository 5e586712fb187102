//! Player state, resource ledger, and quests.
//!
//! - `state`: `PlayerState` and its sub-records
//! - `ledger`: Reducer-style transitions keyed by `LedgerEvent`
//! - `quest`: Quest predicates and monotonic completion

pub mod ledger;
pub mod quest;
pub mod state;

pub use ledger::LedgerEvent;
pub use quest::{Quest, QuestCriterion};
pub use state::{
    Ability, ActiveEffects, ItemKind, PlayerClass, PlayerState, ResourceKind, Resources, ScoreKind,
    Scoring, StatBoost, StatKind, Stats,
};
