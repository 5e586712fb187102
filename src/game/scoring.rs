//! Final score.
//!
//! | component | weight |
//! |---|---|
//! | explore / champion / fortune / soul | x2 / x3 / x2 / x2 |
//! | might + agility + wisdom + spirit | x5 |
//! | gold | floor(gold / 2) |
//! | mana | x1 |
//! | items / artifacts | x5 / x10 |
//! | completed quests | their bonus points |
//!
//! The sum is then scaled by difficulty (Easy x0.75, Hard x1.25).

use serde::{Deserialize, Serialize};

use crate::core::Difficulty;
use crate::player::PlayerState;

/// Score components before difficulty scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub counters: i64,
    pub stats: i64,
    pub gold: i64,
    pub mana: i64,
    pub items: i64,
    pub artifacts: i64,
    pub quests: i64,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn of(player: &PlayerState) -> Self {
        let scoring = &player.scoring;
        Self {
            counters: scoring.explore * 2 + scoring.champion * 3 + scoring.fortune * 2 + scoring.soul * 2,
            stats: player.stats.total() * 5,
            gold: player.resources.gold.div_euclid(2),
            mana: player.resources.mana,
            items: player.items.len() as i64 * 5,
            artifacts: player.artifacts.len() as i64 * 10,
            quests: player.completed_quests().map(|q| q.bonus_points).sum(),
        }
    }

    /// Unscaled sum.
    #[must_use]
    pub fn base(&self) -> i64 {
        self.counters + self.stats + self.gold + self.mana + self.items + self.artifacts + self.quests
    }
}

/// Final score for a player at a difficulty.
#[must_use]
pub fn final_score(player: &PlayerState, difficulty: Difficulty) -> i64 {
    difficulty.scale_score(ScoreBreakdown::of(player).base())
}
