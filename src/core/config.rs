//! Game configuration.
//!
//! `Settings` carries the plain integers consumed by the resolution and
//! progression formulas. It is supplied once at game start, either built in
//! code or loaded from a TOML document:
//!
//! ```
//! use deckbound::core::Settings;
//!
//! let settings = Settings::from_toml_str("hand_size = 6\nmax_rounds = 8").unwrap();
//! assert_eq!(settings.hand_size, 6);
//! assert_eq!(settings.max_rounds, 8);
//! assert_eq!(settings.initial_health, 20); // defaulted
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Global difficulty, chosen per game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Adjust a drawn opposing card's face value for this difficulty.
    ///
    /// Easy subtracts 2 but never goes below 1; Hard adds 2.
    #[must_use]
    pub fn adjust_opponent_value(self, value: i64) -> i64 {
        match self {
            Difficulty::Easy => (value - 2).max(1),
            Difficulty::Normal => value,
            Difficulty::Hard => value + 2,
        }
    }

    /// Scale a final score for this difficulty (x0.75 Easy, x1.25 Hard).
    #[must_use]
    pub fn scale_score(self, score: i64) -> i64 {
        match self {
            Difficulty::Easy => (score * 3).div_euclid(4),
            Difficulty::Normal => score,
            Difficulty::Hard => (score * 5).div_euclid(4),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Tunable rules for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting (and starting maximum) health.
    pub initial_health: i64,

    /// Cards held after every draw-up.
    pub hand_size: usize,

    /// Rounds before the game ends on its own.
    pub max_rounds: u32,

    /// Turns in each round.
    pub turns_per_round: u32,

    /// Alignment at or below which end-of-turn decay damage applies.
    pub evil_threshold: i64,

    /// Alignment at or above which the virtue penalty and soul bonus apply.
    pub good_threshold: i64,

    /// XP cost of the first level-up.
    pub xp_base_cost: i64,

    /// Additional XP cost per level already gained.
    pub xp_level_up_mult: i64,

    /// Mana charged for each card played beyond `free_cards_per_play`.
    pub mana_cost_per_extra_card: i64,

    pub alignment_min: i64,
    pub alignment_max: i64,

    /// Cards that may be played in one action without paying mana.
    pub free_cards_per_play: usize,

    /// Mana cost of a fate rewind.
    pub fate_rewind_cost: i64,

    /// Mana cost of a mulligan.
    pub mulligan_cost: i64,

    /// Turns a class ability stays on cooldown after use.
    pub ability_cooldown: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_health: 20,
            hand_size: 5,
            max_rounds: 10,
            turns_per_round: 3,
            evil_threshold: -3,
            good_threshold: 3,
            xp_base_cost: 5,
            xp_level_up_mult: 3,
            mana_cost_per_extra_card: 1,
            alignment_min: -5,
            alignment_max: 5,
            free_cards_per_play: 3,
            fate_rewind_cost: 2,
            mulligan_cost: 1,
            ability_cooldown: 3,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        let settings: Settings = toml::from_str(source).context("invalid settings document")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings are internally consistent.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.initial_health <= 0 {
            bail!("initial_health must be positive (got {})", self.initial_health);
        }
        if self.hand_size == 0 || self.hand_size > 52 {
            bail!("hand_size must be in 1..=52 (got {})", self.hand_size);
        }
        if self.max_rounds == 0 || self.turns_per_round == 0 {
            bail!("max_rounds and turns_per_round must be positive");
        }
        if self.alignment_min > self.alignment_max {
            bail!(
                "alignment_min ({}) exceeds alignment_max ({})",
                self.alignment_min,
                self.alignment_max
            );
        }
        let bounds = self.alignment_min..=self.alignment_max;
        if !bounds.contains(&self.evil_threshold) || !bounds.contains(&self.good_threshold) {
            bail!("alignment thresholds must lie within [alignment_min, alignment_max]");
        }
        if self.evil_threshold >= self.good_threshold {
            bail!(
                "evil_threshold ({}) must be below good_threshold ({})",
                self.evil_threshold,
                self.good_threshold
            );
        }
        if self.xp_base_cost <= 0 || self.xp_level_up_mult < 0 {
            bail!("xp costs must be positive");
        }
        if self.mana_cost_per_extra_card < 0 || self.fate_rewind_cost < 0 || self.mulligan_cost < 0 {
            bail!("mana costs must not be negative");
        }
        Ok(())
    }

    /// Clamp an alignment value into the configured bounds.
    #[must_use]
    pub fn clamp_alignment(&self, alignment: i64) -> i64 {
        alignment.clamp(self.alignment_min, self.alignment_max)
    }

    /// XP needed to advance from `level` to `level + 1`.
    #[must_use]
    pub fn level_up_cost(&self, level: u32) -> i64 {
        self.xp_base_cost + i64::from(level.saturating_sub(1)) * self.xp_level_up_mult
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the round structure.
    #[must_use]
    pub fn with_rounds(mut self, max_rounds: u32, turns_per_round: u32) -> Self {
        self.max_rounds = max_rounds;
        self.turns_per_round = turns_per_round;
        self
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_initial_health(mut self, health: i64) -> Self {
        self.initial_health = health;
        self
    }

    /// Set the alignment thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, evil: i64, good: i64) -> Self {
        self.evil_threshold = evil;
        self.good_threshold = good;
        self
    }
}
