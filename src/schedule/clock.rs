//! Round and turn counters.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::Settings;
use crate::rejection::Rejection;

/// What a clock advance did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTick {
    /// A new round started; per-round effects expire.
    pub new_round: bool,
    /// The round count went past `max_rounds`.
    pub expired: bool,
}

/// 1-based `(round, turn)` counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundClock {
    pub round: u32,
    pub turn: u32,
}

impl Default for RoundClock {
    fn default() -> Self {
        Self { round: 1, turn: 1 }
    }
}

impl RoundClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next turn, rolling into the next round after
    /// `turns_per_round` turns.
    pub fn advance(&mut self, settings: &Settings) -> ClockTick {
        self.turn += 1;
        let mut new_round = false;
        if self.turn > settings.turns_per_round {
            self.turn = 1;
            self.round += 1;
            new_round = true;
            info!(round = self.round, "round advance");
        }
        ClockTick {
            new_round,
            expired: self.round > settings.max_rounds,
        }
    }

    /// Refund one turn of the current round.
    pub fn rewind_turn(&mut self) -> Result<(), Rejection> {
        if self.turn <= 1 {
            return Err(Rejection::NoTurnToRefund);
        }
        self.turn -= 1;
        Ok(())
    }

    /// Turns left before the game runs out of rounds, the current one included.
    #[must_use]
    pub fn turns_remaining(&self, settings: &Settings) -> u32 {
        if self.round > settings.max_rounds {
            return 0;
        }
        let full_rounds = settings.max_rounds - self.round;
        full_rounds * settings.turns_per_round + (settings.turns_per_round + 1).saturating_sub(self.turn)
    }
}
