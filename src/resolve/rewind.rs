//! Fate rewind: re-resolve a failed result against a fresh opposing card.
//!
//! The player side is kept exactly as computed, combo included. The new
//! opposing value only gets the difficulty adjustment; alignment and
//! encounter modifiers are not applied again.

use tracing::debug;

use super::resolver::{settle, Resolution};
use crate::cards::Card;
use crate::core::Difficulty;

/// Replace the opposing card of `previous` and settle again.
///
/// `damage_block` is the block available after the previous failure has
/// been reverted. Double damage carries over from the original encounter.
#[must_use]
pub fn reresolve(
    previous: &Resolution,
    new_opponent: &Card,
    difficulty: Difficulty,
    damage_block: bool,
    alignment: i64,
    good_threshold: i64,
) -> Resolution {
    let mut resolution = previous.clone();
    resolution.opponent_value = difficulty.adjust_opponent_value(new_opponent.value());
    settle(&mut resolution, false, damage_block, alignment >= good_threshold);

    debug!(
        action = %resolution.action,
        player_total = resolution.player_total,
        opponent_value = resolution.opponent_value,
        success = resolution.success,
        "fate rewind"
    );
    resolution
}
