//! Turn resolution.
//!
//! `resolve` is a pure function of its input. All randomness happens
//! upstream when the opposing card is drawn, so identical inputs always
//! produce identical resolutions.
//!
//! ## Algorithm
//!
//! 1. Raw total: sum of card values, penalized suit counts 0
//! 2. Combo: folded into the raw total (multiplier, then flat bonus)
//! 3. Opposing value: difficulty, virtue penalty, modifier, power floor
//! 4. Player total: card total + stat bonus + suit bonus
//! 5. Success on auto-crit or `player >= opponent`
//! 6. Rewards scale with the margin; failures deal damage

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::ActionKind;
use crate::cards::{apply_combo, Card, HandCombo};
use crate::core::Difficulty;
use crate::locations::NodeModifier;

/// Margin credited to an automatic critical success.
pub const CRIT_MARGIN: i64 = 10;

/// Suit bonus when a played card matches the preferred suit.
pub const SUIT_MATCH_BONUS: i64 = 2;

/// Caller-supplied context for one resolution.
#[derive(Clone, Debug)]
pub struct ResolveInput<'a> {
    pub cards: &'a [Card],
    pub opponent: Card,
    pub action: ActionKind,
    /// Base stat plus temporary boost and passive items.
    pub stat_bonus: i64,
    pub suit_bonus: i64,
    pub modifier: Option<&'a NodeModifier>,
    pub auto_crit: bool,
    pub damage_block: bool,
    pub difficulty: Difficulty,
    pub alignment: i64,
    pub good_threshold: i64,
}

/// Resource and counter deltas of a success.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rewards {
    /// Requested heal. The ledger clamps it to max health.
    pub heal: i64,
    pub xp: i64,
    pub gold: i64,
    pub mana: i64,
    pub soul: i64,
    pub fortune: i64,
    pub explore: i64,
    pub champion: i64,
    /// Location steps for an exploration.
    pub explore_steps: usize,
}

/// One committed line of history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnRecord {
    pub round: u32,
    pub turn: u32,
    pub action: String,
    pub player_total: i64,
    pub opponent_value: i64,
    pub success: bool,
    pub outcome: String,
    pub cards_played: usize,
}

/// Full outcome of one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub action: ActionKind,
    pub cards_played: usize,
    /// Card sum before the combo.
    pub raw_total: i64,
    pub combo: Option<HandCombo>,
    /// Card sum after the combo.
    pub card_total: i64,
    pub stat_bonus: i64,
    pub suit_bonus: i64,
    pub player_total: i64,
    /// Effective opposing value, all adjustments included.
    pub opponent_value: i64,
    pub success: bool,
    pub margin: i64,
    pub rewards: Rewards,
    pub damage: i64,
    /// A damage block absorbed this failure.
    pub blocked: bool,
    /// An auto-crit decided this resolution.
    pub auto_crit: bool,
    /// Failure damage is doubled.
    pub double_damage: bool,
    pub message: String,
}

impl Resolution {
    /// The history line for this resolution.
    #[must_use]
    pub fn record(&self, round: u32, turn: u32) -> TurnRecord {
        TurnRecord {
            round,
            turn,
            action: self.action.label(),
            player_total: self.player_total,
            opponent_value: self.opponent_value,
            success: self.success,
            outcome: self.message.clone(),
            cards_played: self.cards_played,
        }
    }
}

/// Card sum, with cards of the penalized suit counting 0.
#[must_use]
pub fn raw_card_total(cards: &[Card], modifier: Option<&NodeModifier>) -> i64 {
    let penalized = modifier.and_then(NodeModifier::penalized_suit);
    cards
        .iter()
        .filter(|card| Some(card.suit) != penalized)
        .map(Card::value)
        .sum()
}

/// Effective opposing value.
#[must_use]
pub fn opponent_value(
    face_value: i64,
    difficulty: Difficulty,
    alignment: i64,
    good_threshold: i64,
    modifier: Option<&NodeModifier>,
) -> i64 {
    let mut value = difficulty.adjust_opponent_value(face_value);
    if alignment >= good_threshold {
        value += 1;
    }
    if let Some(modifier) = modifier {
        value += modifier.opponent_adjustment();
        if let Some(floor) = modifier.power_floor() {
            value = value.max(floor);
        }
    }
    value
}

/// Resolve one action.
#[must_use]
pub fn resolve(input: &ResolveInput<'_>) -> Resolution {
    let raw_total = raw_card_total(input.cards, input.modifier);
    let (combo, card_total) = apply_combo(input.cards, raw_total);
    let opponent_value = opponent_value(
        input.opponent.value(),
        input.difficulty,
        input.alignment,
        input.good_threshold,
        input.modifier,
    );

    let mut resolution = Resolution {
        action: input.action,
        cards_played: input.cards.len(),
        raw_total,
        combo,
        card_total,
        stat_bonus: input.stat_bonus,
        suit_bonus: input.suit_bonus,
        player_total: card_total + input.stat_bonus + input.suit_bonus,
        opponent_value,
        success: false,
        margin: 0,
        rewards: Rewards::default(),
        damage: 0,
        blocked: false,
        auto_crit: false,
        double_damage: input.modifier.is_some_and(NodeModifier::doubles_damage),
        message: String::new(),
    };
    settle(
        &mut resolution,
        input.auto_crit,
        input.damage_block,
        input.alignment >= input.good_threshold,
    );

    debug!(
        action = %resolution.action,
        player_total = resolution.player_total,
        opponent_value = resolution.opponent_value,
        success = resolution.success,
        margin = resolution.margin,
        "resolved"
    );
    resolution
}

/// Decide success and fill in rewards or damage from the totals already
/// stored on `resolution`.
pub(crate) fn settle(resolution: &mut Resolution, auto_crit: bool, damage_block: bool, virtuous: bool) {
    resolution.auto_crit = auto_crit;
    resolution.success = auto_crit || resolution.player_total >= resolution.opponent_value;
    resolution.margin = if auto_crit {
        CRIT_MARGIN
    } else {
        (resolution.player_total - resolution.opponent_value).max(0)
    };
    resolution.rewards = Rewards::default();
    resolution.damage = 0;
    resolution.blocked = false;

    if resolution.success {
        resolution.rewards = rewards_for(
            resolution.action,
            resolution.margin,
            resolution.suit_bonus > 0,
            virtuous,
        );
    } else if damage_block {
        resolution.blocked = true;
    } else {
        let shortfall = resolution.opponent_value - resolution.player_total;
        let mut damage = (shortfall + resolution.cards_played as i64).max(1);
        if resolution.double_damage {
            damage *= 2;
        }
        resolution.damage = damage;
    }

    resolution.message = describe(resolution);
}

fn rewards_for(action: ActionKind, margin: i64, suit_matched: bool, virtuous: bool) -> Rewards {
    let suit = i64::from(suit_matched);
    let mut rewards = Rewards::default();

    match action {
        ActionKind::Rest => rewards.heal = 2 + margin / 5 + suit,
        ActionKind::Train => rewards.xp = 1 + margin / 8 + suit,
        ActionKind::Loot => {
            rewards.gold = 1 + margin / 4 + suit;
            rewards.fortune = 1;
        }
        ActionKind::Study => rewards.mana = 1 + margin / 4 + suit,
        ActionKind::Explore(_) => {
            rewards.explore = 1;
            rewards.champion = 1;
            if margin >= CRIT_MARGIN {
                rewards.explore_steps = 2;
                rewards.xp = 1;
            } else {
                rewards.explore_steps = 1;
                if margin >= 5 {
                    rewards.gold = 1;
                }
            }
        }
    }

    if virtuous {
        rewards.soul = 1;
    }
    rewards
}

fn describe(resolution: &Resolution) -> String {
    let versus = format!("{} vs {}", resolution.player_total, resolution.opponent_value);
    if resolution.success {
        let mut gains = Vec::new();
        let rewards = &resolution.rewards;
        for (amount, what) in [
            (rewards.heal, "health"),
            (rewards.xp, "xp"),
            (rewards.gold, "gold"),
            (rewards.mana, "mana"),
            (rewards.soul, "soul"),
        ] {
            if amount > 0 {
                gains.push(format!("+{} {}", amount, what));
            }
        }
        if rewards.explore_steps > 0 {
            gains.push(format!("{} step(s) onward", rewards.explore_steps));
        }
        let head = if resolution.auto_crit {
            "Critical success".to_string()
        } else {
            format!("Success ({})", versus)
        };
        if gains.is_empty() {
            head
        } else {
            format!("{}: {}", head, gains.join(", "))
        }
    } else if resolution.blocked {
        format!("Failure ({}): the ward held", versus)
    } else {
        format!("Failure ({}): {} damage", versus, resolution.damage)
    }
}
