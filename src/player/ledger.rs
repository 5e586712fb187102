//! Player resource ledger.
//!
//! Reducer-style transitions `(PlayerState, event) -> PlayerState`. Each
//! event checks its own precondition; a failed precondition is a
//! `Rejection` and the input state is left as it was. Quests are
//! re-evaluated after every applied transition.
//!
//! ```
//! use deckbound::core::Settings;
//! use deckbound::player::{ledger, LedgerEvent, PlayerClass, PlayerState};
//!
//! let settings = Settings::default();
//! let player = PlayerState::new(PlayerClass::Mage, &settings);
//!
//! // Purify costs 3 gold and moves alignment toward virtue.
//! let next = ledger::reduce(&player, &LedgerEvent::Purify, &settings);
//! assert_eq!(next.alignment, player.alignment + 1);
//! assert_eq!(next.resources.gold, player.resources.gold - 3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::quest::refresh_quests;
use super::state::{
    Ability, ItemKind, PlayerState, StatBoost, StatKind, ABILITY_MANA_COST, BATTLE_CRY_BOOST,
    DIVINE_LIGHT_HEAL,
};
use crate::core::Settings;
use crate::locations::CompletionReward;
use crate::rejection::Rejection;
use crate::resolve::Resolution;

/// Gold granted by a dark pact.
pub const DARK_PACT_GOLD: i64 = 3;

/// Alignment lost to a dark pact.
pub const DARK_PACT_ALIGNMENT: i64 = -2;

/// Gold spent to purify.
pub const PURIFY_COST: i64 = 3;

/// Max health gained per level.
pub const LEVEL_UP_HEALTH: i64 = 2;

/// Health restored by a healing draught.
pub const DRAUGHT_HEAL: i64 = 5;

/// Mana restored by a mana crystal.
pub const CRYSTAL_MANA: i64 = 3;

/// End-of-turn damage while alignment is at or below the evil threshold.
pub const ALIGNMENT_DECAY_DAMAGE: i64 = 1;

/// Player-initiated ledger events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Use the class ability.
    ActivateAbility,
    /// Buy an item from the shop.
    PurchaseItem(ItemKind),
    /// Use the consumable at this inventory slot.
    UseItem(usize),
    /// Spend XP for a level and a stat point.
    LevelUp(StatKind),
    /// Pay for a redraw. The engine swaps the cards.
    Mulligan,
    /// Gold now, alignment lost.
    DarkPact,
    /// Gold spent, alignment and soul gained.
    Purify,
    /// Pay for a refunded turn. The engine moves the clock.
    TimeWarp,
}

/// Apply an event, or reject it.
pub fn apply(
    state: &PlayerState,
    event: &LedgerEvent,
    settings: &Settings,
) -> Result<PlayerState, Rejection> {
    let mut next = state.clone();

    match *event {
        LedgerEvent::ActivateAbility => {
            if next.ability_cooldown > 0 {
                return Err(Rejection::AbilityOnCooldown {
                    turns: next.ability_cooldown,
                });
            }
            spend_mana(&mut next, ABILITY_MANA_COST)?;
            match next.class.ability() {
                Ability::BattleCry => {
                    next.effects.stat_boost = Some(StatBoost {
                        stat: StatKind::Might,
                        amount: BATTLE_CRY_BOOST,
                    });
                }
                Ability::Shadowstep => next.effects.auto_crit = true,
                Ability::ArcaneWard => next.effects.damage_block = true,
                Ability::DivineLight => {
                    next.heal(DIVINE_LIGHT_HEAL);
                }
            }
            next.ability_cooldown = settings.ability_cooldown;
        }

        LedgerEvent::PurchaseItem(item) => {
            spend_gold(&mut next, item.cost())?;
            next.items.push_back(item);
        }

        LedgerEvent::UseItem(slot) => {
            let item = *next.items.get(slot).ok_or(Rejection::UnknownItem(slot))?;
            if !item.is_consumable() {
                return Err(Rejection::ItemNotUsable(item));
            }
            match item {
                ItemKind::HealingDraught => {
                    next.heal(DRAUGHT_HEAL);
                }
                ItemKind::ManaCrystal => next.resources.mana += CRYSTAL_MANA,
                ItemKind::Whetstone | ItemKind::LuckyCharm => {}
            }
            next.items.remove(slot);
        }

        LedgerEvent::LevelUp(stat) => {
            let cost = settings.level_up_cost(next.stats.level);
            if next.resources.xp < cost {
                return Err(Rejection::InsufficientXp {
                    needed: cost,
                    available: next.resources.xp,
                });
            }
            next.resources.xp -= cost;
            next.stats.level += 1;
            next.stats.add(stat, 1);
            next.resources.max_health += LEVEL_UP_HEALTH;
            next.resources.health += LEVEL_UP_HEALTH;
            info!(level = next.stats.level, stat = stat.name(), "level up");
        }

        LedgerEvent::Mulligan => spend_mana(&mut next, settings.mulligan_cost)?,

        LedgerEvent::DarkPact => {
            next.resources.gold += DARK_PACT_GOLD;
            next.shift_alignment(DARK_PACT_ALIGNMENT, settings);
        }

        LedgerEvent::Purify => {
            spend_gold(&mut next, PURIFY_COST)?;
            next.shift_alignment(1, settings);
            next.scoring.soul += 1;
        }

        LedgerEvent::TimeWarp => {
            let cost = i64::from(next.extra_turns_bought) + 1;
            spend_mana(&mut next, cost)?;
            next.extra_turns_bought += 1;
        }

    }

    refresh_quests(&mut next);
    Ok(next)
}

/// Engine-side mana charge for extra cards and fate rewind.
///
/// A negative amount charges nothing.
pub(crate) fn charge_mana(state: &PlayerState, amount: i64) -> Result<PlayerState, Rejection> {
    let mut next = state.clone();
    spend_mana(&mut next, amount)?;
    refresh_quests(&mut next);
    Ok(next)
}

/// Apply an event; on rejection return the state unchanged.
#[must_use]
pub fn reduce(state: &PlayerState, event: &LedgerEvent, settings: &Settings) -> PlayerState {
    apply(state, event, settings).unwrap_or_else(|rejection| {
        debug!(?event, %rejection, "ledger event rejected");
        state.clone()
    })
}

/// Credit the rewards or damage of a resolution.
///
/// Consumes the auto-crit if it was used and the damage block if it
/// absorbed the failure.
#[must_use]
pub fn credit_resolution(state: &PlayerState, resolution: &Resolution) -> PlayerState {
    let mut next = state.clone();

    if resolution.auto_crit {
        next.effects.auto_crit = false;
    }
    if resolution.blocked {
        next.effects.damage_block = false;
    }

    if resolution.success {
        let rewards = &resolution.rewards;
        next.heal(rewards.heal);
        next.resources.xp += rewards.xp;
        next.resources.gold += rewards.gold;
        next.resources.mana += rewards.mana;
        next.scoring.soul += rewards.soul;
        next.scoring.fortune += rewards.fortune;
        next.scoring.explore += rewards.explore;
        next.scoring.champion += rewards.champion;
    } else {
        next.take_damage(resolution.damage);
    }

    refresh_quests(&mut next);
    next
}

/// Undo a failed resolution that is about to be replaced.
///
/// Refunds its damage and gives back a damage block it absorbed.
#[must_use]
pub fn revert_failure(state: &PlayerState, resolution: &Resolution) -> PlayerState {
    let mut next = state.clone();
    if !resolution.success {
        next.refund_damage(resolution.damage);
        if resolution.blocked {
            next.effects.damage_block = true;
        }
    }
    next
}

/// Grant a location's completion reward.
#[must_use]
pub fn grant_completion(
    state: &PlayerState,
    reward: &CompletionReward,
    settings: &Settings,
) -> PlayerState {
    let mut next = state.clone();

    match reward {
        CompletionReward::Gold(n) => next.resources.gold += n,
        CompletionReward::Xp(n) => next.resources.xp += n,
        CompletionReward::Mana(n) => next.resources.mana += n,
        CompletionReward::Item(item) => next.items.push_back(*item),
        CompletionReward::StatPoint(stat) => next.stats.add(*stat, 1),
        CompletionReward::Artifact(name) => next.artifacts.push_back(name.clone()),
    }
    next.locations_cleared += 1;
    next.shift_alignment(1, settings);

    refresh_quests(&mut next);
    next
}

/// End-of-turn passives: alignment decay and cooldown tick.
#[must_use]
pub fn end_of_turn(state: &PlayerState, settings: &Settings) -> PlayerState {
    let mut next = state.clone();

    if next.alignment <= settings.evil_threshold {
        debug!(alignment = next.alignment, "alignment decay");
        next.take_damage(ALIGNMENT_DECAY_DAMAGE);
    }
    next.ability_cooldown = next.ability_cooldown.saturating_sub(1);

    refresh_quests(&mut next);
    next
}

/// Round boundary: per-round effects expire.
#[must_use]
pub fn start_round(state: &PlayerState) -> PlayerState {
    let mut next = state.clone();
    next.effects.clear_round_effects();
    next
}

fn spend_mana(player: &mut PlayerState, amount: i64) -> Result<(), Rejection> {
    let amount = amount.max(0);
    if player.resources.mana < amount {
        return Err(Rejection::InsufficientMana {
            needed: amount,
            available: player.resources.mana,
        });
    }
    player.resources.mana -= amount;
    Ok(())
}

fn spend_gold(player: &mut PlayerState, amount: i64) -> Result<(), Rejection> {
    let amount = amount.max(0);
    if player.resources.gold < amount {
        return Err(Rejection::InsufficientGold {
            needed: amount,
            available: player.resources.gold,
        });
    }
    player.resources.gold -= amount;
    Ok(())
}
