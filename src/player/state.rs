//! Player state.
//!
//! `PlayerState` is immutable by convention: the ledger and the engine
//! produce a fresh state for every transition and never patch a shared one.
//! Collections use `im` persistent vectors, so those clones are O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::quest::{default_quests, Quest};
use crate::core::Settings;

/// Gold every class starts with.
pub const STARTING_GOLD: i64 = 5;

/// Mana every class starts with.
pub const STARTING_MANA: i64 = 3;

/// Mana cost of a class ability.
pub const ABILITY_MANA_COST: i64 = 3;

/// Health restored by the Cleric's Divine Light.
pub const DIVINE_LIGHT_HEAL: i64 = 4;

/// Might granted by the Warrior's Battle Cry until the round ends.
pub const BATTLE_CRY_BOOST: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Might,
    Agility,
    Wisdom,
    Spirit,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [StatKind::Might, StatKind::Agility, StatKind::Wisdom, StatKind::Spirit];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StatKind::Might => "might",
            StatKind::Agility => "agility",
            StatKind::Wisdom => "wisdom",
            StatKind::Spirit => "spirit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Health,
    MaxHealth,
    Gold,
    Mana,
    Xp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreKind {
    Explore,
    Champion,
    Fortune,
    Soul,
}

/// Class ability, one per class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// +3 might until the round ends.
    BattleCry,
    /// Next resolution is an automatic critical success.
    Shadowstep,
    /// Next failure deals no damage.
    ArcaneWard,
    /// Heal immediately.
    DivineLight,
}

impl Ability {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Ability::BattleCry => "Battle Cry",
            Ability::Shadowstep => "Shadowstep",
            Ability::ArcaneWard => "Arcane Ward",
            Ability::DivineLight => "Divine Light",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Warrior,
    Rogue,
    Mage,
    Cleric,
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 4] = [
        PlayerClass::Warrior,
        PlayerClass::Rogue,
        PlayerClass::Mage,
        PlayerClass::Cleric,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerClass::Warrior => "Warrior",
            PlayerClass::Rogue => "Rogue",
            PlayerClass::Mage => "Mage",
            PlayerClass::Cleric => "Cleric",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            PlayerClass::Warrior => "A hardened fighter who wins through raw might.",
            PlayerClass::Rogue => "A nimble opportunist who strikes where it hurts.",
            PlayerClass::Mage => "A scholar of wards and arcane patterns.",
            PlayerClass::Cleric => "A devoted healer sustained by spirit.",
        }
    }

    #[must_use]
    pub const fn ability(self) -> Ability {
        match self {
            PlayerClass::Warrior => Ability::BattleCry,
            PlayerClass::Rogue => Ability::Shadowstep,
            PlayerClass::Mage => Ability::ArcaneWard,
            PlayerClass::Cleric => Ability::DivineLight,
        }
    }

    /// Starting might/agility/wisdom/spirit.
    #[must_use]
    pub const fn starting_stats(self) -> Stats {
        let (might, agility, wisdom, spirit) = match self {
            PlayerClass::Warrior => (3, 1, 0, 1),
            PlayerClass::Rogue => (1, 3, 1, 0),
            PlayerClass::Mage => (0, 1, 3, 1),
            PlayerClass::Cleric => (1, 0, 1, 3),
        };
        Stats {
            level: 1,
            might,
            agility,
            wisdom,
            spirit,
        }
    }
}

impl std::fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub level: u32,
    pub might: i64,
    pub agility: i64,
    pub wisdom: i64,
    pub spirit: i64,
}

impl Stats {
    #[must_use]
    pub fn get(&self, stat: StatKind) -> i64 {
        match stat {
            StatKind::Might => self.might,
            StatKind::Agility => self.agility,
            StatKind::Wisdom => self.wisdom,
            StatKind::Spirit => self.spirit,
        }
    }

    pub fn add(&mut self, stat: StatKind, delta: i64) {
        let slot = match stat {
            StatKind::Might => &mut self.might,
            StatKind::Agility => &mut self.agility,
            StatKind::Wisdom => &mut self.wisdom,
            StatKind::Spirit => &mut self.spirit,
        };
        *slot += delta;
    }

    /// Sum of the four attributes (level excluded).
    #[must_use]
    pub fn total(&self) -> i64 {
        self.might + self.agility + self.wisdom + self.spirit
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources {
    pub health: i64,
    pub max_health: i64,
    pub gold: i64,
    pub mana: i64,
    pub xp: i64,
}

impl Resources {
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Health => self.health,
            ResourceKind::MaxHealth => self.max_health,
            ResourceKind::Gold => self.gold,
            ResourceKind::Mana => self.mana,
            ResourceKind::Xp => self.xp,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoring {
    pub explore: i64,
    pub champion: i64,
    pub fortune: i64,
    pub soul: i64,
}

impl Scoring {
    #[must_use]
    pub fn get(&self, kind: ScoreKind) -> i64 {
        match kind {
            ScoreKind::Explore => self.explore,
            ScoreKind::Champion => self.champion,
            ScoreKind::Fortune => self.fortune,
            ScoreKind::Soul => self.soul,
        }
    }
}

/// Shop items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Consumable: heal 5.
    HealingDraught,
    /// Consumable: +3 mana.
    ManaCrystal,
    /// Passive: +1 stat bonus on might-based actions.
    Whetstone,
    /// Passive: +1 suit bonus whenever the suit matches.
    LuckyCharm,
}

impl ItemKind {
    pub const CATALOGUE: [ItemKind; 4] = [
        ItemKind::HealingDraught,
        ItemKind::ManaCrystal,
        ItemKind::Whetstone,
        ItemKind::LuckyCharm,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ItemKind::HealingDraught => "Healing Draught",
            ItemKind::ManaCrystal => "Mana Crystal",
            ItemKind::Whetstone => "Whetstone",
            ItemKind::LuckyCharm => "Lucky Charm",
        }
    }

    /// Price in gold.
    #[must_use]
    pub const fn cost(self) -> i64 {
        match self {
            ItemKind::HealingDraught | ItemKind::ManaCrystal => 4,
            ItemKind::Whetstone => 6,
            ItemKind::LuckyCharm => 8,
        }
    }

    #[must_use]
    pub const fn is_consumable(self) -> bool {
        matches!(self, ItemKind::HealingDraught | ItemKind::ManaCrystal)
    }
}

/// A temporary stat increase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatBoost {
    pub stat: StatKind,
    pub amount: i64,
}

/// One-shot and per-round effects.
///
/// - `stat_boost`: cleared at the round boundary
/// - `auto_crit`: consumed by the next resolution
/// - `damage_block`: consumed when it absorbs a failure
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub stat_boost: Option<StatBoost>,
    pub auto_crit: bool,
    pub damage_block: bool,
}

impl ActiveEffects {
    /// Boost applying to `stat`, or 0.
    #[must_use]
    pub fn boost_for(&self, stat: StatKind) -> i64 {
        self.stat_boost
            .filter(|boost| boost.stat == stat)
            .map_or(0, |boost| boost.amount)
    }

    pub fn clear_round_effects(&mut self) {
        self.stat_boost = None;
    }
}

/// Complete player state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub class: PlayerClass,
    pub stats: Stats,
    pub resources: Resources,
    pub scoring: Scoring,
    pub items: Vector<ItemKind>,
    pub artifacts: Vector<String>,
    pub effects: ActiveEffects,
    /// Virtue/vice counter, kept within the configured bounds.
    pub alignment: i64,
    pub quests: Vector<Quest>,
    pub locations_cleared: u32,
    /// Lifetime damage, net of fate-rewind refunds.
    pub damage_taken: i64,
    pub extra_turns_bought: u32,
    pub ability_cooldown: u32,
}

impl PlayerState {
    /// Create a fresh level-1 player with the default quests.
    #[must_use]
    pub fn new(class: PlayerClass, settings: &Settings) -> Self {
        Self {
            class,
            stats: class.starting_stats(),
            resources: Resources {
                health: settings.initial_health,
                max_health: settings.initial_health,
                gold: STARTING_GOLD,
                mana: STARTING_MANA,
                xp: 0,
            },
            scoring: Scoring::default(),
            items: Vector::new(),
            artifacts: Vector::new(),
            effects: ActiveEffects::default(),
            alignment: settings.clamp_alignment(0),
            quests: default_quests(settings),
            locations_cleared: 0,
            damage_taken: 0,
            extra_turns_bought: 0,
            ability_cooldown: 0,
        }
    }

    /// Base stat plus any temporary boost on it.
    #[must_use]
    pub fn stat_bonus(&self, stat: StatKind) -> i64 {
        self.stats.get(stat) + self.effects.boost_for(stat)
    }

    #[must_use]
    pub fn has_item(&self, item: ItemKind) -> bool {
        self.items.contains(&item)
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.resources.health <= 0
    }

    #[must_use]
    pub fn completed_quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| q.is_completed)
    }

    // === Mutation helpers (used on fresh copies by the ledger) ===

    /// Heal, clamped to max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.resources.health;
        self.resources.health = (before + amount.max(0)).min(self.resources.max_health);
        self.resources.health - before
    }

    /// Lose health (clamped at 0) and accumulate lifetime damage.
    pub fn take_damage(&mut self, amount: i64) {
        let amount = amount.max(0);
        self.resources.health = (self.resources.health - amount).max(0);
        self.damage_taken += amount;
    }

    /// Undo damage previously taken.
    pub fn refund_damage(&mut self, amount: i64) {
        let amount = amount.max(0);
        self.resources.health = (self.resources.health + amount).min(self.resources.max_health);
        self.damage_taken = (self.damage_taken - amount).max(0);
    }

    /// Shift alignment, clamped to the configured bounds.
    pub fn shift_alignment(&mut self, delta: i64, settings: &Settings) {
        self.alignment = settings.clamp_alignment(self.alignment + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> PlayerState {
        PlayerState::new(PlayerClass::Warrior, &Settings::default())
    }

    #[test]
    fn test_new_player() {
        let player = warrior();
        assert_eq!(player.stats.level, 1);
        assert_eq!(player.stats.might, 3);
        assert_eq!(player.resources.health, 20);
        assert_eq!(player.resources.max_health, 20);
        assert_eq!(player.resources.gold, STARTING_GOLD);
        assert_eq!(player.alignment, 0);
        assert!(!player.quests.is_empty());
    }

    #[test]
    fn test_catalogue() {
        let consumables: Vec<_> = ItemKind::CATALOGUE.iter().filter(|i| i.is_consumable()).collect();
        assert_eq!(consumables, vec![&ItemKind::HealingDraught, &ItemKind::ManaCrystal]);
        assert!(ItemKind::CATALOGUE.iter().all(|i| i.cost() > 0));
    }

    #[test]
    fn test_heal_is_clamped() {
        let mut player = warrior();
        player.resources.health = 18;
        assert_eq!(player.heal(5), 2);
        assert_eq!(player.resources.health, 20);
    }

    #[test]
    fn test_damage_clamps_and_accumulates() {
        let mut player = warrior();
        player.take_damage(8);
        player.take_damage(30);
        assert_eq!(player.resources.health, 0);
        assert_eq!(player.damage_taken, 38);
        assert!(player.is_defeated());
    }

    #[test]
    fn test_refund_damage() {
        let mut player = warrior();
        player.take_damage(6);
        player.refund_damage(6);
        assert_eq!(player.resources.health, 20);
        assert_eq!(player.damage_taken, 0);
    }

    #[test]
    fn test_stat_bonus_includes_boost() {
        let mut player = warrior();
        player.effects.stat_boost = Some(StatBoost {
            stat: StatKind::Might,
            amount: BATTLE_CRY_BOOST,
        });
        assert_eq!(player.stat_bonus(StatKind::Might), 6);
        assert_eq!(player.stat_bonus(StatKind::Agility), 1);

        player.effects.clear_round_effects();
        assert_eq!(player.stat_bonus(StatKind::Might), 3);
    }

    #[test]
    fn test_alignment_clamped() {
        let settings = Settings::default();
        let mut player = warrior();
        player.shift_alignment(-100, &settings);
        assert_eq!(player.alignment, settings.alignment_min);
        player.shift_alignment(100, &settings);
        assert_eq!(player.alignment, settings.alignment_max);
    }

    #[test]
    fn test_clone_shares_structure() {
        let player = warrior();
        let mut next = player.clone();
        next.items.push_back(ItemKind::Whetstone);
        assert!(!player.has_item(ItemKind::Whetstone));
        assert!(next.has_item(ItemKind::Whetstone));
    }

    #[test]
    fn test_serialization() {
        let player = warrior();
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: PlayerState = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
