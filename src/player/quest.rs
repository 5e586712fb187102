//! Quests: conjunctions of predicates over player state.
//!
//! A quest completes the first time every criterion holds and never
//! reverts. `refresh_quests` is run after every ledger mutation.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::{PlayerState, ResourceKind, ScoreKind, StatKind};
use crate::core::Settings;

/// A single predicate over player state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestCriterion {
    /// Resource must be at least N.
    Resource(ResourceKind, i64),

    /// Stat must be at least N.
    Stat(StatKind, i64),

    /// Level must be at least N.
    Level(u32),

    /// Scoring counter must be at least N.
    Score(ScoreKind, i64),

    /// At least N items held.
    ItemCount(usize),

    /// At least N artifacts held.
    ArtifactCount(usize),

    /// At least N locations cleared.
    LocationsCleared(u32),

    /// Alignment must be at least N.
    AlignmentAtLeast(i64),

    /// Alignment must be at most N.
    AlignmentAtMost(i64),
}

impl QuestCriterion {
    /// Check the predicate against a player.
    #[must_use]
    pub fn is_met(&self, player: &PlayerState) -> bool {
        match self {
            QuestCriterion::Resource(kind, min) => player.resources.get(*kind) >= *min,
            QuestCriterion::Stat(stat, min) => player.stats.get(*stat) >= *min,
            QuestCriterion::Level(min) => player.stats.level >= *min,
            QuestCriterion::Score(kind, min) => player.scoring.get(*kind) >= *min,
            QuestCriterion::ItemCount(min) => player.items.len() >= *min,
            QuestCriterion::ArtifactCount(min) => player.artifacts.len() >= *min,
            QuestCriterion::LocationsCleared(min) => player.locations_cleared >= *min,
            QuestCriterion::AlignmentAtLeast(min) => player.alignment >= *min,
            QuestCriterion::AlignmentAtMost(max) => player.alignment <= *max,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub criteria: Vec<QuestCriterion>,
    pub bonus_points: i64,
    pub is_completed: bool,
}

impl Quest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, bonus_points: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            criteria: Vec::new(),
            bonus_points,
            is_completed: false,
        }
    }

    /// Add a criterion.
    #[must_use]
    pub fn requires(mut self, criterion: QuestCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// All criteria hold. A quest with no criteria is never satisfied.
    #[must_use]
    pub fn is_satisfied(&self, player: &PlayerState) -> bool {
        !self.criteria.is_empty() && self.criteria.iter().all(|c| c.is_met(player))
    }
}

/// The quests every new player starts with.
#[must_use]
pub fn default_quests(settings: &Settings) -> im::Vector<Quest> {
    im::vector![
        Quest::new("pathfinder", "Pathfinder", 15).requires(QuestCriterion::LocationsCleared(1)),
        Quest::new("treasure-hoard", "Treasure Hoard", 10)
            .requires(QuestCriterion::Resource(ResourceKind::Gold, 20)),
        Quest::new("champion", "Champion of the Realm", 20)
            .requires(QuestCriterion::Score(ScoreKind::Champion, 5)),
        Quest::new("beacon", "Beacon of Virtue", 15)
            .requires(QuestCriterion::AlignmentAtLeast(settings.good_threshold)),
        Quest::new("shadow-bargain", "Shadow Bargain", 10)
            .requires(QuestCriterion::AlignmentAtMost(settings.evil_threshold)),
        Quest::new("seasoned", "Seasoned", 10).requires(QuestCriterion::Level(3)),
    ]
}

/// Mark every newly satisfied quest complete. Completed quests are left alone.
///
/// Returns the ids of quests completed by this call.
pub fn refresh_quests(player: &mut PlayerState) -> Vec<String> {
    let newly_done: Vec<usize> = player
        .quests
        .iter()
        .enumerate()
        .filter(|(_, quest)| !quest.is_completed && quest.is_satisfied(player))
        .map(|(i, _)| i)
        .collect();

    let mut completed = Vec::with_capacity(newly_done.len());
    for index in newly_done {
        let quest = &mut player.quests[index];
        quest.is_completed = true;
        info!(quest = %quest.id, bonus = quest.bonus_points, "quest completed");
        completed.push(quest.id.clone());
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerClass;

    fn player() -> PlayerState {
        PlayerState::new(PlayerClass::Rogue, &Settings::default())
    }

    #[test]
    fn test_criteria() {
        let mut p = player();
        p.resources.gold = 20;
        p.alignment = -4;

        assert!(QuestCriterion::Resource(ResourceKind::Gold, 20).is_met(&p));
        assert!(!QuestCriterion::Resource(ResourceKind::Gold, 21).is_met(&p));
        assert!(QuestCriterion::Stat(StatKind::Agility, 3).is_met(&p));
        assert!(QuestCriterion::AlignmentAtMost(-3).is_met(&p));
        assert!(!QuestCriterion::AlignmentAtLeast(0).is_met(&p));
        assert!(QuestCriterion::ItemCount(0).is_met(&p));
        assert!(!QuestCriterion::LocationsCleared(1).is_met(&p));
    }

    #[test]
    fn test_empty_quest_never_satisfied() {
        let quest = Quest::new("nothing", "Nothing", 5);
        assert!(!quest.is_satisfied(&player()));
    }

    #[test]
    fn test_refresh_completes_once() {
        let mut p = player();
        p.resources.gold = 25;

        let done = refresh_quests(&mut p);
        assert_eq!(done, vec!["treasure-hoard".to_string()]);

        let again = refresh_quests(&mut p);
        assert!(again.is_empty());
    }

    #[test]
    fn test_completion_is_monotonic() {
        let mut p = player();
        p.resources.gold = 25;
        refresh_quests(&mut p);

        p.resources.gold = 0;
        refresh_quests(&mut p);

        let hoard = p.quests.iter().find(|q| q.id == "treasure-hoard").unwrap();
        assert!(hoard.is_completed);
    }

    #[test]
    fn test_conjunction() {
        let quest = Quest::new("both", "Both", 5)
            .requires(QuestCriterion::Resource(ResourceKind::Gold, 10))
            .requires(QuestCriterion::Resource(ResourceKind::Mana, 10));

        let mut p = player();
        p.resources.gold = 10;
        assert!(!quest.is_satisfied(&p));
        p.resources.mana = 10;
        assert!(quest.is_satisfied(&p));
    }
}
