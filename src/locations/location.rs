//! Adventure locations and their progression state machine.
//!
//! ## Arena Model
//!
//! Encounters live in an append-only arena. The travel order is a separate
//! list of arena indices (`route`) with a cursor into it. Taking a branch
//! appends the chosen path to the arena and inserts its indices into the
//! route right after the cursor, so nothing already visited is ever
//! rewritten.
//!
//! The cursor only moves forward. Once it reaches the end of the route the
//! location is cleared, its completion reward is handed out once, and
//! further progress is a no-op.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use super::encounter::Encounter;
use super::modifier::NodeModifier;
use crate::cards::{Card, SuitColor};
use crate::player::{ItemKind, StatKind};

/// Location identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u16);

impl LocationId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reward for clearing a location.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionReward {
    Gold(i64),
    Xp(i64),
    Mana(i64),
    Item(ItemKind),
    /// A permanent stat point.
    StatPoint(StatKind),
    Artifact(String),
}

impl CompletionReward {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            CompletionReward::Gold(n) => format!("{} gold", n),
            CompletionReward::Xp(n) => format!("{} xp", n),
            CompletionReward::Mana(n) => format!("{} mana", n),
            CompletionReward::Item(item) => item.name().to_string(),
            CompletionReward::StatPoint(stat) => format!("+1 {}", stat.name()),
            CompletionReward::Artifact(name) => format!("the {}", name),
        }
    }
}

/// What one call to `advance` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Cursor before the move.
    pub from: usize,
    /// Cursor after the move.
    pub to: usize,
    /// Branch path taken at the departed encounter.
    pub branch: Option<SuitColor>,
    /// Encounters spliced into the route by the branch.
    pub spliced: usize,
    /// The location was cleared by this move.
    pub cleared: bool,
    /// Reward to grant, present only when `cleared`.
    pub reward: Option<CompletionReward>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureLocation {
    pub id: LocationId,
    pub name: String,
    /// Stat applied when exploring here.
    pub stat_attribute: StatKind,
    /// Suit that earns the suit bonus here.
    pub preferred_suit: crate::cards::Suit,
    pub completion_reward: CompletionReward,
    /// Append-only encounter storage.
    arena: Vec<Encounter>,
    /// Travel order as arena indices.
    route: Vec<usize>,
    cursor: usize,
    cleared: bool,
}

impl AdventureLocation {
    /// Create a location. An empty route starts out cleared.
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        stat_attribute: StatKind,
        preferred_suit: crate::cards::Suit,
        encounters: Vec<Encounter>,
        completion_reward: CompletionReward,
    ) -> Self {
        let cleared = encounters.is_empty();
        let route = (0..encounters.len()).collect();
        Self {
            id,
            name: name.into(),
            stat_attribute,
            preferred_suit,
            completion_reward,
            arena: encounters,
            route,
            cursor: 0,
            cleared,
        }
    }

    /// Progress cursor into the route.
    #[must_use]
    pub fn current_encounter_index(&self) -> usize {
        self.cursor
    }

    /// Length of the route, including spliced branch paths.
    #[must_use]
    pub fn encounter_count(&self) -> usize {
        self.route.len()
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// The encounter at the cursor, `None` once cleared.
    #[must_use]
    pub fn current_encounter(&self) -> Option<&Encounter> {
        self.route.get(self.cursor).and_then(|&i| self.arena.get(i))
    }

    /// Modifier of the encounter at the cursor.
    #[must_use]
    pub fn active_modifier(&self) -> Option<&NodeModifier> {
        self.current_encounter().and_then(|e| e.modifier.as_ref())
    }

    /// Encounters in travel order.
    pub fn route(&self) -> impl Iterator<Item = &Encounter> {
        self.route.iter().filter_map(|&i| self.arena.get(i))
    }

    /// Advance after a successful exploration.
    ///
    /// If the departed encounter branches and a card was played, the path
    /// matching the first card's colour is spliced in before moving.
    pub fn advance(&mut self, steps: usize, first_card: Option<&Card>) -> Progress {
        let from = self.cursor;
        let departed = match self.route.get(self.cursor) {
            Some(&departed) if !self.cleared => departed,
            _ => {
                return Progress {
                    from,
                    to: from,
                    branch: None,
                    spliced: 0,
                    cleared: false,
                    reward: None,
                }
            }
        };

        let mut branch = None;
        let mut spliced = 0;
        let fork = self.arena.get(departed).and_then(|e| e.branch.clone());
        if let (Some(fork), Some(card)) = (fork, first_card) {
            let color = card.color();
            let path = fork.path(color);
            let start = self.arena.len();
            self.arena.extend(path.iter().cloned());
            let indices: SmallVec<[usize; 8]> = (start..self.arena.len()).collect();
            let at = self.cursor + 1;
            self.route.splice(at..at, indices);
            branch = Some(color);
            spliced = path.len();
        }

        self.cursor = (self.cursor + steps).min(self.route.len());

        let mut reward = None;
        if self.cursor >= self.route.len() {
            self.cleared = true;
            reward = Some(self.completion_reward.clone());
            info!(location = %self.name, reward = %self.completion_reward.describe(), "location cleared");
        }

        Progress {
            from,
            to: self.cursor,
            branch,
            spliced,
            cleared: self.cleared,
            reward,
        }
    }
}
