//! Encounter modifiers.

use serde::{Deserialize, Serialize};

use crate::cards::Suit;

/// Special behaviour carried by an elite encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliteSpecial {
    /// Failure damage is doubled.
    DoubleDamage,
    /// The opposing value never drops below this.
    PowerFloor(i64),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EliteMechanic {
    pub description: String,
    /// Flat amount added to the opposing value.
    pub value: i64,
    pub special: Option<EliteSpecial>,
}

impl EliteMechanic {
    pub fn new(description: impl Into<String>, value: i64) -> Self {
        Self {
            description: description.into(),
            value,
            special: None,
        }
    }

    #[must_use]
    pub fn with_special(mut self, special: EliteSpecial) -> Self {
        self.special = Some(special);
        self
    }
}

/// A rule attached to one encounter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeModifier {
    /// Flat value added to the opposing value.
    Difficulty(i64),
    /// Cap on cards playable against this encounter.
    MaxCards(usize),
    /// Cards of this suit contribute 0.
    SuitPenalty(Suit),
    Elite(EliteMechanic),
}

impl NodeModifier {
    /// Amount this modifier adds to the opposing value.
    #[must_use]
    pub fn opponent_adjustment(&self) -> i64 {
        match self {
            NodeModifier::Difficulty(value) => *value,
            NodeModifier::Elite(elite) => elite.value,
            NodeModifier::MaxCards(_) | NodeModifier::SuitPenalty(_) => 0,
        }
    }

    #[must_use]
    pub fn card_limit(&self) -> Option<usize> {
        match self {
            NodeModifier::MaxCards(limit) => Some(*limit),
            _ => None,
        }
    }

    #[must_use]
    pub fn penalized_suit(&self) -> Option<Suit> {
        match self {
            NodeModifier::SuitPenalty(suit) => Some(*suit),
            _ => None,
        }
    }

    #[must_use]
    pub fn doubles_damage(&self) -> bool {
        matches!(
            self,
            NodeModifier::Elite(EliteMechanic {
                special: Some(EliteSpecial::DoubleDamage),
                ..
            })
        )
    }

    #[must_use]
    pub fn power_floor(&self) -> Option<i64> {
        match self {
            NodeModifier::Elite(EliteMechanic {
                special: Some(EliteSpecial::PowerFloor(floor)),
                ..
            }) => Some(*floor),
            _ => None,
        }
    }

    /// Short human-readable description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            NodeModifier::Difficulty(value) => format!("Dangerous: +{} difficulty", value),
            NodeModifier::MaxCards(limit) => format!("Cramped: at most {} cards", limit),
            NodeModifier::SuitPenalty(suit) => format!("Cursed: {} count for nothing", suit),
            NodeModifier::Elite(elite) => elite.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustments() {
        assert_eq!(NodeModifier::Difficulty(3).opponent_adjustment(), 3);
        assert_eq!(NodeModifier::Elite(EliteMechanic::new("Boss", 4)).opponent_adjustment(), 4);
        assert_eq!(NodeModifier::MaxCards(2).opponent_adjustment(), 0);
        assert_eq!(NodeModifier::SuitPenalty(Suit::Hearts).opponent_adjustment(), 0);
    }

    #[test]
    fn test_elite_specials() {
        let brute = NodeModifier::Elite(
            EliteMechanic::new("Brute: double damage", 2).with_special(EliteSpecial::DoubleDamage),
        );
        assert!(brute.doubles_damage());
        assert_eq!(brute.power_floor(), None);

        let golem = NodeModifier::Elite(
            EliteMechanic::new("Golem: unyielding", 1).with_special(EliteSpecial::PowerFloor(12)),
        );
        assert!(!golem.doubles_damage());
        assert_eq!(golem.power_floor(), Some(12));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(NodeModifier::MaxCards(2).card_limit(), Some(2));
        assert_eq!(NodeModifier::Difficulty(2).card_limit(), None);
        assert_eq!(NodeModifier::SuitPenalty(Suit::Clubs).penalized_suit(), Some(Suit::Clubs));
        assert_eq!(NodeModifier::SuitPenalty(Suit::Clubs).description(), "Cursed: clubs count for nothing");
    }
}
