//! The built-in adventure map.

use super::encounter::{Branch, Encounter};
use super::location::{AdventureLocation, CompletionReward, LocationId};
use super::modifier::{EliteMechanic, EliteSpecial, NodeModifier};
use crate::cards::Suit;
use crate::player::{ItemKind, StatKind};

/// The four locations every new game starts with.
#[must_use]
pub fn default_locations() -> Vec<AdventureLocation> {
    vec![
        whispering_woods(),
        sunken_crypt(),
        gilded_bazaar(),
        astral_spire(),
    ]
}

fn whispering_woods() -> AdventureLocation {
    let fork = Encounter::new("woods-fork", "Split Oak").with_branch(Branch::new(
        vec![Encounter::new("woods-ember", "Ember Glade")
            .with_modifier(NodeModifier::SuitPenalty(Suit::Spades))],
        vec![
            Encounter::new("woods-thorn", "Thorn Thicket").with_modifier(NodeModifier::MaxCards(2)),
            Encounter::new("woods-hollow", "Hollow Stump"),
        ],
    ));

    AdventureLocation::new(
        LocationId::new(1),
        "Whispering Woods",
        StatKind::Might,
        Suit::Clubs,
        vec![
            Encounter::new("woods-edge", "Forest Edge"),
            Encounter::new("woods-wolves", "Wolf Den").with_modifier(NodeModifier::Difficulty(2)),
            fork,
            Encounter::new("woods-heart", "Heart of the Wood").with_modifier(NodeModifier::Elite(
                EliteMechanic::new("Elder Treant: double damage on failure", 3)
                    .with_special(EliteSpecial::DoubleDamage),
            )),
        ],
        CompletionReward::StatPoint(StatKind::Might),
    )
}

fn sunken_crypt() -> AdventureLocation {
    AdventureLocation::new(
        LocationId::new(2),
        "Sunken Crypt",
        StatKind::Spirit,
        Suit::Hearts,
        vec![
            Encounter::new("crypt-stairs", "Flooded Stairs"),
            Encounter::new("crypt-ossuary", "Ossuary")
                .with_modifier(NodeModifier::SuitPenalty(Suit::Diamonds)),
            Encounter::new("crypt-lich", "Lich's Vault").with_modifier(NodeModifier::Elite(
                EliteMechanic::new("Drowned Lich: never weaker than 12", 2)
                    .with_special(EliteSpecial::PowerFloor(12)),
            )),
        ],
        CompletionReward::Artifact("Drowned Crown".to_string()),
    )
}

fn gilded_bazaar() -> AdventureLocation {
    let fork = Encounter::new("bazaar-fork", "Two Alleys").with_branch(Branch::new(
        vec![Encounter::new("bazaar-silk", "Silk Row")],
        vec![Encounter::new("bazaar-smoke", "Smoke Den").with_modifier(NodeModifier::Difficulty(1))],
    ));

    AdventureLocation::new(
        LocationId::new(3),
        "Gilded Bazaar",
        StatKind::Agility,
        Suit::Diamonds,
        vec![
            Encounter::new("bazaar-gate", "Merchant Gate"),
            fork,
            Encounter::new("bazaar-vault", "Counting House").with_modifier(NodeModifier::MaxCards(3)),
        ],
        CompletionReward::Item(ItemKind::LuckyCharm),
    )
}

fn astral_spire() -> AdventureLocation {
    AdventureLocation::new(
        LocationId::new(4),
        "Astral Spire",
        StatKind::Wisdom,
        Suit::Spades,
        vec![
            Encounter::new("spire-base", "Star Stair"),
            Encounter::new("spire-library", "Silent Library").with_modifier(NodeModifier::MaxCards(2)),
            Encounter::new("spire-storm", "Storm Gallery").with_modifier(NodeModifier::Difficulty(3)),
            Encounter::new("spire-orrery", "Great Orrery"),
            Encounter::new("spire-apex", "Apex").with_modifier(NodeModifier::Elite(EliteMechanic::new(
                "Star Warden: +4 to the draw",
                4,
            ))),
        ],
        CompletionReward::Gold(12),
    )
}
