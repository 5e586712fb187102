//! Payloads for the narration and portrait collaborators.
//!
//! Asset generation is slow and may fail. The engine only builds the
//! requests; whoever drives the game hands them to an `AssetGenerator` and
//! treats `None` as "no asset". Game state never waits on the answer.

use serde::{Deserialize, Serialize};

use super::engine::{Game, GameOutcome};
use crate::core::Difficulty;
use crate::player::{PlayerClass, PlayerState};
use crate::resolve::TurnRecord;

/// Input for a narrated ending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationRequest {
    pub player: PlayerState,
    pub history: Vec<TurnRecord>,
    pub outcome: Option<GameOutcome>,
    pub score: i64,
    pub round: u32,
    pub difficulty: Difficulty,
}

/// Input for a class portrait.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortraitRequest {
    pub class_name: String,
    pub description: String,
}

impl PortraitRequest {
    #[must_use]
    pub fn for_class(class: PlayerClass) -> Self {
        Self {
            class_name: class.name().to_string(),
            description: class.description().to_string(),
        }
    }
}

/// An external producer of images or audio.
///
/// Failures are reported as `None`, never as errors.
pub trait AssetGenerator {
    fn narrate(&self, request: &NarrationRequest) -> Option<Vec<u8>>;

    fn portrait(&self, request: &PortraitRequest) -> Option<Vec<u8>>;
}

impl Game {
    #[must_use]
    pub fn narration_request(&self) -> NarrationRequest {
        NarrationRequest {
            player: self.player().clone(),
            history: self.history().iter().cloned().collect(),
            outcome: self.outcome(),
            score: self.score(),
            round: self.clock().round,
            difficulty: self.difficulty(),
        }
    }

    #[must_use]
    pub fn portrait_request(&self) -> PortraitRequest {
        PortraitRequest::for_class(self.player().class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Settings;

    /// Generator whose backend is always down.
    struct Offline;

    impl AssetGenerator for Offline {
        fn narrate(&self, _request: &NarrationRequest) -> Option<Vec<u8>> {
            None
        }

        fn portrait(&self, _request: &PortraitRequest) -> Option<Vec<u8>> {
            None
        }
    }

    #[test]
    fn test_requests_from_game() {
        let game = Game::new(Settings::default(), PlayerClass::Cleric, Difficulty::Easy, 1);

        let portrait = game.portrait_request();
        assert_eq!(portrait.class_name, "Cleric");
        assert_eq!(portrait.description, PlayerClass::Cleric.description());

        let narration = game.narration_request();
        assert_eq!(narration.round, 1);
        assert_eq!(narration.score, game.score());
        assert!(narration.outcome.is_none());
        assert!(narration.history.is_empty());
    }

    #[test]
    fn test_missing_asset_leaves_game_alone() {
        let game = Game::new(Settings::default(), PlayerClass::Rogue, Difficulty::Normal, 2);
        let before = game.snapshot();

        assert!(Offline.narrate(&game.narration_request()).is_none());
        assert!(Offline.portrait(&game.portrait_request()).is_none());
        assert_eq!(game.snapshot(), before);
    }
}
