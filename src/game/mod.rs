//! The game engine and its boundary types.
//!
//! - `engine`: `Game`, `TurnResult`, `GameOutcome`
//! - `scoring`: Final score and its breakdown
//! - `snapshot`: Serializable full view of a game
//! - `requests`: Narration and portrait collaborator payloads

pub mod engine;
pub mod requests;
pub mod scoring;
pub mod snapshot;

pub use engine::{Game, GameOutcome, TurnResult, DUNGEON_DECK_FIRST_ID, PLAYER_DECK_FIRST_ID};
pub use requests::{AssetGenerator, NarrationRequest, PortraitRequest};
pub use scoring::{final_score, ScoreBreakdown};
pub use snapshot::GameSnapshot;
