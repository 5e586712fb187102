//! Leaderboard persistence.
//!
//! The engine only needs `save` and `list`. Two stores are provided: an
//! in-memory one and a JSON file.

pub mod leaderboard;

pub use leaderboard::{
    insert_ranked, JsonFileStore, LeaderboardEntry, MemoryStore, ScoreStore, LEADERBOARD_LIMIT,
};
