//! Ranked summaries of finished games.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Difficulty;
use crate::game::{GameOutcome, ScoreBreakdown};
use crate::player::{PlayerClass, Scoring};
use crate::resolve::TurnRecord;

/// Entries kept on the leaderboard.
pub const LEADERBOARD_LIMIT: usize = 20;

/// Summary of one finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub class: PlayerClass,
    pub difficulty: Difficulty,
    pub score: i64,
    pub outcome: GameOutcome,
    pub scoring: Scoring,
    pub breakdown: ScoreBreakdown,
    pub history: Vec<TurnRecord>,
}

/// Storage for leaderboard entries.
pub trait ScoreStore {
    /// Add an entry, keeping the best `LEADERBOARD_LIMIT` by score.
    fn save(&mut self, entry: LeaderboardEntry) -> anyhow::Result<()>;

    /// Entries, best first.
    fn list(&self) -> anyhow::Result<Vec<LeaderboardEntry>>;
}

/// Append, sort descending by score (ties keep insertion order) and truncate.
pub fn insert_ranked(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_LIMIT);
}

/// Leaderboard held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Vec<LeaderboardEntry>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn save(&mut self, entry: LeaderboardEntry) -> anyhow::Result<()> {
        insert_ranked(&mut self.entries, entry);
        Ok(())
    }

    fn list(&self) -> anyhow::Result<Vec<LeaderboardEntry>> {
        Ok(self.entries.clone())
    }
}

/// Leaderboard stored as a JSON array in one file.
///
/// A missing file reads as an empty leaderboard.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn save(&mut self, entry: LeaderboardEntry) -> anyhow::Result<()> {
        let mut entries = self.list()?;
        insert_ranked(&mut entries, entry);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        debug!(path = %self.path.display(), entries = entries.len(), "leaderboard saved");
        Ok(())
    }

    fn list(&self) -> anyhow::Result<Vec<LeaderboardEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let entries = serde_json::from_str(&json)
            .with_context(|| format!("invalid leaderboard file {}", self.path.display()))?;
        Ok(entries)
    }
}
